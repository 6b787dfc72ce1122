use crate::cards::CardParseError;
use crate::evaluator::EvalError;
use crate::hand::HandError;
use crate::simulation::SimulationError;

/// Any error the crate can report.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

pub type Result<T> = std::result::Result<T, Error>;
