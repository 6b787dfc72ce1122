/// Iterator over every 5-element index subset of `0..n`, in lexicographic order.
///
/// With `n = 7` this yields the C(7,5) = 21 five-card hands contained in a
/// Hold'em player's seven cards.
pub struct FiveOf {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveOf {
    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for FiveOf {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Rightmost index that still has room to move.
        match (0..5).rev().find(|&i| self.indices[i] < self.n - (5 - i)) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(result)
    }
}
