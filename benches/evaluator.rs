use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_odds::cards::{parse_cards, Card};
use holdem_odds::evaluator::{best_five_of, evaluate_seven};

fn seven(s: &str) -> [Card; 7] {
    <[Card; 7]>::try_from(parse_cards(s).unwrap()).unwrap()
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let hands = [
        ("high_card", seven("Ah Kd 7s 5c 2d 9h Jc")),
        ("two_pair", seven("Jc Jd 9c 9h 2s 5d Kh")),
        ("flush", seven("Kh Th 8h 6h 3h 2c 4d")),
        ("royal_flush", seven("As Ks Qs Js Ts 2d 3c")),
    ];

    let mut g = c.benchmark_group("evaluate_seven");
    for (name, hand) in &hands {
        g.bench_with_input(BenchmarkId::new("direct", name), hand, |b, input| {
            b.iter(|| evaluate_seven(black_box(input)))
        });
        g.bench_with_input(BenchmarkId::new("best_of_21", name), hand, |b, input| {
            b.iter(|| best_five_of(black_box(input)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_evaluate_seven);
criterion_main!(benches);
