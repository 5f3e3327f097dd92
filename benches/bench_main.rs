#[macro_use]
extern crate criterion;
extern crate caissa;

use criterion::{black_box, Criterion};

use caissa::{Game, SQ, ALL_FENS};

fn bench_legal_moves_start_position(c: &mut Criterion) {
    c.bench_function("legal moves, every square", |b| {
        let mut game = Game::default();
        b.iter(|| {
            for idx in 0..64u8 {
                black_box(game.legal_moves(SQ(idx)));
            }
        })
    });
}

fn bench_fen_round_trips(c: &mut Criterion) {
    c.bench_function("fen round trips", |b| {
        b.iter(|| {
            for fen in ALL_FENS.iter() {
                let game = Game::from_fen(fen).unwrap();
                black_box(game.fen());
            }
        })
    });
}

criterion_group!(
    engine_benches,
    bench_legal_moves_start_position,
    bench_fen_round_trips
);
criterion_main!(engine_benches);
