use criterion::{criterion_group, criterion_main, Criterion, black_box};
use edgebot::perft::perft;
use edgebot::{legal_moves, Board, Player};

fn bench_movegen(c: &mut Criterion) {
    let b = Board::initial();
    c.bench_function("legal_moves_initial", |ben| {
        ben.iter(|| black_box(legal_moves(black_box(&b), Player::Black)))
    });
    c.bench_function("perft_5", |ben| {
        ben.iter(|| {
            let mut bb = b;
            black_box(perft(&mut bb, Player::Black, 5))
        })
    });
}

criterion_group!(benches, bench_movegen);
criterion_main!(benches);
