use blockfall_core::{Board, Piece, PieceKind, Rotation};
use blockfall_engine::perft::perft;
use blockfall_engine::{
    check_validity, generate_placements, generate_placements_fast, RotationTrigger, SearchConfig,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn cave_board() -> Board {
    Board::from_rows(
        19,
        10,
        4,
        4,
        &[
            "..########",
            "...#######",
            "##.#######",
            "#..#######",
            "#...######",
            "##.#######",
            "##.#######",
        ],
    )
    .unwrap()
}

fn bench_generate_placements(c: &mut Criterion) {
    let board = Board::default();
    let exhaustive = SearchConfig::default();
    let fast = SearchConfig::fast();

    for kind in PieceKind::ALL {
        let spawn = Piece::spawn(kind, &board);
        c.bench_function(&format!("exhaustive_{kind}"), |b| {
            b.iter(|| generate_placements(black_box(&board), black_box(spawn), &exhaustive))
        });
        c.bench_function(&format!("fast_{kind}"), |b| {
            b.iter(|| generate_placements_fast(black_box(&board), black_box(spawn), &fast))
        });
    }
}

fn bench_triggers(c: &mut Criterion) {
    let board = cave_board();
    let spawn = Piece::spawn(PieceKind::T, &board);
    for trigger in [
        RotationTrigger::Always,
        RotationTrigger::PossibleContact,
        RotationTrigger::AtBottom,
    ] {
        let config = SearchConfig::default().with_trigger(trigger);
        c.bench_function(&format!("cave_T_{trigger:?}"), |b| {
            b.iter(|| generate_placements(black_box(&board), black_box(spawn), &config))
        });
    }
}

fn bench_validity(c: &mut Criterion) {
    let board = cave_board();
    let pieces: Vec<Piece> = PieceKind::ALL
        .iter()
        .flat_map(|&kind| (-2..10).map(move |col| Piece::new(kind, 18, col, Rotation::North)))
        .collect();
    c.bench_function("check_validity", |b| {
        b.iter(|| {
            pieces
                .iter()
                .filter(|p| check_validity(black_box(&board), p, (0, 0)))
                .count()
        })
    });
}

fn bench_perft(c: &mut Criterion) {
    let board = Board::default();
    let queue = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    c.bench_function("perft_depth_1", |b| {
        b.iter(|| perft(black_box(&board), black_box(&queue[..1]), 1))
    });

    c.bench_function("perft_depth_2", |b| {
        b.iter(|| perft(black_box(&board), black_box(&queue[..2]), 2))
    });

    c.bench_function("perft_depth_3", |b| {
        b.iter(|| perft(black_box(&board), black_box(&queue[..3]), 3))
    });
}

criterion_group!(
    benches,
    bench_generate_placements,
    bench_triggers,
    bench_validity,
    bench_perft
);
criterion_main!(benches);
