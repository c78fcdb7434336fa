use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{standard_shape, Grid, PieceController};
use blockfall::types::{Cell, PieceKind, Position, RotationDirection, FRAME_MS};

fn bench_tick(c: &mut Criterion) {
    let mut game = PieceController::new(12345);
    game.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            game.tick(black_box(FRAME_MS));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(12, 20);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..12 {
                    grid.set(x, y, Cell::Filled(5));
                }
            }
            black_box(grid.clear_lines());
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let grid = Grid::new(12, 20);
    let shape = standard_shape(PieceKind::T);

    c.bench_function("check_collision", |b| {
        b.iter(|| black_box(grid.check_collision(&shape, black_box(Position::new(5, 10)))))
    });
}

fn bench_move(c: &mut Criterion) {
    let mut game = PieceController::new(12345);
    game.start();

    c.bench_function("move_piece", |b| {
        let mut offset = 1;
        b.iter(|| {
            if !game.move_piece(offset) {
                offset = -offset;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = PieceController::new(12345);
    game.start();
    game.drop_piece();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            game.rotate(RotationDirection::Clockwise);
        })
    });
}

fn bench_slam(c: &mut Criterion) {
    c.bench_function("slam_until_top_out", |b| {
        b.iter(|| {
            let mut game = PieceController::new(black_box(7));
            game.start();
            while game.slam() {}
            black_box(game.snapshot().board_hash())
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collision,
    bench_move,
    bench_rotate,
    bench_slam
);
criterion_main!(benches);
