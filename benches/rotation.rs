use criterion::{Criterion, black_box, criterion_group, criterion_main};
use local_barcode_recognizer::PixelGrid;
use local_barcode_recognizer::utils::rotation::{Rotation, rotate_by};

fn bench_rotate_medium(c: &mut Criterion) {
    let grid = PixelGrid::from_rgba(640, 480, vec![128u8; 640 * 480 * 4]).unwrap();
    for rotation in [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
        c.bench_function(&format!("rotate_{}_640x480", rotation.degrees()), |b| {
            b.iter(|| rotate_by(black_box(&grid), black_box(rotation)))
        });
    }
}

fn bench_rotate_large(c: &mut Criterion) {
    let grid = PixelGrid::from_rgba(1920, 1080, vec![128u8; 1920 * 1080 * 4]).unwrap();
    c.bench_function("rotate_90_1920x1080", |b| {
        b.iter(|| rotate_by(black_box(&grid), black_box(Rotation::Deg90)))
    });
}

criterion_group!(benches, bench_rotate_medium, bench_rotate_large);
criterion_main!(benches);
