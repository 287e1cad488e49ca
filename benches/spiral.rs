use spiral_distance_field::prelude::*;
use criterion::{ Criterion, criterion_group, criterion_main };

fn circle(center_x: u32, center_y: u32, radius: u32)
    -> impl (Fn(u32, u32) -> bool)
{
    move |x, y|{
        let x = x as f32 - center_x as f32;
        let y = y as f32 - center_y as f32;
        (x * x + y * y).sqrt() < radius as f32
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let width = 512;
    let height = 512;

    // mostly far from any edge, so most pixels scan every ring
    let dot = BinaryGrid::from_fn(width, height, circle(width / 2, height / 2, 6));

    // a long outline, where many searches end after a few rings
    let glyph = BinaryGrid::from_fn(width, height, circle(width / 2, height / 2, 200));

    c.bench_function("dot", |bencher| {
        bencher.iter(||{
            let sdf: SignedDistanceField<F32DistanceStorage> = compute_distance_field(&dot, DEFAULT_SPREAD).unwrap();
            sdf
        })
    });

    c.bench_function("glyph", |bencher| {
        bencher.iter(||{
            let sdf: SignedDistanceField<F32DistanceStorage> = compute_distance_field(&glyph, DEFAULT_SPREAD).unwrap();
            sdf
        })
    });

    c.bench_function("glyph_f16_normalized_64", |bencher| {
        let options = ConversionOptions::default().with_output_size(Some(64));

        bencher.iter(||{
            let field: NormalizedField<F16DistanceStorage> = normalized_distance_field(&glyph, &options).unwrap();
            field
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
