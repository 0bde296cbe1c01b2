use criterion::{black_box, criterion_group, criterion_main, Criterion};
use darknoise::capture::PixelSample;
use darknoise::extraction::{extract, von_neumann};

fn synthetic_sample(width: u32, height: u32) -> PixelSample {
    let count = (width * height) as usize;
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    let mut rgb = Vec::with_capacity(count * 3);
    for _ in 0..count {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        rgb.push((state & 0x07) as u8);
        rgb.push(((state >> 3) & 0x07) as u8);
        rgb.push(((state >> 6) & 0x07) as u8);
    }
    PixelSample::new(rgb, width, height, 1)
}

fn bench_extract(c: &mut Criterion) {
    let sample = synthetic_sample(640, 480);
    c.bench_function("extract_640x480", |b| {
        b.iter(|| extract(black_box(&sample)))
    });
}

fn bench_debias(c: &mut Criterion) {
    let bits = extract(&synthetic_sample(640, 480));
    c.bench_function("von_neumann_307k_bits", |b| {
        b.iter(|| von_neumann(black_box(&bits)))
    });
}

criterion_group!(benches, bench_extract, bench_debias);
criterion_main!(benches);
