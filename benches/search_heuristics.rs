use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use texture_bin_packer::prelude::*;

fn random_rects(seed: u64, n: usize, min: u32, max: u32) -> Vec<(u32, u32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.gen_range(min..=max), rng.gen_range(min..=max)))
        .collect()
}

fn bench_maxrects_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("maxrects_insert_batch");
    for &count in &[32usize, 128, 512] {
        let rects = random_rects(0xA5A5, count, 8, 64);
        group.throughput(Throughput::Elements(count as u64));
        for &heuristic in MaxRectsHeuristic::SEARCH_ORDER.iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("{heuristic:?}"), count),
                &rects,
                |b, rects| {
                    b.iter(|| {
                        let mut engine = MaxRectsEngine::new(2048, 2048, true);
                        let placed = engine.insert_batch(black_box(rects), heuristic);
                        black_box(placed)
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_guillotine_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("guillotine_insert_batch");
    let choices = [
        GuillotineChoice::BestAreaFit,
        GuillotineChoice::BestShortSideFit,
        GuillotineChoice::BestLongSideFit,
    ];
    for &count in &[32usize, 128, 512] {
        let rects = random_rects(0x5A5A, count, 8, 64);
        group.throughput(Throughput::Elements(count as u64));
        for &choice in &choices {
            group.bench_with_input(
                BenchmarkId::new(format!("{choice:?}"), count),
                &rects,
                |b, rects| {
                    b.iter(|| {
                        let mut engine = GuillotineEngine::new(2048, 2048, true);
                        let placed = engine.insert_batch(
                            black_box(rects),
                            choice,
                            GuillotineSplit::ShorterLeftoverAxis,
                            true,
                        );
                        black_box(placed)
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_try_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("try_process");
    for &count in &[16usize, 64, 256] {
        let rects = random_rects(0xC0DE, count, 8, 96);
        let images: Vec<SourceImage<usize>> = rects
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| SourceImage::new(i, Rect::new(0, 0, w, h)))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        let packer = TextureBinPacker::new(
            4096,
            4096,
            TextureSizeRestriction::Any,
            true,
            Thickness::default(),
        );
        group.bench_with_input(BenchmarkId::new("any", count), &images, |b, images| {
            b.iter(|| black_box(packer.try_process(black_box(images)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_maxrects_heuristics,
    bench_guillotine_heuristics,
    bench_try_process
);
criterion_main!(benches);
