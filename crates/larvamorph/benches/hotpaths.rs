use std::f64::consts::TAU;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::GrayImage;
use larvamorph::{
    compute_curvature_profile, find_contours, CurvatureConfig, FitOptions, Mask, QuadraticFit,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Elongated blob with a wobbly outline, rasterized as a binary image.
fn make_larva_fixture(width: u32, height: u32, seed: u64) -> Mask {
    let mut rng = StdRng::seed_from_u64(seed);
    let harmonics: Vec<(f64, f64)> = (2..8)
        .map(|k| (rng.gen_range(0.0..0.04) / k as f64, rng.gen_range(0.0..TAU)))
        .collect();

    let cx = width as f64 * 0.5;
    let cy = height as f64 * 0.5;
    let semi_major = width as f64 * 0.38;
    let semi_minor = height as f64 * 0.09;

    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let dx = (x as f64 - cx) / semi_major;
            let dy = (y as f64 - cy - 0.15 * height as f64 * dx * dx) / semi_minor;
            let theta = dy.atan2(dx);
            let wobble: f64 = harmonics
                .iter()
                .enumerate()
                .map(|(k, &(amp, phase))| amp * ((k as f64 + 2.0) * theta + phase).sin())
                .sum();
            if (dx * dx + dy * dy).sqrt() <= 1.0 + wobble {
                img.put_pixel(x, y, image::Luma([255]));
            }
        }
    }
    Mask::from_gray_image(&img).expect("fixture dimensions are non-zero")
}

fn bench_contours(c: &mut Criterion) {
    let mask_256 = make_larva_fixture(256, 256, 7);
    let mask_512 = make_larva_fixture(512, 512, 9);

    c.bench_function("find_contours_256", |b| {
        b.iter(|| {
            let contours = find_contours(black_box(&mask_256), 0.5);
            black_box(contours.len())
        })
    });

    c.bench_function("find_contours_512", |b| {
        b.iter(|| {
            let contours = find_contours(black_box(&mask_512), 0.5);
            black_box(contours.len())
        })
    });
}

fn bench_profile(c: &mut Criterion) {
    let mask = make_larva_fixture(512, 512, 11);
    let cfg = CurvatureConfig::default();
    let coarse = CurvatureConfig {
        window_size_ratio: 20,
        ..CurvatureConfig::default()
    };

    c.bench_function("curvature_profile_512_ratio5", |b| {
        b.iter(|| {
            let profile = compute_curvature_profile(black_box(&mask), black_box(&cfg));
            black_box(profile.map(|p| p.len()).unwrap_or(0))
        })
    });

    c.bench_function("curvature_profile_512_ratio20", |b| {
        b.iter(|| {
            let profile = compute_curvature_profile(black_box(&mask), black_box(&coarse));
            black_box(profile.map(|p| p.len()).unwrap_or(0))
        })
    });
}

fn bench_quadratic_fit(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(99);
    let xs: Vec<f64> = (0..64).map(|i| i as f64 * 0.25 - 8.0).collect();
    let ys: Vec<f64> = xs
        .iter()
        .map(|&x| 0.03 * x * x - 0.2 * x + 1.0 + rng.gen_range(-0.05..0.05))
        .collect();
    let opts = FitOptions::default();

    c.bench_function("quadratic_fit_64", |b| {
        b.iter(|| {
            let fit = QuadraticFit::fit(black_box(&xs), black_box(&ys), &opts);
            black_box(fit.map(|f| f.a).unwrap_or(f64::NAN))
        })
    });
}

criterion_group!(hotpaths, bench_contours, bench_profile, bench_quadratic_fit);
criterion_main!(hotpaths);
