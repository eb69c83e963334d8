//! Geometry and uniform benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench geometry
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench geometry -- sphere

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use easel::{primitives, Camera, ObjectUniform, Transform};
use glam::Vec3;

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn bench_generators(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("generators/sphere");
        for &n in &[16, 64, 256] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter(|| primitives::sphere(100.0, n, n));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("generators/torus");
        for &n in &[16, 64, 256] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter(|| primitives::torus(100.0, 25.0, n, n));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("generators/cylinder");
        for &n in &[16, 256, 4096] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter(|| primitives::cylinder(50.0, 100.0, n));
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Per-frame uniform computation
// ---------------------------------------------------------------------------

fn bench_uniforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniforms");
    for &n in &[100, 1000, 10000] {
        let transforms: Vec<Transform> = (0..n)
            .map(|i| Transform {
                translate: Vec3::new(i as f32, 0.0, 0.0),
                rotate_axis: Vec3::new(1.0, 1.0, 0.0),
                rotate_deg: i as f32,
                scale: Vec3::splat(2.0),
            })
            .collect();
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO, Vec3::Y, 60.0, 1.0, 1000.0);

        group.bench_with_input(BenchmarkId::new("perspective", n), &n, |b, _| {
            b.iter(|| {
                for t in &transforms {
                    let _ = ObjectUniform::compute(t, &camera, 1280, 720);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generators, bench_uniforms);
criterion_main!(benches);
