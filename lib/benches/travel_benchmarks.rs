//! Travel planning benchmarks
//!
//! Run with: cargo bench

use comb::geometry::{Point, Polygon};
use comb::travel::AvoidCrossingPerimeters;
use comb::{scale, TravelConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A 100mm plate with a `holes` x `holes` grid of 2mm square holes.
fn make_perforated_plate(holes: usize) -> Vec<Polygon> {
    let size = scale(100.0);
    let mut polygons = vec![Polygon::rectangle(Point::new(0, 0), Point::new(size, size))];
    let pitch = size / (holes as i64 + 1);
    for i in 1..=holes as i64 {
        for j in 1..=holes as i64 {
            polygons.push(Polygon::square(Point::new(i * pitch, j * pitch), scale(1.0)).reversed());
        }
    }
    polygons
}

fn bench_point_is_inside(c: &mut Criterion) {
    let polygons = make_perforated_plate(10);
    let planner = AvoidCrossingPerimeters::with_defaults(&polygons);
    let p = Point::new(scale(51.3), scale(47.9));

    c.bench_function("point_is_inside_boundary", |b| {
        b.iter(|| planner.point_is_inside_boundary(black_box(&p)))
    });
}

fn bench_plan_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_path");
    for holes in [2usize, 5, 10] {
        let polygons = make_perforated_plate(holes);
        let pitch = scale(100.0) / (holes as i64 + 1);
        let start = Point::new(scale(0.5), pitch);
        let end = Point::new(scale(99.5), pitch);

        for pruning in [true, false] {
            let config = TravelConfig::new().with_bounding_box_pruning(pruning);
            let planner = match AvoidCrossingPerimeters::new(&polygons, config) {
                Ok(planner) => planner,
                Err(_) => continue,
            };
            let label = if pruning { "pruned" } else { "full_scan" };
            group.bench_with_input(BenchmarkId::new(label, holes), &holes, |b, _| {
                b.iter(|| planner.plan_path(black_box(start), black_box(end)))
            });
        }
    }
    group.finish();
}

fn bench_move_point_inside(c: &mut Criterion) {
    let polygons = make_perforated_plate(10);
    let planner = AvoidCrossingPerimeters::with_defaults(&polygons);
    let outside = Point::new(scale(101.0), scale(37.0));

    c.bench_function("move_point_inside_boundary", |b| {
        b.iter(|| planner.move_point_inside_boundary(black_box(outside)))
    });
}

criterion_group!(
    benches,
    bench_point_is_inside,
    bench_plan_path,
    bench_move_point_inside
);
criterion_main!(benches);
