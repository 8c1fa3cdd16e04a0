//! Benchmark suite for timeline synthesis
//!
//! Measures the change-event walk, single frame compositing and the whole
//! parallel frame generation on synthetic maps.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tilemap_anim::timeline::{change_events, frame_spans, generate_animation, global_period, render_frame};
use tilemap_benches::{generate_fixture, sizes};

/// Benchmark the change-event walk for increasingly awkward period combinations
fn bench_change_events(c: &mut Criterion) {
	let mut group = c.benchmark_group("change_events");

	let cases: [(&str, &[u32]); 3] =
		[("aligned", &[400, 800]), ("coprime", &[300, 440, 700]), ("many", &[120, 200, 280, 360, 440, 520])];

	for (name, periods) in cases {
		let fixture = generate_fixture(sizes::MEDIUM.0, sizes::MEDIUM.1, 2, periods);
		let scene = fixture.scene();
		let Ok(period) = global_period(scene.tilesets()) else {
			eprintln!("Warning: period overflow for {name}");
			continue;
		};
		let period = period.duration_ms(100);

		group.bench_with_input(BenchmarkId::new("events", name), &period, |b, &period| {
			b.iter(|| {
				let events = change_events(black_box(&scene), period);
				black_box(frame_spans(&events))
			});
		});
	}

	group.finish();
}

/// Benchmark compositing of one frame at several map sizes
fn bench_render_frame(c: &mut Criterion) {
	let mut group = c.benchmark_group("render_frame");

	for (name, (columns, rows)) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)] {
		let fixture = generate_fixture(columns, rows, 3, &[300, 450]);
		let scene = fixture.scene();

		group.throughput(Throughput::Elements(u64::from(columns * rows * 3)));
		group.bench_with_input(BenchmarkId::new("render", name), &scene, |b, scene| {
			b.iter(|| black_box(render_frame(scene, black_box(150))));
		});
	}

	group.finish();
}

/// Benchmark full frame sequence generation, rendered in parallel
fn bench_generate_animation(c: &mut Criterion) {
	let mut group = c.benchmark_group("generate_animation");
	group.sample_size(10);

	let fixture = generate_fixture(sizes::MEDIUM.0, sizes::MEDIUM.1, 2, &[300, 450]);
	let scene = fixture.scene();
	group.bench_function("medium_900ms", |b| {
		b.iter(|| black_box(generate_animation(&scene, 100)));
	});

	group.finish();
}

criterion_group!(benches, bench_change_events, bench_render_frame, bench_generate_animation);
criterion_main!(benches);
