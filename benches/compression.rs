use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rvl::config::RvlConfig;
use rvl::frame::DepthFrame;
use rvl::{compress, compress_frames, decompress};

const WIDTH: u16 = 640;
const HEIGHT: u16 = 480;

fn depth_like() -> Vec<u16> {
	(0..usize::from(WIDTH) * usize::from(HEIGHT))
		.map(|i| {
			let (row, col) = (i / usize::from(WIDTH), i % usize::from(WIDTH));
			if col < 40 || (row * 31 + col * 17) % 23 == 0 { 0 } else { (900 + row / 2 + col / 8) as u16 }
		})
		.collect()
}

fn bench_compress(c: &mut Criterion) {
	let samples = depth_like();
	let mut group = c.benchmark_group("compression");
	group.throughput(Throughput::Bytes((samples.len() * 2) as u64));
	group.bench_function("compress_vga_depth", |b| {
		b.iter(|| compress(&samples).unwrap());
	});
	let compressed = compress(&samples).unwrap();
	group.bench_function("decompress_vga_depth", |b| {
		b.iter(|| decompress(&compressed, samples.len()).unwrap());
	});
	group.bench_function("compress_zeroes", |b| {
		let zeros = vec![0u16; samples.len()];
		b.iter(|| compress(&zeros).unwrap());
	});
	group.finish();
}

fn bench_batch(c: &mut Criterion) {
	let frame = DepthFrame::new(HEIGHT, WIDTH, depth_like()).unwrap();
	let frames = vec![frame; 16];
	let config = RvlConfig::default();
	let mut group = c.benchmark_group("batch");
	group.throughput(Throughput::Bytes((frames.len() * frames[0].pixel_count() * 2) as u64));
	group.bench_function("compress_16_frames", |b| {
		b.iter(|| compress_frames(&frames, &config).unwrap());
	});
	group.finish();
}

criterion_group!(benches, bench_compress, bench_batch);
criterion_main!(benches);
