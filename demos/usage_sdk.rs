use rvl::config::RvlConfig;
use rvl::frame::DepthFrame;
use rvl::pipeline;

fn main() {
	let (height, width) = (4u16, 8u16);
	let samples = (0..height * width)
		.map(|i| if i % width < 2 { 0 } else { 1200 + i })
		.collect();
	let frame = DepthFrame::new(height, width, samples).unwrap();

	let mut raw = Vec::new();
	pipeline::write_raw_frame(&mut raw, &frame).unwrap();

	let cfg = RvlConfig::default();
	let mut compressed = Vec::new();
	let stats = pipeline::compress(&mut std::io::Cursor::new(raw), &mut compressed, height, width, &cfg).unwrap();
	println!("compressed {} -> {} ({:.2}x)", stats.original_size, stats.compressed_size, stats.ratio);

	let mut restored = Vec::new();
	let decoded = pipeline::decompress(&mut std::io::Cursor::new(compressed), &mut restored, &cfg).unwrap();
	println!("restored {}x{} frame, {} valid pixels", decoded.height(), decoded.width(), decoded.valid_pixels());
}
