use crate::config::RvlConfig;
use crate::error::{Result, RvlError};
use crate::frame::{compress_frame, decompress_frame, DepthFrame};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::io::{Cursor, Read, Write};

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
	pub original_size: u64,
	pub compressed_size: u64,
	pub ratio: f64,
}

impl CompressionStats {
	pub fn new(original_size: u64, compressed_size: u64) -> Self {
		let ratio = if compressed_size > 0 { original_size as f64 / compressed_size as f64 } else { 0.0 };
		Self { original_size, compressed_size, ratio }
	}
}

/// Reads one raw frame of little-endian u16 samples.
pub fn read_raw_frame<R: Read>(reader: &mut R, height: u16, width: u16) -> Result<DepthFrame> {
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	let count = usize::from(height) * usize::from(width);
	if buffer.len() != count * 2 {
		return Err(RvlError::InvalidShape(format!(
			"{}x{} frame needs {} raw bytes, got {}",
			height, width, count * 2, buffer.len()
		)));
	}

	let mut samples = vec![0u16; count];
	Cursor::new(buffer).read_u16_into::<LittleEndian>(&mut samples)?;
	DepthFrame::new(height, width, samples)
}

pub fn write_raw_frame<W: Write>(writer: &mut W, frame: &DepthFrame) -> Result<()> {
	for &sample in frame.samples() {
		writer.write_u16::<LittleEndian>(sample)?;
	}
	Ok(())
}

/// Compresses one raw frame read from `reader` into a framed stream on `writer`.
pub fn compress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	height: u16,
	width: u16,
	config: &RvlConfig,
) -> Result<CompressionStats> {
	let frame = read_raw_frame(reader, height, width)?;
	let compressed = compress_frame(&frame, config)?;
	writer.write_all(&compressed)?;

	Ok(CompressionStats::new((frame.pixel_count() * 2) as u64, compressed.len() as u64))
}

/// Decompresses one framed stream from `reader`, writing raw samples to `writer`.
pub fn decompress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RvlConfig,
) -> Result<DepthFrame> {
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;
	let frame = decompress_frame(&buffer, config)?;
	write_raw_frame(writer, &frame)?;
	Ok(frame)
}

/// Compresses independent frames in parallel, preserving input order.
pub fn compress_frames(frames: &[DepthFrame], config: &RvlConfig) -> Result<Vec<Vec<u8>>> {
	let pool = build_pool(config)?;
	let pb = progress_bar(frames.len(), config);

	let streams = pool.install(|| {
		frames
			.par_iter()
			.progress_with(pb.clone())
			.map(|frame| compress_frame(frame, config))
			.collect::<Result<Vec<_>>>()
	})?;

	pb.finish_with_message("Compression finished");
	let original: usize = frames.iter().map(|f| f.pixel_count() * 2).sum();
	let compressed: usize = streams.iter().map(Vec::len).sum();
	info!("compressed {} frames: {} -> {} bytes", frames.len(), original, compressed);
	Ok(streams)
}

/// Decompresses independent framed streams in parallel, preserving input order.
pub fn decompress_frames(streams: &[Vec<u8>], config: &RvlConfig) -> Result<Vec<DepthFrame>> {
	let pool = build_pool(config)?;
	let pb = progress_bar(streams.len(), config);

	let frames = pool.install(|| {
		streams
			.par_iter()
			.progress_with(pb.clone())
			.map(|stream| decompress_frame(stream, config))
			.collect::<Result<Vec<_>>>()
	})?;

	pb.finish_with_message("Decompression finished");
	info!("decompressed {} frames", frames.len());
	Ok(frames)
}

fn build_pool(config: &RvlConfig) -> Result<rayon::ThreadPool> {
	rayon::ThreadPoolBuilder::new()
		.num_threads(config.threads)
		.build()
		.map_err(|e| RvlError::ConfigError(format!("Failed to build thread pool: {}", e)))
}

fn progress_bar(len: usize, config: &RvlConfig) -> ProgressBar {
	if !config.show_progress {
		return ProgressBar::hidden();
	}
	let pb = ProgressBar::new(len as u64);
	let style = ProgressStyle::with_template(
		"{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] Frames {pos}/{len} ({eta})",
	)
	.unwrap_or_else(|_| ProgressStyle::default_bar())
	.progress_chars("#>-");
	pb.set_style(style);
	pb
}
