use crate::codec::{max_compressed_len, Codec};
use crate::config::RvlConfig;
use crate::error::{Result, RvlError};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::debug;

/// Shape header: height and width as little-endian u16.
pub const HEADER_LEN: usize = 4;

/// A single depth image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthFrame {
	height: u16,
	width: u16,
	samples: Vec<u16>,
}

impl DepthFrame {
	pub fn new(height: u16, width: u16, samples: Vec<u16>) -> Result<Self> {
		let expected = usize::from(height) * usize::from(width);
		if samples.len() != expected {
			return Err(RvlError::InvalidShape(format!(
				"{}x{} frame needs {} samples, got {}",
				height, width, expected, samples.len()
			)));
		}
		Ok(Self { height, width, samples })
	}

	pub fn zeros(height: u16, width: u16) -> Self {
		let count = usize::from(height) * usize::from(width);
		Self { height, width, samples: vec![0; count] }
	}

	pub fn height(&self) -> u16 { self.height }

	pub fn width(&self) -> u16 { self.width }

	pub fn pixel_count(&self) -> usize { self.samples.len() }

	pub fn samples(&self) -> &[u16] { &self.samples }

	pub fn into_samples(self) -> Vec<u16> { self.samples }

	/// Pixels holding an actual depth reading.
	pub fn valid_pixels(&self) -> usize {
		self.samples.iter().filter(|&&s| s != 0).count()
	}

	pub fn get(&self, row: u16, col: u16) -> Option<u16> {
		if row >= self.height || col >= self.width {
			return None;
		}
		self.samples.get(usize::from(row) * usize::from(self.width) + usize::from(col)).copied()
	}

	pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
		// width 0 means no samples, chunk size only has to be nonzero
		self.samples.chunks(usize::from(self.width).max(1))
	}
}

/// Reads the (height, width) header without decoding the payload.
pub fn read_shape(bytes: &[u8]) -> Result<(u16, u16)> {
	if bytes.len() < HEADER_LEN {
		return Err(RvlError::InvalidShape(format!(
			"need {} header bytes, got {}",
			HEADER_LEN,
			bytes.len()
		)));
	}
	Ok((LittleEndian::read_u16(&bytes[0..2]), LittleEndian::read_u16(&bytes[2..4])))
}

/// Writes the shape header followed by the compressed samples.
pub fn compress_frame(frame: &DepthFrame, config: &RvlConfig) -> Result<Vec<u8>> {
	let codec = Codec::from_config(config);
	let mut out = Vec::with_capacity(HEADER_LEN + max_compressed_len(frame.pixel_count()));
	out.write_u16::<LittleEndian>(frame.height)?;
	out.write_u16::<LittleEndian>(frame.width)?;

	out.resize(HEADER_LEN + max_compressed_len(frame.pixel_count()), 0);
	let written = codec.compress_into(&frame.samples, &mut out[HEADER_LEN..])?;
	out.truncate(HEADER_LEN + written);

	debug!("{}x{} frame -> {} bytes", frame.height, frame.width, out.len());
	Ok(out)
}

pub fn decompress_frame(bytes: &[u8], config: &RvlConfig) -> Result<DepthFrame> {
	let (height, width) = read_shape(bytes)?;
	let count = usize::from(height) * usize::from(width);
	let payload = &bytes[HEADER_LEN..];

	if count > 0 && payload.is_empty() {
		return Err(RvlError::InvalidShape(format!(
			"{}x{} frame has no payload",
			height, width
		)));
	}
	let bound = max_compressed_len(count);
	if payload.len() > bound {
		return Err(RvlError::InvalidShape(format!(
			"{} payload bytes exceed the {} byte bound for a {}x{} frame",
			payload.len(), bound, height, width
		)));
	}

	let samples = Codec::from_config(config).decompress(payload, count)?;
	Ok(DepthFrame { height, width, samples })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::WordOrder;

	fn sample_frame() -> DepthFrame {
		let samples = vec![
			0, 0, 812, 815, 0, 0,
			0, 810, 811, 814, 820, 0,
			0, 0, 0, 0, 0, 0,
		];
		DepthFrame::new(3, 6, samples).unwrap()
	}

	#[test]
	fn test_frame_shape_validation() {
		assert!(DepthFrame::new(2, 2, vec![1, 2, 3, 4]).is_ok());
		assert!(matches!(DepthFrame::new(2, 2, vec![1, 2, 3]), Err(RvlError::InvalidShape(_))));
	}

	#[test]
	fn test_frame_accessors() {
		let frame = sample_frame();
		assert_eq!(frame.pixel_count(), 18);
		assert_eq!(frame.valid_pixels(), 6);
		assert_eq!(frame.get(1, 1), Some(810));
		assert_eq!(frame.get(3, 0), None);
		assert_eq!(frame.get(0, 6), None);
		assert_eq!(frame.rows().count(), 3);
		assert_eq!(frame.rows().nth(1).unwrap(), &[0, 810, 811, 814, 820, 0]);
	}

	#[test]
	fn test_empty_frame() {
		let frame = DepthFrame::zeros(0, 640);
		assert_eq!(frame.rows().count(), 0);
		let bytes = compress_frame(&frame, &RvlConfig::default()).unwrap();
		assert_eq!(bytes, vec![0, 0, 0x80, 0x02]);
		assert_eq!(decompress_frame(&bytes, &RvlConfig::default()).unwrap(), frame);
	}

	#[test]
	fn test_frame_round_trip() {
		let frame = sample_frame();
		for order in [WordOrder::Little, WordOrder::Big] {
			let config = RvlConfig::default().with_word_order(order);
			let bytes = compress_frame(&frame, &config).unwrap();
			assert_eq!(read_shape(&bytes).unwrap(), (3, 6));
			assert_eq!((bytes.len() - HEADER_LEN) % 4, 0);
			assert_eq!(decompress_frame(&bytes, &config).unwrap(), frame);
		}
	}

	#[test]
	fn test_short_header() {
		assert!(matches!(read_shape(&[1, 0, 2]), Err(RvlError::InvalidShape(_))));
		assert!(matches!(
			decompress_frame(&[], &RvlConfig::default()),
			Err(RvlError::InvalidShape(_))
		));
	}

	#[test]
	fn test_missing_payload() {
		assert!(matches!(
			decompress_frame(&[4, 0, 4, 0], &RvlConfig::default()),
			Err(RvlError::InvalidShape(_))
		));
	}

	#[test]
	fn test_oversized_payload() {
		let mut bytes = vec![1, 0, 1, 0];
		bytes.extend(vec![0u8; 64]);
		assert!(matches!(
			decompress_frame(&bytes, &RvlConfig::default()),
			Err(RvlError::InvalidShape(_))
		));
	}

	#[test]
	fn test_shape_larger_than_payload() {
		let config = RvlConfig::default();
		let mut bytes = compress_frame(&sample_frame(), &config).unwrap();
		// claim 30x6 instead of 3x6
		bytes[0] = 30;
		assert!(matches!(decompress_frame(&bytes, &config), Err(RvlError::CorruptStream(_))));
	}
}
