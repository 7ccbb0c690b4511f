//! # RVL depth frame codec
//!
//! A lossless codec for 16-bit depth images. It exploits two properties of
//! depth sensor output: large regions of zero (no reading) and smooth variation
//! between neighbouring valid pixels.
//!
//! ## Stream Format
//!
//! Samples are scanned as alternating runs of zeros and nonzeros. Each cycle
//! stores the zero-run length, the nonzero-run length, then one zigzagged
//! delta per nonzero sample (relative to the previous nonzero sample). Every
//! integer is a chain of 4-bit nibbles carrying 3 payload bits and a
//! continuation bit, packed eight to a 32-bit word.
//!
//! | Layer | Module |
//! |-------|--------|
//! | Nibble words | [`vle`] |
//! | Signed deltas | [`zigzag`] |
//! | Zero / nonzero runs | [`runs`] |
//! | Whole buffers | [`codec`] |
//! | 4-byte shape header | [`frame`] |
//! | Files and batches | [`pipeline`] |
//!
//! ## Quick Start
//!
//! ```rust
//! use rvl::{compress, decompress};
//!
//! let samples = [0u16, 0, 5, 7, 0];
//! let compressed = compress(&samples).unwrap();
//! assert_eq!(compressed.len() % 4, 0);
//!
//! let restored = decompress(&compressed, samples.len()).unwrap();
//! assert_eq!(restored, samples);
//! ```
//!
//! ### Framed Depth Images
//!
//! ```rust
//! use rvl::{compress_frame, decompress_frame, DepthFrame, RvlConfig};
//!
//! let frame = DepthFrame::new(2, 3, vec![0, 900, 901, 0, 0, 905]).unwrap();
//! let config = RvlConfig::default();
//! let bytes = compress_frame(&frame, &config).unwrap();
//! assert_eq!(decompress_frame(&bytes, &config).unwrap(), frame);
//! ```
//!
//! ### Caller-Owned Buffers
//!
//! ```rust
//! use rvl::{max_compressed_len, Codec, WordOrder};
//!
//! let samples: Vec<u16> = (0..640).collect();
//! let codec = Codec::new(WordOrder::Little);
//!
//! let mut out = vec![0u8; max_compressed_len(samples.len())];
//! let written = codec.compress_into(&samples, &mut out).unwrap();
//!
//! let mut restored = vec![0u16; samples.len()];
//! codec.decompress_into(&out[..written], &mut restored, samples.len()).unwrap();
//! assert_eq!(restored, samples);
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod runs;
pub mod vle;
pub mod zigzag;

// Re-export commonly used types for convenience
pub use codec::{compress, decompress, max_compressed_len, Codec};
pub use config::{RvlConfig, WordOrder};
pub use error::{Result, RvlError};
pub use frame::{compress_frame, decompress_frame, read_shape, DepthFrame};
pub use pipeline::{compress_frames, decompress_frames, CompressionStats};
