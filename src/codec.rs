//! One-shot compress / decompress of a flat sample buffer.
//!
//! Every call builds its own [`NibbleWriter`] or [`NibbleReader`] on the
//! stack, so a [`Codec`] holds configuration only and can be shared freely
//! across threads.

use crate::config::{RvlConfig, WordOrder};
use crate::error::{Result, RvlError};
use crate::runs;
use crate::vle::{NibbleReader, NibbleWriter, NIBBLES_PER_WORD, WORD_BYTES};
use log::{debug, trace};

/// Nonzero-run length above which a run's length field can need more than 5 nibbles.
const LONG_RUN: usize = 1 << 15;

/// Upper bound on the compressed size of `count` samples, in bytes.
///
/// A nonzero sample costs at most 6 nibbles (a zigzagged delta below 2^17).
/// Run length fields are paid for by the zero samples that start each cycle,
/// except for the first cycle and for runs of at least 32768 samples.
pub fn max_compressed_len(count: usize) -> usize {
    let nibbles = count
        .saturating_mul(6)
        .saturating_add(12)
        .saturating_add(count.div_ceil(LONG_RUN).saturating_mul(6));
    nibbles.div_ceil(NIBBLES_PER_WORD as usize).saturating_mul(WORD_BYTES)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    order: WordOrder,
}

impl Codec {
    pub fn new(order: WordOrder) -> Self {
        Self { order }
    }

    pub fn from_config(config: &RvlConfig) -> Self {
        Self::new(config.word_order)
    }

    pub fn word_order(&self) -> WordOrder {
        self.order
    }

    /// Compresses `samples` into `out`, returning the number of bytes written.
    ///
    /// `out` must hold at least [`max_compressed_len`] bytes for the sample count.
    /// The returned length is always a multiple of 4.
    pub fn compress_into(&self, samples: &[u16], out: &mut [u8]) -> Result<usize> {
        let required = max_compressed_len(samples.len());
        if out.len() < required {
            return Err(RvlError::BufferTooSmall { required, actual: out.len() });
        }

        let mut writer = NibbleWriter::new(out, self.order);
        runs::scan(samples, &mut writer)?;
        let written = writer.finish()?;
        debug!("compressed {} samples into {} bytes", samples.len(), written);
        Ok(written)
    }

    pub fn compress(&self, samples: &[u16]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; max_compressed_len(samples.len())];
        let written = self.compress_into(samples, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Decompresses `input` into `output`, which must hold exactly `count` samples.
    pub fn decompress_into(&self, input: &[u8], output: &mut [u16], count: usize) -> Result<()> {
        if output.len() != count {
            return Err(RvlError::BufferTooSmall { required: count, actual: output.len() });
        }

        let mut reader = NibbleReader::new(input, self.order)?;
        runs::expand(&mut reader, output)?;
        reader.finish()?;
        trace!("decompressed {} bytes into {} samples", input.len(), count);
        Ok(())
    }

    pub fn decompress(&self, input: &[u8], count: usize) -> Result<Vec<u16>> {
        let mut output = vec![0u16; count];
        self.decompress_into(input, &mut output, count)?;
        Ok(output)
    }
}

/// Compresses with little-endian words.
pub fn compress(samples: &[u16]) -> Result<Vec<u8>> {
    Codec::default().compress(samples)
}

/// Decompresses little-endian words into `count` samples.
pub fn decompress(input: &[u8], count: usize) -> Result<Vec<u16>> {
    Codec::default().decompress(input, count)
}
