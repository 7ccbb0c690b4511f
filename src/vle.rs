//! Variable-length nibble coding.
//!
//! Each value is split into 3-bit groups, least significant group first. Every
//! group is stored in a 4-bit nibble whose high bit is set when more groups
//! follow. Nibbles are packed eight to a 32-bit word, first nibble in the most
//! significant position, and words are serialized in the configured
//! [`WordOrder`].

use crate::config::WordOrder;
use crate::error::{Result, RvlError};

/// Bytes per packed word.
pub const WORD_BYTES: usize = 4;

/// Nibbles per packed word.
pub const NIBBLES_PER_WORD: u32 = 8;

/// Longest continuation chain a `u32` can need (ceil(32 / 3)).
pub const MAX_NIBBLES: u32 = 11;

const PAYLOAD_MASK: u32 = 0x7;
const CONTINUE: u32 = 0x8;

/// Number of nibbles `value` occupies once encoded.
#[inline]
pub fn encoded_nibbles(value: u32) -> u32 {
    let bits = u32::BITS - value.leading_zeros();
    bits.div_ceil(3).max(1)
}

/// Packs values into nibble words over a caller-provided byte slice.
pub struct NibbleWriter<'a> {
    out: &'a mut [u8],
    pos: usize,
    word: u32,
    nibbles: u32,
    order: WordOrder,
}

impl<'a> NibbleWriter<'a> {
    pub fn new(out: &'a mut [u8], order: WordOrder) -> Self {
        Self { out, pos: 0, word: 0, nibbles: 0, order }
    }

    pub fn encode(&mut self, mut value: u32) -> Result<()> {
        loop {
            let mut nibble = value & PAYLOAD_MASK;
            value >>= 3;
            if value != 0 {
                nibble |= CONTINUE;
            }
            self.word = (self.word << 4) | nibble;
            self.nibbles += 1;
            if self.nibbles == NIBBLES_PER_WORD {
                self.flush_word()?;
            }
            if value == 0 {
                return Ok(());
            }
        }
    }

    /// Bytes written so far, not counting the pending partial word.
    pub fn bytes_written(&self) -> usize {
        self.pos
    }

    /// Flushes any partial word, zero-padded on the right, and returns the
    /// total stream length in bytes.
    pub fn finish(mut self) -> Result<usize> {
        if self.nibbles > 0 {
            self.word <<= 4 * (NIBBLES_PER_WORD - self.nibbles);
            self.flush_word()?;
        }
        Ok(self.pos)
    }

    fn flush_word(&mut self) -> Result<()> {
        let end = self.pos + WORD_BYTES;
        let available = self.out.len();
        let slot = self
            .out
            .get_mut(self.pos..end)
            .ok_or(RvlError::BufferTooSmall { required: end, actual: available })?;
        self.order.write_word(slot, self.word);
        self.pos = end;
        self.word = 0;
        self.nibbles = 0;
        Ok(())
    }
}

/// Reads values back out of a nibble word stream.
pub struct NibbleReader<'a> {
    input: &'a [u8],
    pos: usize,
    word: u32,
    remaining: u32,
    order: WordOrder,
}

impl<'a> NibbleReader<'a> {
    pub fn new(input: &'a [u8], order: WordOrder) -> Result<Self> {
        if input.len() % WORD_BYTES != 0 {
            return Err(RvlError::corrupt(format!(
                "stream length {} is not a whole number of words",
                input.len()
            )));
        }
        Ok(Self { input, pos: 0, word: 0, remaining: 0, order })
    }

    pub fn decode(&mut self) -> Result<u32> {
        let mut value = 0u64;
        for group in 0..MAX_NIBBLES {
            let nibble = self.next_nibble()?;
            value |= u64::from(nibble & PAYLOAD_MASK) << (3 * group);
            if nibble & CONTINUE == 0 {
                return u32::try_from(value)
                    .map_err(|_| RvlError::corrupt(format!("value {value} overflows 32 bits")));
            }
        }
        Err(RvlError::corrupt(format!(
            "continuation chain longer than {MAX_NIBBLES} nibbles at byte {}",
            self.pos
        )))
    }

    /// Checks that the whole stream was consumed and that the unused tail of
    /// the last word is zero padding.
    pub fn finish(self) -> Result<()> {
        if self.pos != self.input.len() {
            return Err(RvlError::corrupt(format!(
                "{} trailing bytes after the last run",
                self.input.len() - self.pos
            )));
        }
        if self.word != 0 {
            return Err(RvlError::corrupt("nonzero padding in the final word"));
        }
        Ok(())
    }

    #[inline]
    fn next_nibble(&mut self) -> Result<u32> {
        if self.remaining == 0 {
            let end = self.pos + WORD_BYTES;
            let bytes = self
                .input
                .get(self.pos..end)
                .ok_or_else(|| RvlError::corrupt("stream ended in the middle of a value"))?;
            self.word = self.order.read_word(bytes);
            self.pos = end;
            self.remaining = NIBBLES_PER_WORD;
        }
        let nibble = self.word >> 28;
        self.word <<= 4;
        self.remaining -= 1;
        Ok(nibble)
    }
}
