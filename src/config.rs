use crate::error::RvlError;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::fmt;
use std::str::FromStr;

/// Byte order of each packed 32-bit word in a compressed stream.
///
/// The stream itself does not record it, so both sides must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordOrder {
    #[default]
    Little,
    Big,
}

impl WordOrder {
    #[inline]
    pub(crate) fn write_word(self, buf: &mut [u8], word: u32) {
        match self {
            WordOrder::Little => LittleEndian::write_u32(buf, word),
            WordOrder::Big => BigEndian::write_u32(buf, word),
        }
    }

    #[inline]
    pub(crate) fn read_word(self, buf: &[u8]) -> u32 {
        match self {
            WordOrder::Little => LittleEndian::read_u32(buf),
            WordOrder::Big => BigEndian::read_u32(buf),
        }
    }
}

impl FromStr for WordOrder {
    type Err = RvlError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "little" | "le" => Ok(WordOrder::Little),
            "big" | "be" => Ok(WordOrder::Big),
            _ => Err(RvlError::ConfigError(format!("Invalid word order: {}", s))),
        }
    }
}

impl fmt::Display for WordOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordOrder::Little => f.write_str("little"),
            WordOrder::Big => f.write_str("big"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RvlConfig {
    pub word_order: WordOrder,
    /// Worker threads for batch frame processing.
    pub threads: usize,
    pub show_progress: bool,
}

impl Default for RvlConfig {
    fn default() -> Self {
        Self {
            word_order: WordOrder::Little,
            threads: num_cpus::get(),
            show_progress: false,
        }
    }
}

impl RvlConfig {
    pub fn with_word_order(mut self, word_order: WordOrder) -> Self {
        self.word_order = word_order;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}
