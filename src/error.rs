use thiserror::Error;

#[derive(Error, Debug)]
pub enum RvlError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The compressed stream is truncated, malformed, or overruns the declared sample count.
	#[error("Corrupt RVL stream: {0}")]
	CorruptStream(String),

	/// Destination smaller than the worst-case compress bound, or not exactly
	/// `count` samples on decompress.
	#[error("Destination buffer holds {actual} elements, {required} required")]
	BufferTooSmall { required: usize, actual: usize },

	#[error("Invalid frame shape: {0}")]
	InvalidShape(String),

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RvlError>;

impl RvlError {
	pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
		RvlError::CorruptStream(msg.into())
	}
}
