use std::path::PathBuf;

/// Result alias that carries the custom [`StudioError`] type.
pub type Result<T> = std::result::Result<T, StudioError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// Free-form failure surfaced to the user as-is.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image codec failed: {0}")]
    Image(#[from] image::ImageError),
    /// Steganographic densities are limited to 1..=8 bits per channel byte.
    #[error("bit density {0} is outside 1..=8")]
    InvalidBitDensity(u8),
    #[error("payload of {len} bytes exceeds carrier capacity of {capacity} bytes")]
    PayloadTooLarge { len: usize, capacity: usize },
    /// The embedded length prefix points past the end of the carrier.
    #[error("embedded payload claims {declared} bytes but the carrier holds {available}")]
    CorruptPayload { declared: usize, available: usize },
    #[error("folder `{}` doesn't exist", .0.display())]
    MissingFolder(PathBuf),
}

impl StudioError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for StudioError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for StudioError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
