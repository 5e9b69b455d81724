use std::io;
use std::path::PathBuf;

use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum BinQRError {
    // Generation path
    #[error("Payload too large: {actual} bytes exceeds the {limit} byte capacity")]
    PayloadTooLarge { limit: usize, actual: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{} already exists", .0.display())]
    OutputExists(PathBuf),

    // Recovery path
    #[error("No byte array found")]
    NoBinaryData,

    #[error("Cannot decode the QR code: {0}")]
    DecodeFailure(String),

    // Shared
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl BinQRError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type BinQRResult<T> = Result<T, BinQRError>;

#[cfg(test)]
mod error_tests {
    use super::BinQRError;

    #[test]
    fn test_messages() {
        let err = BinQRError::PayloadTooLarge { limit: 2331, actual: 2332 };
        assert_eq!(err.to_string(), "Payload too large: 2332 bytes exceeds the 2331 byte capacity");

        let err = BinQRError::OutputExists("out.png".into());
        assert_eq!(err.to_string(), "out.png already exists");

        assert_eq!(BinQRError::NoBinaryData.to_string(), "No byte array found");
    }
}
