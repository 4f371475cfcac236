use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("File is empty: {0}")]
    EmptyFile(PathBuf),
    #[error("PNG decode failed: {0}")]
    Png(#[from] image::ImageError),
    #[error("Not an uncompressed RGB TGA file")]
    TgaSignature,
    #[error("Invalid TGA dimensions {width}x{height}")]
    TgaDimensions { width: u32, height: u32 },
    #[error("Unsupported TGA bit depth {0} (expected 24 or 32)")]
    TgaDepth(u8),
    #[error("Truncated TGA pixel data: expected {expected} bytes, got {actual}")]
    TgaTruncated { expected: usize, actual: usize },
    #[error("Image {width}x{height} does not fit a TGA header")]
    TgaTooLarge { width: u32, height: u32 },
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
