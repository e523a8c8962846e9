use std::path::PathBuf;

/// Errors surfaced by the coin-counting library.
///
/// Zero detected coins is not an error; it is reported as a result with
/// `count == 0`.
#[derive(Debug, thiserror::Error)]
pub enum CoinError {
    /// A precondition on an image or parameter was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input bytes could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    DecodeFailure(#[source] image::ImageError),

    /// Writing an image to disk failed.
    #[error("failed to save image to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoinError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CoinError>;
