/// Errors that abort a decode request.
///
/// "No symbol found" is not an error; see [`crate::DecodeOutcome::NotFound`].
#[derive(thiserror::Error, Debug)]
pub enum RecognizeError {
    /// Image payload is not valid base64
    #[error("invalid base64 image payload: {0}")]
    Transport(#[from] base64::DecodeError),

    /// Option JSON could not be parsed
    #[error("invalid decode options: {0}")]
    Options(#[from] serde_json::Error),

    /// Bytes are not a decodable image
    #[error("malformed image: {reason}")]
    MalformedImage {
        /// Decoder or validation message
        reason: String,
    },

    /// Rotation angle other than a quarter turn
    #[error("unsupported rotation of {0} degrees (expected 0, 90, 180 or 270)")]
    InvalidAngle(u32),

    /// Image smaller than one binarization block
    #[error("image {width}x{height} is smaller than one {block_size}px binarization block")]
    DegenerateImage {
        /// Image width
        width: usize,
        /// Image height
        height: usize,
        /// Configured block edge in pixels
        block_size: usize,
    },

    /// Worker thread pool could not be built
    #[error("failed to start decode workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Worker dropped the request without answering
    #[error("decode worker exited before reporting a result")]
    WorkerDisconnected,
}

impl From<image::ImageError> for RecognizeError {
    fn from(err: image::ImageError) -> Self {
        RecognizeError::MalformedImage {
            reason: err.to_string(),
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, RecognizeError>;
