//! Error types for session and transform operations

use thiserror::Error;

/// Result type alias for session and transform operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Error kinds surfaced by the session core
///
/// Every failure is caught at the boundary of the operation that produced it
/// and leaves the session state exactly as it was before the operation began.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes are not a readable image
    #[error("Image decode error: {0}")]
    Decode(String),

    /// User-supplied dimensions missing, non-numeric, or non-positive
    #[error("Invalid dimensions: {0}")]
    Validation(String),

    /// Background removal worker failed, with captured diagnostic detail
    #[error("Background removal failed: {0}")]
    Transform(String),

    /// Save/export failed (unsupported mode for target format, encoder error)
    #[error("Image encode error: {0}")]
    Encode(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A background removal submission is already outstanding for this session
    #[error("a background removal task is already in flight")]
    WorkerBusy,
}

impl EditorError {
    /// Create a new decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new transform error
    pub fn transform<S: Into<String>>(msg: S) -> Self {
        Self::Transform(msg.into())
    }

    /// Create a new encode error
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create image decode error with path and format context
    pub fn decode_error_with_path<P: AsRef<std::path::Path>>(
        path: P,
        error: &image::ImageError,
    ) -> Self {
        let path_display = path.as_ref().display();
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        Self::Decode(format!(
            "Failed to decode image '{}' (format: {}): {}. Supported formats: PNG, JPEG, BMP, GIF, TIFF",
            path_display, extension, error
        ))
    }
}
