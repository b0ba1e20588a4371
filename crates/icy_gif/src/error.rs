//! Error types for icy_gif

use thiserror::Error;

/// Main error type for GIF encoding
#[derive(Debug, Error)]
pub enum GifError {
    // === Precondition Errors ===
    #[error("Image is too large to encode: {width}x{height} (GIF dimensions are limited to 65535)")]
    ImageTooLarge { width: u64, height: u64 },

    #[error("Cannot encode image block with empty palette")]
    EmptyPalette,

    #[error("Palette index {index} does not fit the literal code width of {lit_width} bits")]
    IndexOutOfRange { index: u8, lit_width: u8 },

    #[error("Index buffer size mismatch: expected {expected} pixels, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for icy_gif operations
pub type Result<T> = std::result::Result<T, GifError>;
