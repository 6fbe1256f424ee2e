//! Error types for boxnms.

use thiserror::Error;

/// Result alias for boxnms operations.
pub type NmsResult<T> = std::result::Result<T, NmsError>;

/// Errors that can occur when preparing inputs for or running batched NMS.
///
/// The suppression pipeline itself is total over well-formed views; every
/// variant here is raised while validating shapes or moving interop files.
#[derive(Debug, Error)]
pub enum NmsError {
    /// The backing buffer is shorter than the declared shape requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The declared shape's element count does not fit in `usize`.
    #[error("dimension product overflows for {context}")]
    DimensionOverflow { context: &'static str },
    /// The boxes and scores tensors disagree on a shared dimension.
    #[error("shape mismatch for {context}: boxes declare {expected}, scores declare {got}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },
    /// A tensor file's byte length is not a whole number of f32 values.
    #[error("tensor file length {len} is not a multiple of 4 bytes")]
    RaggedTensorFile { len: usize },
    /// Reading or writing an interop file failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
