//! Result type alias for piiscrub

use super::errors::PiiError;

/// Result type alias for piiscrub operations
///
/// # Examples
///
/// ```
/// use piiscrub::domain::result::Result;
/// use piiscrub::domain::errors::PiiError;
///
/// fn chunk_length(value: usize) -> Result<usize> {
///     if value == 0 {
///         return Err(PiiError::InvalidConfiguration("chunk length must be positive".into()));
///     }
///     Ok(value)
/// }
///
/// assert!(chunk_length(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, PiiError>;
