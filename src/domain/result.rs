//! Result type alias for debtwatch

use super::errors::DebtwatchError;

/// Result type alias for debtwatch operations
///
/// # Examples
///
/// ```
/// use debtwatch::domain::result::Result;
/// use debtwatch::domain::errors::DebtwatchError;
///
/// fn failing_function() -> Result<()> {
///     Err(DebtwatchError::Reconciliation("duplicate period".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DebtwatchError>;
