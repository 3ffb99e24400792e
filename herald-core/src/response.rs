//! Outcome conversion for listener callbacks.

use crate::error::BoxError;

/// Trait for converting a callback's return value into a listener outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to `T`, or propagates `E` as the failure
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "listener callbacks must return `()` or a `Result`",
    note = "Return `()` for infallible listeners or `Result<(), E>` where `E: Into<BoxError>`."
)]
pub trait IntoOutcome {
    /// Convert the value into success or the failure to propagate.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}
