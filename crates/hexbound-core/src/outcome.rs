//! Result type carried up to the boundary.
//!
//! `Outcome<T>` is the sum type the C status convention serializes: `Ok`
//! becomes status `0` plus the payload slot, `Err` becomes the object's code
//! plus the error slot.

use crate::error::HexResult;
use crate::object::ErrorObject;

/// Either a payload or the error object describing the failure.
pub type Outcome<T> = std::result::Result<T, ErrorObject>;

/// Turn a typed failure into an [`ErrorObject`], capturing the backtrace at
/// the point of conversion.
pub trait IntoOutcome<T>
{
    /// Convert, building at most one error object.
    fn into_outcome(self) -> Outcome<T>;
}

impl<T> IntoOutcome<T> for HexResult<T>
{
    #[inline(never)]
    fn into_outcome(self) -> Outcome<T>
    {
        self.map_err(|error| {
            tracing::debug!(code = error.code().as_u32(), kind = error.code().name(), %error, "operation failed");
            ErrorObject::from_error(&error)
        })
    }
}
