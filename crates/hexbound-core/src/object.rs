//! # Error Objects
//!
//! The record a failing operation hands across the boundary: a non-zero code,
//! an owned message, and an owned backtrace captured at construction.
//!
//! Both strings are stored NUL-terminated so the boundary layer can hand out
//! pointers into them without copying. In Rust those views are `&CStr`
//! borrowed from the object, so they cannot outlive it; a foreign caller gets
//! the same pointers and must stop using them once the object is destroyed.

use std::ffi::{CStr, CString};
use std::fmt;
use std::num::NonZeroU32;

use crate::backtrace::{CaptureStatus, CapturedBacktrace};
use crate::config::BacktracePolicy;
use crate::error::HexError;

/// Structured error record with code, message and backtrace
///
/// ## Invariants
///
/// - `code` is non-zero and equals the status returned by the operation that
///   built the object.
/// - `message` is never empty. An empty message is replaced with
///   `"error code <N>"`.
/// - `backtrace` is always a valid string, empty when capture is off or
///   unsupported.
///
/// ## Example
///
/// ```rust
/// use std::num::NonZeroU32;
///
/// use hexbound_core::ErrorObject;
///
/// let code = NonZeroU32::new(42).unwrap();
/// let err = ErrorObject::new(code, "disk on fire");
/// assert_eq!(err.code().get(), 42);
/// assert_eq!(err.message().to_bytes(), b"disk on fire");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorObject
{
    code: NonZeroU32,
    message: CString,
    backtrace: CapturedBacktrace,
}

impl ErrorObject
{
    /// Build an error object and capture the current backtrace.
    ///
    /// The capture policy comes from `HEXBOUND_BACKTRACE`
    /// (see [`BacktracePolicy::from_env`]). Never fails; running out of memory
    /// here aborts like any other allocation.
    #[inline(never)]
    pub fn new(code: NonZeroU32, message: impl Into<Vec<u8>>) -> Self
    {
        Self::with_policy(code, message, BacktracePolicy::from_env())
    }

    /// Build an error object with an explicit capture policy.
    #[inline(never)]
    pub fn with_policy(code: NonZeroU32, message: impl Into<Vec<u8>>, policy: BacktracePolicy) -> Self
    {
        Self::from_parts(code, message, CapturedBacktrace::capture(policy))
    }

    /// Assemble an error object from an already captured backtrace.
    pub fn from_parts(code: NonZeroU32, message: impl Into<Vec<u8>>, backtrace: CapturedBacktrace) -> Self
    {
        let mut message = to_c_string(message);
        if message.as_bytes().is_empty() {
            message = to_c_string(format!("error code {code}"));
        }

        tracing::trace!(
            code = code.get(),
            backtrace = ?backtrace.status(),
            "constructed error object"
        );

        Self {
            code,
            message,
            backtrace,
        }
    }

    /// Build the error object describing `error`, capturing here.
    #[inline(never)]
    pub fn from_error(error: &HexError) -> Self
    {
        Self::new(error.code().as_non_zero(), error.to_string())
    }

    /// Numeric code.
    pub fn code(&self) -> NonZeroU32
    {
        self.code
    }

    /// Message, borrowed for as long as the object lives.
    pub fn message(&self) -> &CStr
    {
        &self.message
    }

    /// Rendered backtrace, possibly empty.
    pub fn backtrace(&self) -> &CStr
    {
        self.backtrace.as_c_str()
    }

    /// Whether a backtrace was actually captured.
    pub fn backtrace_status(&self) -> CaptureStatus
    {
        self.backtrace.status()
    }
}

impl From<HexError> for ErrorObject
{
    fn from(error: HexError) -> Self
    {
        Self::from_error(&error)
    }
}

impl fmt::Display for ErrorObject
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "[{}] {}", self.code, self.message.to_string_lossy())
    }
}

impl std::error::Error for ErrorObject {}

/// Convert bytes to a `CString`, truncating at the first interior NUL.
pub(crate) fn to_c_string(bytes: impl Into<Vec<u8>>) -> CString
{
    CString::new(bytes).unwrap_or_else(|e| {
        let nul = e.nul_position();
        let mut bytes = e.into_vec();
        bytes.truncate(nul);
        CString::new(bytes).unwrap_or_default()
    })
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_to_c_string_truncates_at_nul()
    {
        assert_eq!(to_c_string("abc\0def").as_bytes(), b"abc");
        assert_eq!(to_c_string("\0").as_bytes(), b"");
        assert_eq!(to_c_string("plain").as_bytes(), b"plain");
    }

    #[test]
    fn test_empty_message_is_replaced()
    {
        let code = NonZeroU32::new(7).unwrap();
        let err = ErrorObject::with_policy(code, "", BacktracePolicy::Disabled);
        assert_eq!(err.message().to_bytes(), b"error code 7");
    }
}
