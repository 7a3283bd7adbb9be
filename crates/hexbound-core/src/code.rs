//! # Error Codes
//!
//! Numeric codes shared by the status channel and by error objects.
//!
//! A status of `0` means success and is never stored in an error object.
//! Every other code identifies one failure kind:
//!
//! | code | kind           |
//! |------|----------------|
//! | 1    | `Usage`        |
//! | 2    | `Empty`        |
//! | 3    | `InvalidDigit` |
//! | 4    | `Overflow`     |
//!
//! `Usage` is reserved for caller programming errors (null pointers, dead
//! handles) and never produced by the parser for data problems.

use std::fmt;
use std::num::NonZeroU32;

/// Status value for a successful call.
pub const STATUS_OK: u32 = 0;

/// Failure kinds produced by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode
{
    /// Null or dead handle, or a null pointer argument
    Usage = 1,
    /// No hex digits in the input
    Empty = 2,
    /// A character that is not a hex digit
    InvalidDigit = 3,
    /// Decoded value does not fit in 32 bits
    Overflow = 4,
}

impl ErrorCode
{
    /// Raw status value of this code.
    ///
    /// ```rust
    /// use hexbound_core::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::Overflow.as_u32(), 4);
    /// ```
    pub const fn as_u32(self) -> u32
    {
        self as u32
    }

    /// Same value as a `NonZeroU32`, the representation stored in error objects.
    pub const fn as_non_zero(self) -> NonZeroU32
    {
        match NonZeroU32::new(self as u32) {
            Some(code) => code,
            // discriminants start at 1
            None => unreachable!(),
        }
    }

    /// Short stable name, used in log fields.
    pub const fn name(self) -> &'static str
    {
        match self {
            ErrorCode::Usage => "usage",
            ErrorCode::Empty => "empty",
            ErrorCode::InvalidDigit => "invalid_digit",
            ErrorCode::Overflow => "overflow",
        }
    }
}

impl From<ErrorCode> for u32
{
    fn from(code: ErrorCode) -> Self
    {
        code.as_u32()
    }
}

impl From<ErrorCode> for NonZeroU32
{
    fn from(code: ErrorCode) -> Self
    {
        code.as_non_zero()
    }
}

impl TryFrom<u32> for ErrorCode
{
    type Error = u32;

    /// Map a raw status back to a known code. Unknown values are returned as-is.
    fn try_from(value: u32) -> Result<Self, Self::Error>
    {
        match value {
            1 => Ok(ErrorCode::Usage),
            2 => Ok(ErrorCode::Empty),
            3 => Ok(ErrorCode::InvalidDigit),
            4 => Ok(ErrorCode::Overflow),
            other => Err(other),
        }
    }
}

impl fmt::Display for ErrorCode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} ({})", self.name(), self.as_u32())
    }
}
