//! # Error Types
//!
//! Typed failures for hex parsing and boundary usage.
//!
//! We use `thiserror` to generate the `Error` trait implementations and the
//! messages. The rendered message of a `HexError` is exactly the message a
//! foreign caller reads back from the error object, so the `#[error]` strings
//! below are part of the external contract.

use std::fmt;

use thiserror::Error;

use crate::code::ErrorCode;

/// Main error type for library operations
///
/// ## Error Categories
///
/// 1. **Input errors**: Empty, MissingDigits, InvalidDigit, Overflow
/// 2. **Usage errors**: NullPointer, InvalidHandle, ZeroCode
///
/// Input errors describe bad data and are recoverable by retrying with
/// corrected input. Usage errors mean the caller broke the calling contract
/// and all share the reserved [`ErrorCode::Usage`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError
{
    /// The input was empty
    #[error("empty input: expected at least one hex digit")]
    Empty,

    /// The input was only a `0x`/`0X` prefix
    ///
    /// Reported with the same code as [`HexError::Empty`].
    #[error("empty input: no hex digits after '{prefix}' prefix")]
    MissingDigits
    {
        /// The prefix exactly as written (`0x` or `0X`)
        prefix: &'static str,
    },

    /// A character outside `[0-9a-fA-F]`
    ///
    /// `position` is the byte offset in the original input, prefix included.
    #[error("invalid hex digit {ch} at position {position}")]
    InvalidDigit
    {
        /// The offending character
        ch: Offending,
        /// Byte offset in the input
        position: usize,
    },

    /// The decoded magnitude does not fit in a `u32`
    #[error("overflow: value exceeds u32::MAX (0xffffffff)")]
    Overflow,

    /// A required pointer argument was null
    #[error("null pointer: {what}")]
    NullPointer
    {
        /// Name of the argument
        what: &'static str,
    },

    /// The handle is null, misaligned, or does not point at a live error object
    #[error("invalid error handle")]
    InvalidHandle,

    /// Error objects always carry a non-zero code
    #[error("error code must be non-zero")]
    ZeroCode,
}

impl HexError
{
    /// Numeric code reported for this error.
    ///
    /// ```rust
    /// use hexbound_core::{ErrorCode, HexError};
    ///
    /// assert_eq!(HexError::Overflow.code(), ErrorCode::Overflow);
    /// assert_eq!(HexError::NullPointer { what: "text" }.code(), ErrorCode::Usage);
    /// ```
    pub const fn code(&self) -> ErrorCode
    {
        match self {
            HexError::Empty | HexError::MissingDigits { .. } => ErrorCode::Empty,
            HexError::InvalidDigit { .. } => ErrorCode::InvalidDigit,
            HexError::Overflow => ErrorCode::Overflow,
            HexError::NullPointer { .. } | HexError::InvalidHandle | HexError::ZeroCode => ErrorCode::Usage,
        }
    }

    /// Returns `true` for caller contract violations as opposed to bad input.
    pub const fn is_usage(&self) -> bool
    {
        matches!(self.code(), ErrorCode::Usage)
    }
}

impl From<&HexError> for u32
{
    fn from(error: &HexError) -> Self
    {
        error.code().as_u32()
    }
}

/// The character that stopped the parser.
///
/// Input tokens are arbitrary bytes, so the offender is either a decoded
/// character or a lone byte that does not start a valid UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offending
{
    /// A decodable character
    Char(char),
    /// A byte that is not valid UTF-8 at this position
    Byte(u8),
}

impl Offending
{
    /// Decode the offender at the start of `bytes`.
    ///
    /// Returns `None` for an empty slice.
    pub(crate) fn at(bytes: &[u8]) -> Option<Self>
    {
        let first = *bytes.first()?;
        if first.is_ascii() {
            return Some(Offending::Char(char::from(first)));
        }

        // A UTF-8 sequence is at most four bytes long
        let window = &bytes[..bytes.len().min(4)];
        let decoded = match std::str::from_utf8(window) {
            Ok(s) => s.chars().next(),
            Err(e) if e.valid_up_to() > 0 => std::str::from_utf8(&window[..e.valid_up_to()])
                .ok()
                .and_then(|s| s.chars().next()),
            Err(_) => None,
        };

        Some(decoded.map_or(Offending::Byte(first), Offending::Char))
    }
}

impl fmt::Display for Offending
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Offending::Char(ch) => write!(f, "{ch:?}"),
            Offending::Byte(byte) => write!(f, "'\\x{byte:02x}'"),
        }
    }
}

/// Convenience type alias for `Result<T, HexError>`
///
/// ```rust
/// use hexbound_core::error::HexResult;
/// fn foo() -> HexResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type HexResult<T> = std::result::Result<T, HexError>;
