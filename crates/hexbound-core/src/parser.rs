//! # Hex Parser
//!
//! Decodes a hexadecimal token into a `u32`.
//!
//! ## Accepted Input
//!
//! - An optional `0x` or `0X` prefix, stripped once
//! - One or more digits from `[0-9a-fA-F]`
//!
//! Nothing else is accepted: no sign, no surrounding whitespace, no `_`
//! separators. Leading zeros are fine in any number; only the decoded
//! magnitude decides overflow, so `"000000001"` is `1`.
//!
//! ## Failure Order
//!
//! Digits are consumed left to right and the first failure wins. `"1G"` is an
//! invalid digit, `"1000000000G"` overflows before the `G` is reached.

use crate::error::{HexError, HexResult, Offending};
use crate::outcome::{IntoOutcome, Outcome};

const PREFIXES: [&str; 2] = ["0x", "0X"];

/// Decode `input` without building an error object.
///
/// Deterministic: the same bytes always give the same result.
///
/// ```rust
/// use hexbound_core::parser::decode;
/// use hexbound_core::HexError;
///
/// assert_eq!(decode("1A"), Ok(26));
/// assert_eq!(decode("0xFF"), Ok(255));
/// assert_eq!(decode(""), Err(HexError::Empty));
/// assert_eq!(decode("100000000"), Err(HexError::Overflow));
/// ```
pub fn decode(input: impl AsRef<[u8]>) -> HexResult<u32>
{
    let input = input.as_ref();
    if input.is_empty() {
        return Err(HexError::Empty);
    }

    let (prefix, digits) = split_prefix(input);
    if digits.is_empty() {
        // input was non-empty, so a prefix must have been stripped
        return Err(HexError::MissingDigits {
            prefix: prefix.unwrap_or(PREFIXES[0]),
        });
    }

    let offset = input.len() - digits.len();
    let mut value: u32 = 0;
    for (index, &byte) in digits.iter().enumerate() {
        let Some(digit) = char::from(byte).to_digit(16) else {
            let position = offset + index;
            return Err(HexError::InvalidDigit {
                ch: Offending::at(&input[position..]).unwrap_or(Offending::Byte(byte)),
                position,
            });
        };

        value = value
            .checked_mul(16)
            .and_then(|v| v.checked_add(digit))
            .ok_or(HexError::Overflow)?;
    }

    Ok(value)
}

/// Parse `input`, building an [`ErrorObject`](crate::ErrorObject) with a
/// backtrace on failure.
///
/// This is the operation the boundary exposes. No error object is built on
/// success.
///
/// ```rust
/// use hexbound_core::parse_hex;
///
/// assert_eq!(parse_hex("ffffffff").unwrap(), u32::MAX);
///
/// let err = parse_hex("1G").unwrap_err();
/// assert_eq!(err.code().get(), 3);
/// assert!(err.message().to_str().unwrap().contains("'G'"));
/// ```
#[inline(never)]
pub fn parse_hex(input: impl AsRef<[u8]>) -> Outcome<u32>
{
    let input = input.as_ref();
    tracing::trace!(len = input.len(), "parsing hex token");
    decode(input).into_outcome()
}

/// Split off one leading `0x`/`0X`.
fn split_prefix(input: &[u8]) -> (Option<&'static str>, &[u8])
{
    for prefix in PREFIXES {
        if let Some(rest) = input.strip_prefix(prefix.as_bytes()) {
            return (Some(prefix), rest);
        }
    }
    (None, input)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_split_prefix()
    {
        assert_eq!(split_prefix(b"0xff"), (Some("0x"), &b"ff"[..]));
        assert_eq!(split_prefix(b"0Xff"), (Some("0X"), &b"ff"[..]));
        assert_eq!(split_prefix(b"0x0xff"), (Some("0x"), &b"0xff"[..]));
        assert_eq!(split_prefix(b"ff"), (None, &b"ff"[..]));
        assert_eq!(split_prefix(b"0"), (None, &b"0"[..]));
    }
}
