//! Tests for error objects and codes

use std::num::NonZeroU32;

use hexbound_core::backtrace::{CaptureStatus, CapturedBacktrace};
use hexbound_core::{BacktracePolicy, ErrorCode, ErrorObject, HexError, HexResult, IntoOutcome};

fn code(n: u32) -> NonZeroU32
{
    NonZeroU32::new(n).unwrap()
}

#[test]
fn test_round_trip_code_and_message()
{
    let err = ErrorObject::with_policy(code(99), "something broke", BacktracePolicy::Disabled);
    assert_eq!(err.code().get(), 99);
    assert_eq!(err.message().to_bytes(), b"something broke");
}

#[test]
fn test_round_trip_non_utf8_message()
{
    let bytes = vec![b'b', b'a', b'd', b' ', 0xfe, 0xff];
    let err = ErrorObject::with_policy(code(5), bytes.clone(), BacktracePolicy::Disabled);
    assert_eq!(err.message().to_bytes(), bytes.as_slice());
}

#[test]
fn test_message_truncated_at_interior_nul()
{
    let err = ErrorObject::with_policy(code(5), "visible\0hidden", BacktracePolicy::Disabled);
    assert_eq!(err.message().to_bytes(), b"visible");
}

#[test]
fn test_message_never_empty()
{
    let err = ErrorObject::with_policy(code(12), "", BacktracePolicy::Disabled);
    assert!(!err.message().to_bytes().is_empty());
    assert!(err.message().to_str().unwrap().contains("12"));

    let err = ErrorObject::with_policy(code(12), "\0trailing", BacktracePolicy::Disabled);
    assert_eq!(err.message().to_bytes(), b"error code 12");
}

#[test]
fn test_disabled_backtrace_is_empty_string()
{
    let err = ErrorObject::with_policy(code(1), "x", BacktracePolicy::Disabled);
    assert_eq!(err.backtrace_status(), CaptureStatus::Disabled);
    assert_eq!(err.backtrace().to_bytes(), b"");
}

#[test]
fn test_forced_backtrace_is_valid_text()
{
    let err = ErrorObject::with_policy(code(1), "x", BacktracePolicy::Always);
    // content depends on the platform, but it is always a valid C string
    let text = err.backtrace().to_string_lossy();
    if err.backtrace_status() == CaptureStatus::Captured {
        assert!(!text.is_empty());
    } else {
        assert!(text.is_empty());
    }
}

#[test]
fn test_from_parts_keeps_backtrace()
{
    let bt = CapturedBacktrace::empty(CaptureStatus::Unsupported);
    let err = ErrorObject::from_parts(code(3), "m", bt);
    assert_eq!(err.backtrace_status(), CaptureStatus::Unsupported);
    assert!(err.backtrace().to_bytes().is_empty());
}

#[test]
fn test_from_hex_error_uses_code_and_message()
{
    let err = ErrorObject::from(HexError::Overflow);
    assert_eq!(err.code(), ErrorCode::Overflow.as_non_zero());
    assert_eq!(err.message().to_str().unwrap(), HexError::Overflow.to_string());
}

#[test]
fn test_into_outcome()
{
    let ok: HexResult<u32> = Ok(7);
    assert_eq!(ok.into_outcome().unwrap(), 7);

    let failed: HexResult<u32> = Err(HexError::NullPointer { what: "text" });
    let err = failed.into_outcome().unwrap_err();
    assert_eq!(err.code().get(), ErrorCode::Usage.as_u32());
    assert_eq!(err.message().to_str().unwrap(), "null pointer: text");
}

#[test]
fn test_display()
{
    let err = ErrorObject::with_policy(code(4), "overflow", BacktracePolicy::Disabled);
    assert_eq!(err.to_string(), "[4] overflow");
}

#[test]
fn test_error_codes()
{
    assert_eq!(ErrorCode::Usage.as_u32(), 1);
    assert_eq!(ErrorCode::Empty.as_u32(), 2);
    assert_eq!(ErrorCode::InvalidDigit.as_u32(), 3);
    assert_eq!(ErrorCode::Overflow.as_u32(), 4);
    assert_eq!(ErrorCode::try_from(3), Ok(ErrorCode::InvalidDigit));
    assert_eq!(ErrorCode::try_from(0), Err(0));
    assert_eq!(ErrorCode::try_from(77), Err(77));
}

#[test]
fn test_usage_errors_share_reserved_code()
{
    for error in [HexError::NullPointer { what: "out_value" }, HexError::InvalidHandle, HexError::ZeroCode] {
        assert!(error.is_usage());
        assert_eq!(u32::from(&error), 1);
    }
    for error in [HexError::Empty, HexError::Overflow] {
        assert!(!error.is_usage());
    }
}

#[test]
fn test_error_object_is_send_and_sync()
{
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ErrorObject>();
}

#[inline(never)]
fn fail_in_caller() -> ErrorObject
{
    let result: HexResult<u32> = Err(HexError::Overflow);
    match result.into_outcome() {
        Err(object) => object,
        Ok(_) => unreachable!(),
    }
}

#[test]
fn test_forced_backtrace_starts_at_caller()
{
    let err = fail_in_caller();
    if err.backtrace_status() != CaptureStatus::Captured {
        return;
    }

    let text = err.backtrace().to_string_lossy().into_owned();
    if !text.contains("fail_in_caller") {
        return;
    }
    let first = text.lines().next().unwrap();
    assert!(first.contains("fail_in_caller"), "first frame was {first:?}");
}
