//! # Exported C Functions
//!
//! Every function returns a `u32` status (`0` on success) and writes results
//! through caller-allocated out-parameters. See `include/hexbound.h` for the
//! C declarations.
//!
//! Strings handed out by the accessors point into the error object. They are
//! valid until `error_destroy` is called on that handle and must never be
//! freed by the caller.

use std::ffi::CStr;
use std::num::NonZeroU32;

use hexbound_core::{ErrorObject, HexError, HexResult};
use libc::c_char;

use crate::handle::{self, ErrorCell, ErrorHandle};
use crate::status::{ErrorSlot, IntoStatus, Slot};

/// Parse a NUL-terminated hex string into a `u32`.
///
/// On success writes `*out_value` and returns `0`. On failure returns the
/// error code and, if `out_error` is non-null, stores a new error handle the
/// caller must release with [`error_destroy`].
///
/// A null `text` or `out_value` is a usage error (status `1`).
///
/// # Safety
///
/// - `text` is null or points to a NUL-terminated string
/// - `out_value` is null or valid for a `u32` write
/// - `out_error` is null or valid for a pointer write
#[no_mangle]
pub unsafe extern "C" fn parse_hex(text: *const c_char, out_value: *mut u32, out_error: *mut *mut ErrorCell) -> u32
{
    let errors = ErrorSlot::new(out_error);
    let value = match Slot::required(out_value, "out_value") {
        Ok(slot) => slot,
        Err(e) => return Err::<u32, _>(e).into_status(Slot::discard(), errors),
    };
    let text = match c_str(text, "text") {
        Ok(text) => text,
        Err(e) => return Err::<u32, _>(e).into_status(Slot::discard(), errors),
    };

    hexbound_core::parse_hex(text.to_bytes()).into_status(value, errors)
}

/// Construct an error object from a code and a NUL-terminated message.
///
/// The message is copied. On success `*out_error` receives the new handle,
/// which the caller must release with [`error_destroy`]. A zero `code`, a
/// null `message` or a null `out_error` is a usage error (status `1`) and no
/// object is built.
///
/// # Safety
///
/// - `message` is null or points to a NUL-terminated string
/// - `out_error` is null or valid for a pointer write
#[no_mangle]
pub unsafe extern "C" fn error_new(code: u32, message: *const c_char, out_error: *mut *mut ErrorCell) -> u32
{
    let slot = match Slot::required(out_error, "out_error") {
        Ok(slot) => slot,
        Err(e) => return Err::<*mut ErrorCell, _>(e).into_status(Slot::discard(), ErrorSlot::none()),
    };

    NonZeroU32::new(code)
        .ok_or(HexError::ZeroCode)
        .and_then(|code| Ok(ErrorObject::new(code, c_str(message, "message")?.to_bytes())))
        .map(|object| ErrorHandle::new(object).into_raw())
        .into_status(slot, ErrorSlot::none())
}

/// Read the code of an error object.
///
/// # Safety
///
/// - `handle` is null or a live handle from this library
/// - `out_code` is null or valid for a `u32` write
#[no_mangle]
pub unsafe extern "C" fn error_get_code(handle: *const ErrorCell, out_code: *mut u32) -> u32
{
    with_object(handle, out_code, "out_code", |object| object.code().get())
}

/// Point `*out_message` at the message of an error object.
///
/// The string is owned by the error object and valid until [`error_destroy`].
///
/// # Safety
///
/// - `handle` is null or a live handle from this library
/// - `out_message` is null or valid for a pointer write
#[no_mangle]
pub unsafe extern "C" fn error_get_message(handle: *const ErrorCell, out_message: *mut *const c_char) -> u32
{
    with_object(handle, out_message, "out_message", |object| object.message().as_ptr())
}

/// Point `*out_backtrace` at the backtrace of an error object.
///
/// Always a valid string, empty when no backtrace was captured. Owned by the
/// error object and valid until [`error_destroy`].
///
/// # Safety
///
/// - `handle` is null or a live handle from this library
/// - `out_backtrace` is null or valid for a pointer write
#[no_mangle]
pub unsafe extern "C" fn error_get_backtrace(handle: *const ErrorCell, out_backtrace: *mut *const c_char) -> u32
{
    with_object(handle, out_backtrace, "out_backtrace", |object| object.backtrace().as_ptr())
}

/// Release an error object and everything it owns.
///
/// The handle and every string obtained from it become invalid. Destroying
/// the same handle twice is undefined.
///
/// # Safety
///
/// `handle` is null or a live handle from this library that no other thread
/// is using.
#[no_mangle]
pub unsafe extern "C" fn error_destroy(handle: *mut ErrorCell) -> u32
{
    ErrorHandle::from_raw(handle).map(drop).into_status(Slot::discard(), ErrorSlot::none())
}

/// Shared body of the accessors: validate the handle and the out-slot, then
/// write one field.
unsafe fn with_object<T>(
    handle: *const ErrorCell,
    out: *mut T,
    what: &'static str,
    field: impl FnOnce(&ErrorObject) -> T,
) -> u32
{
    let result: HexResult<(Slot<T>, T)> = handle::borrow(handle).and_then(|object| {
        let slot = Slot::required(out, what)?;
        Ok((slot, field(object)))
    });

    match result {
        Ok((slot, value)) => Ok::<T, HexError>(value).into_status(slot, ErrorSlot::none()),
        Err(e) => Err::<T, _>(e).into_status(Slot::discard(), ErrorSlot::none()),
    }
}

/// Borrow a required C string argument.
unsafe fn c_str<'a>(ptr: *const c_char, what: &'static str) -> HexResult<&'a CStr>
{
    if ptr.is_null() {
        return Err(HexError::NullPointer { what });
    }
    Ok(CStr::from_ptr(ptr))
}
