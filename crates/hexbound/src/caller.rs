//! # Foreign Caller
//!
//! Drives the library strictly through its C functions, the same way a
//! program in another language would: pass a C string and out-slots, check
//! the status, read the error through accessors, destroy it.

use std::error::Error;
use std::ffi::{CStr, CString};
use std::ptr;

use hexbound_ffi::{
    error_destroy, error_get_backtrace, error_get_code, error_get_message, parse_hex, ErrorCell, STATUS_OK,
};
use libc::c_char;

type CallerResult<T> = Result<T, Box<dyn Error>>;

/// What happened to one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report
{
    /// Parsed successfully
    Value(u32),
    /// Parse failed; details read back from the error handle
    Failure
    {
        /// Status returned by `parse_hex`
        status: u32,
        /// Message from `error_get_message`
        message: String,
        /// Backtrace from `error_get_backtrace`, possibly empty
        backtrace: String,
    },
}

/// Parse one token through the C interface.
///
/// ## Errors
///
/// - the token contains a NUL byte and cannot be passed as a C string
/// - an accessor rejects the handle
/// - the code stored in the error object differs from the returned status
pub fn parse(input: &[u8]) -> CallerResult<Report>
{
    let text = CString::new(input)?;
    let mut value = 0u32;
    let mut handle: *mut ErrorCell = ptr::null_mut();

    // SAFETY: `text` is NUL-terminated and both slots outlive the call
    let status = unsafe { parse_hex(text.as_ptr(), &mut value, &mut handle) };
    if status == STATUS_OK {
        return Ok(Report::Value(value));
    }

    if handle.is_null() {
        return Err(format!("parse_hex returned status {status} without an error handle").into());
    }

    // SAFETY: non-null handle just produced by parse_hex, owned by us now
    let error = unsafe { OwnedError::new(handle) };
    let code = error.code()?;
    if code != status {
        return Err(format!("error code {code} does not match status {status}").into());
    }

    Ok(Report::Failure {
        status,
        message: error.message()?,
        backtrace: error.backtrace()?,
    })
}

/// RAII owner of an error handle; destroys it on drop.
struct OwnedError
{
    handle: *mut ErrorCell,
}

impl OwnedError
{
    /// ## Safety
    ///
    /// `handle` must be live and not owned by anything else.
    unsafe fn new(handle: *mut ErrorCell) -> Self
    {
        Self { handle }
    }

    fn code(&self) -> CallerResult<u32>
    {
        let mut code = 0u32;
        // SAFETY: live handle, valid out-slot
        let status = unsafe { error_get_code(self.handle, &mut code) };
        check(status, "error_get_code")?;
        Ok(code)
    }

    fn message(&self) -> CallerResult<String>
    {
        self.string(error_get_message, "error_get_message")
    }

    fn backtrace(&self) -> CallerResult<String>
    {
        self.string(error_get_backtrace, "error_get_backtrace")
    }

    /// Copy a borrowed string out before the handle is destroyed.
    fn string(
        &self,
        accessor: unsafe extern "C" fn(*const ErrorCell, *mut *const c_char) -> u32,
        name: &str,
    ) -> CallerResult<String>
    {
        let mut text: *const c_char = ptr::null();
        // SAFETY: live handle, valid out-slot
        let status = unsafe { accessor(self.handle, &mut text) };
        check(status, name)?;
        if text.is_null() {
            return Err(format!("{name} returned a null string").into());
        }
        // SAFETY: NUL-terminated and valid until the handle is destroyed
        Ok(unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned())
    }
}

impl Drop for OwnedError
{
    fn drop(&mut self)
    {
        // SAFETY: we own the live handle and drop runs once
        let status = unsafe { error_destroy(self.handle) };
        if status != STATUS_OK {
            hexbound_utils::warn!(status, "error_destroy failed");
        }
    }
}

fn check(status: u32, name: &str) -> CallerResult<()>
{
    if status == STATUS_OK {
        Ok(())
    } else {
        Err(format!("{name} failed with status {status}").into())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_value()
    {
        assert_eq!(parse(b"0x1A").unwrap(), Report::Value(26));
        assert_eq!(parse(b"ffffffff").unwrap(), Report::Value(u32::MAX));
    }

    #[test]
    fn test_parse_failure_reads_back_details()
    {
        match parse(b"1G").unwrap() {
            Report::Failure { status, message, .. } => {
                assert_eq!(status, 3);
                assert!(message.contains("'G'"));
            }
            Report::Value(v) => panic!("expected failure, got {v}"),
        }
    }

    #[test]
    fn test_parse_rejects_interior_nul()
    {
        assert!(parse(b"1\0").is_err());
    }
}
