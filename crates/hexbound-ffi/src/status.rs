//! # Status Channel
//!
//! Serializes Rust results into the C calling convention:
//!
//! - the return value is a `u32` status, `0` for success;
//! - a payload slot is written exactly when the status is `0`;
//! - an error slot receives a new error handle exactly when the status is
//!   non-zero, and only if the caller passed a slot.
//!
//! Every exported function funnels its result through [`IntoStatus`], so the
//! convention cannot drift between entry points.

use std::ptr::NonNull;

use hexbound_core::{ErrorObject, HexError, HexResult, IntoOutcome, Outcome, STATUS_OK};

use crate::handle::{ErrorCell, ErrorHandle};

/// Caller-allocated out-parameter for a success payload.
pub struct Slot<T>
{
    ptr: Option<NonNull<T>>,
}

impl<T> Slot<T>
{
    /// Wrap a required out-parameter.
    ///
    /// ## Errors
    ///
    /// - `NullPointer`: `ptr` is null; `what` names the argument
    ///
    /// ## Safety
    ///
    /// A non-null `ptr` must be valid for a write of `T`.
    pub unsafe fn required(ptr: *mut T, what: &'static str) -> HexResult<Self>
    {
        match NonNull::new(ptr) {
            Some(ptr) => Ok(Self { ptr: Some(ptr) }),
            None => Err(HexError::NullPointer { what }),
        }
    }

    /// A slot that discards its payload, for failures raised before the real
    /// slot was validated.
    pub fn discard() -> Self
    {
        Self { ptr: None }
    }

    fn write(self, value: T)
    {
        if let Some(ptr) = self.ptr {
            // SAFETY: checked non-null, validity promised by `required`'s caller
            unsafe { ptr.as_ptr().write(value) };
        }
    }
}

/// Caller-allocated out-parameter for an error handle. May be null.
pub struct ErrorSlot
{
    ptr: Option<NonNull<*mut ErrorCell>>,
}

impl ErrorSlot
{
    /// Wrap an optional error out-parameter.
    ///
    /// ## Safety
    ///
    /// A non-null `ptr` must be valid for a write of a pointer.
    pub unsafe fn new(ptr: *mut *mut ErrorCell) -> Self
    {
        Self { ptr: NonNull::new(ptr) }
    }

    /// A slot for operations that report only a status.
    pub fn none() -> Self
    {
        Self { ptr: None }
    }

    /// Hand `object` to the caller, or destroy it if there is nowhere to put it.
    fn put(self, object: ErrorObject)
    {
        match self.ptr {
            // SAFETY: checked non-null, validity promised by `new`'s caller
            Some(slot) => unsafe { slot.as_ptr().write(ErrorHandle::new(object).into_raw()) },
            None => tracing::trace!(code = object.code().get(), "no error slot, dropping error object"),
        }
    }

    fn wants_object(&self) -> bool
    {
        self.ptr.is_some()
    }
}

/// Serialization of a result into status + out-parameters
pub trait IntoStatus<T>
{
    /// Write the payload or the error and return the status.
    fn into_status(self, value: Slot<T>, error: ErrorSlot) -> u32;
}

impl<T> IntoStatus<T> for Outcome<T>
{
    fn into_status(self, value: Slot<T>, error: ErrorSlot) -> u32
    {
        match self {
            Ok(payload) => {
                value.write(payload);
                STATUS_OK
            }
            Err(object) => {
                let code = object.code().get();
                error.put(object);
                code
            }
        }
    }
}

impl<T> IntoStatus<T> for HexResult<T>
{
    fn into_status(self, value: Slot<T>, error: ErrorSlot) -> u32
    {
        match self {
            Ok(payload) => {
                value.write(payload);
                STATUS_OK
            }
            // Only pay for an error object (and its backtrace) if someone will read it
            Err(e) if error.wants_object() => Err::<T, _>(e).into_outcome().into_status(value, error),
            Err(e) => {
                tracing::debug!(code = e.code().as_u32(), %e, "operation failed");
                e.code().as_u32()
            }
        }
    }
}
