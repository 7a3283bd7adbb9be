//! # Error Handles
//!
//! Opaque, validated pointers to heap-allocated error objects.
//!
//! A foreign caller only ever sees `hexbound_error *`. Behind it sits an
//! [`ErrorCell`]: a tag word followed by the [`ErrorObject`]. The tag is the
//! liveness check accessors run before touching the object.
//!
//! ## Lifecycle
//!
//! ```text
//! Unborn (null) --construct--> Live --destroy--> Destroyed
//! ```
//!
//! - Accessors accept only `Live` handles. Null, misaligned, and untagged
//!   pointers are rejected with [`HexError::InvalidHandle`].
//! - `destroy` overwrites the tag with a tombstone before freeing. This only
//!   helps while the freed block is untouched; an allocator that reuses or
//!   scribbles over it erases the tombstone at once, so a stale handle may go
//!   unnoticed. Using a destroyed handle is a caller bug.
//! - There is no way back from `Destroyed`.

use std::mem::{align_of, ManuallyDrop};
use std::ptr::NonNull;

use hexbound_core::{ErrorObject, HexError, HexResult};

/// Tag of a live cell ("HXBDLIVE").
const LIVE_TAG: u64 = 0x4858_4244_4c49_5645;

/// Tag written just before a cell is freed ("HXBDDEAD").
const DEAD_TAG: u64 = 0x4858_4244_4445_4144;

/// Heap cell behind every handle. Opaque to C.
#[repr(C)]
pub struct ErrorCell
{
    tag: u64,
    object: ErrorObject,
}

/// Owning handle to a live error cell
///
/// Dropping the handle destroys the cell. [`ErrorHandle::into_raw`] gives up
/// ownership to a foreign caller, [`ErrorHandle::from_raw`] takes it back.
///
/// ## Example
///
/// ```rust
/// use std::num::NonZeroU32;
///
/// use hexbound_core::ErrorObject;
/// use hexbound_ffi::handle::{self, ErrorHandle};
///
/// let object = ErrorObject::new(NonZeroU32::new(9).unwrap(), "boom");
/// let raw = ErrorHandle::new(object).into_raw();
///
/// // Foreign code holds `raw` here
/// let code = unsafe { handle::borrow(raw) }.unwrap().code();
/// assert_eq!(code.get(), 9);
///
/// // Reclaim and destroy
/// drop(unsafe { ErrorHandle::from_raw(raw) }.unwrap());
/// ```
#[derive(Debug)]
pub struct ErrorHandle(NonNull<ErrorCell>);

// The handle owns its cell exclusively, and ErrorObject is Send + Sync.
unsafe impl Send for ErrorHandle {}
unsafe impl Sync for ErrorHandle {}

impl ErrorHandle
{
    /// Move `object` to the heap and tag it live.
    pub fn new(object: ErrorObject) -> Self
    {
        let cell = Box::new(ErrorCell {
            tag: LIVE_TAG,
            object,
        });
        ErrorHandle(NonNull::from(Box::leak(cell)))
    }

    /// Take ownership back from a raw pointer.
    ///
    /// ## Errors
    ///
    /// - `InvalidHandle`: the pointer is null, misaligned, or not live
    ///
    /// ## Safety
    ///
    /// A non-null `ptr` must be readable for `size_of::<ErrorCell>()` bytes,
    /// which holds for any pointer returned by [`ErrorHandle::into_raw`] that
    /// has not been destroyed. Nothing else may use `ptr` afterwards.
    pub unsafe fn from_raw(ptr: *mut ErrorCell) -> HexResult<Self>
    {
        let cell = validate(ptr)?;
        Ok(ErrorHandle(cell))
    }

    /// Give up ownership; the returned pointer must come back through
    /// [`ErrorHandle::from_raw`] to be freed.
    pub fn into_raw(self) -> *mut ErrorCell
    {
        let this = ManuallyDrop::new(self);
        this.0.as_ptr()
    }

    /// The wrapped error object.
    pub fn object(&self) -> &ErrorObject
    {
        // SAFETY: the handle owns a live cell until drop
        unsafe { &self.0.as_ref().object }
    }
}

impl Drop for ErrorHandle
{
    fn drop(&mut self)
    {
        let ptr = self.0.as_ptr();
        // SAFETY: the handle owns the cell, which came from Box::leak in `new`
        unsafe {
            tracing::trace!(code = (*ptr).object.code().get(), "destroying error object");
            (*ptr).tag = DEAD_TAG;
            drop(Box::from_raw(ptr));
        }
    }
}

/// Borrow the error object behind a raw handle without taking ownership.
///
/// ## Errors
///
/// - `InvalidHandle`: the pointer is null, misaligned, or not live
///
/// ## Safety
///
/// Same as [`ErrorHandle::from_raw`]. The returned reference must not outlive
/// the handle: it dangles once the handle is destroyed.
pub unsafe fn borrow<'a>(ptr: *const ErrorCell) -> HexResult<&'a ErrorObject>
{
    let cell = validate(ptr.cast_mut())?;
    Ok(&(*cell.as_ptr()).object)
}

/// Null, alignment and tag checks shared by every entry point.
unsafe fn validate(ptr: *mut ErrorCell) -> HexResult<NonNull<ErrorCell>>
{
    let Some(cell) = NonNull::new(ptr) else {
        return Err(HexError::InvalidHandle);
    };

    if (ptr as usize) % align_of::<ErrorCell>() != 0 {
        tracing::warn!(ptr = ?ptr, "misaligned error handle");
        return Err(HexError::InvalidHandle);
    }

    let tag = std::ptr::addr_of!((*ptr).tag).read();
    if tag != LIVE_TAG {
        tracing::warn!(ptr = ?ptr, dead = tag == DEAD_TAG, "error handle is not live");
        return Err(HexError::InvalidHandle);
    }

    Ok(cell)
}

#[cfg(test)]
mod tests
{
    use std::num::NonZeroU32;

    use hexbound_core::BacktracePolicy;

    use super::*;

    fn object(code: u32) -> ErrorObject
    {
        ErrorObject::with_policy(NonZeroU32::new(code).unwrap(), "test", BacktracePolicy::Disabled)
    }

    #[test]
    fn test_round_trip_through_raw()
    {
        let raw = ErrorHandle::new(object(3)).into_raw();
        let handle = unsafe { ErrorHandle::from_raw(raw) }.unwrap();
        assert_eq!(handle.object().code().get(), 3);
    }

    #[test]
    fn test_null_is_rejected()
    {
        assert_eq!(unsafe { borrow(std::ptr::null()) }.unwrap_err(), HexError::InvalidHandle);
        assert_eq!(
            unsafe { ErrorHandle::from_raw(std::ptr::null_mut()) }.unwrap_err(),
            HexError::InvalidHandle
        );
    }

    #[test]
    fn test_misaligned_is_rejected()
    {
        let raw = ErrorHandle::new(object(1)).into_raw();
        let shifted = raw.cast::<u8>().wrapping_add(1).cast::<ErrorCell>();
        assert_eq!(unsafe { borrow(shifted) }.unwrap_err(), HexError::InvalidHandle);
        drop(unsafe { ErrorHandle::from_raw(raw) }.unwrap());
    }

    #[test]
    fn test_untagged_memory_is_rejected()
    {
        // Aligned like a cell but never constructed
        let fake = [0u64; 16];
        let ptr = fake.as_ptr().cast::<ErrorCell>();
        assert_eq!(unsafe { borrow(ptr) }.unwrap_err(), HexError::InvalidHandle);
    }
}
