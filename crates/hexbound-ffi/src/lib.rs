//! # hexbound-ffi
//!
//! C ABI over `hexbound-core`: hex parsing plus opaque error handles that a
//! foreign caller can inspect and must free.
//!
//! ## Calling Convention
//!
//! Every exported function returns a `u32` status:
//!
//! - `0`: success, the payload out-parameter was written
//! - `1`: usage error (null pointer, dead handle, zero code); reserved
//! - anything else: the operation's error code
//!
//! Operations that fail with a description take a trailing error slot. It is
//! written exactly when the status is non-zero, and only when non-null. The
//! handle stored there is owned by the caller until `error_destroy`.
//!
//! ## Exports
//!
//! | function              | payload          |
//! |-----------------------|------------------|
//! | `parse_hex`           | `uint32_t`       |
//! | `error_new`           | error handle     |
//! | `error_get_code`      | `uint32_t`       |
//! | `error_get_message`   | `const char *`   |
//! | `error_get_backtrace` | `const char *`   |
//! | `error_destroy`       | none             |
//!
//! ## Why unsafe code is needed
//!
//! The exports dereference caller-supplied raw pointers. They are wrapped in
//! [`status::Slot`], [`status::ErrorSlot`] and [`handle::ErrorHandle`] so
//! that pointer handling happens in one place.
//!
//! The library keeps no global state. Concurrent calls on independent
//! arguments are safe; a single handle must not be used from two threads at
//! once while one of them destroys it.

#![allow(unsafe_code)] // Required to cross the C boundary

pub mod api;
pub mod handle;
pub mod status;

pub use api::{error_destroy, error_get_backtrace, error_get_code, error_get_message, error_new, parse_hex};
pub use handle::{ErrorCell, ErrorHandle};
pub use hexbound_core::config::BACKTRACE_ENV;
pub use hexbound_core::{ErrorCode, STATUS_OK};

/// Reserved status for caller contract violations.
pub const STATUS_USAGE: u32 = ErrorCode::Usage.as_u32();
