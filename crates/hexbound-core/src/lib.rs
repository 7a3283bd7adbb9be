//! # hexbound-core
//!
//! Hex parsing and the error object model behind the hexbound C interface.
//!
//! This crate provides:
//! - A hex parser with well-defined failure modes ([`parser`])
//! - Typed errors and their numeric codes ([`error`], [`code`])
//! - The [`ErrorObject`] record (code, message, backtrace) that crosses the
//!   boundary ([`object`])
//! - Backtrace capture and rendering ([`backtrace`])
//!
//! Everything here is safe Rust. The raw-pointer side of the boundary lives in
//! `hexbound-ffi`, which serializes [`Outcome`] into status codes and
//! out-parameters.
//!
//! ## Example
//!
//! ```rust
//! use hexbound_core::{parse_hex, ErrorCode};
//!
//! assert_eq!(parse_hex("0x1a").unwrap(), 26);
//!
//! let err = parse_hex("").unwrap_err();
//! assert_eq!(err.code(), ErrorCode::Empty.as_non_zero());
//! ```

pub mod backtrace;
pub mod code;
pub mod config;
pub mod error;
pub mod object;
pub mod outcome;
pub mod parser;

pub use code::{ErrorCode, STATUS_OK};
pub use config::BacktracePolicy;
pub use error::{HexError, HexResult};
pub use object::ErrorObject;
pub use outcome::{IntoOutcome, Outcome};
pub use parser::parse_hex;
