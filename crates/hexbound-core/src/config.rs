//! # Configuration
//!
//! Runtime knobs read from the environment.
//!
//! Nothing here is cached: each lookup reads the environment again, so the
//! library holds no process-wide state between calls.
//!
//! ## Environment Variables
//!
//! - `HEXBOUND_BACKTRACE`: `off` (also `0`, `false`, `none`) disables capture,
//!   `env` defers to the standard `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` rules,
//!   anything else (or unset) always captures.

use std::env;
use std::str::FromStr;

/// Name of the variable controlling backtrace capture.
pub const BACKTRACE_ENV: &str = "HEXBOUND_BACKTRACE";

/// How error objects capture backtraces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BacktracePolicy
{
    /// Never capture; error objects carry an empty backtrace
    Disabled,
    /// Follow `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`
    Env,
    /// Always capture (default)
    #[default]
    Always,
}

impl BacktracePolicy
{
    /// Read the policy from `HEXBOUND_BACKTRACE`.
    ///
    /// Unknown values fall back to [`BacktracePolicy::Always`].
    pub fn from_env() -> Self
    {
        env::var(BACKTRACE_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for BacktracePolicy
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "off" | "0" | "false" | "none" | "disabled" => Ok(BacktracePolicy::Disabled),
            "env" | "std" => Ok(BacktracePolicy::Env),
            "on" | "1" | "true" | "always" | "full" => Ok(BacktracePolicy::Always),
            _ => Err(format!("Unknown backtrace policy: {s}. Use 'off', 'env', or 'always'")),
        }
    }
}
