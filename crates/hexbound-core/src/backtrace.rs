//! # Backtrace Capture
//!
//! Captures the call stack when an error object is built and renders it to
//! text once, so accessors only hand out a stored buffer.
//!
//! Capture goes through `std::backtrace::Backtrace`. The rendered text drops
//! the leading frames that belong to the capture machinery itself (std's
//! backtrace internals, this module, and error object construction) and
//! renumbers the rest from zero, so frame `0` is the code that produced the
//! error.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::ffi::CString;

use crate::config::BacktracePolicy;
use crate::object::to_c_string;

/// Path fragments of frames that belong to the capture path.
const INTERNAL_FRAMES: &[&str] = &[
    "std::backtrace",
    "hexbound_core::backtrace::",
    "hexbound_core::object::",
    "hexbound_core::outcome::",
];

/// Outcome of a capture attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus
{
    /// Frames were captured and rendered
    Captured,
    /// Capture was turned off by policy or environment
    Disabled,
    /// The platform cannot capture backtraces
    Unsupported,
}

/// A rendered backtrace, NUL-terminated for the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedBacktrace
{
    status: CaptureStatus,
    text: CString,
}

impl CapturedBacktrace
{
    /// An empty backtrace with the given status.
    pub fn empty(status: CaptureStatus) -> Self
    {
        Self {
            status,
            text: CString::default(),
        }
    }

    /// Capture the current stack according to `policy`.
    #[inline(never)]
    pub fn capture(policy: BacktracePolicy) -> Self
    {
        let backtrace = match policy {
            BacktracePolicy::Disabled => return Self::empty(CaptureStatus::Disabled),
            BacktracePolicy::Env => Backtrace::capture(),
            BacktracePolicy::Always => Backtrace::force_capture(),
        };

        match backtrace.status() {
            BacktraceStatus::Captured => Self {
                status: CaptureStatus::Captured,
                text: to_c_string(render(&backtrace.to_string())),
            },
            BacktraceStatus::Disabled => Self::empty(CaptureStatus::Disabled),
            _ => Self::empty(CaptureStatus::Unsupported),
        }
    }

    /// Capture status.
    pub fn status(&self) -> CaptureStatus
    {
        self.status
    }

    /// Rendered text, possibly empty.
    pub fn as_c_str(&self) -> &std::ffi::CStr
    {
        &self.text
    }

    /// Returns `true` if no frames were rendered.
    pub fn is_empty(&self) -> bool
    {
        self.text.as_bytes().is_empty()
    }
}

/// One frame of std's rendered output: the numbered symbol line plus its
/// `at file:line` continuation lines.
struct Frame<'a>
{
    symbol: &'a str,
    locations: Vec<&'a str>,
}

/// Split std's `Display` output into frames, drop the capture frames and
/// renumber. Falls back to the raw text if it does not look like frames.
fn render(raw: &str) -> String
{
    let mut frames: Vec<Frame<'_>> = Vec::new();
    for line in raw.lines() {
        if let Some(symbol) = frame_symbol(line) {
            frames.push(Frame {
                symbol,
                locations: Vec::new(),
            });
        } else if let Some(frame) = frames.last_mut() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                frame.locations.push(trimmed);
            }
        }
    }

    if frames.is_empty() {
        return raw.to_string();
    }

    // Adapter frames such as `Result::map_err` sit between capture frames,
    // so cut through the last capture frame rather than the first non-match.
    let skip = frames
        .iter()
        .rposition(|frame| INTERNAL_FRAMES.iter().any(|p| frame.symbol.contains(p)))
        .map_or(0, |last| last + 1);

    let mut out = String::with_capacity(raw.len());
    for (index, frame) in frames.iter().skip(skip).enumerate() {
        out.push_str(&format!("{index:>4}: {}\n", frame.symbol));
        for location in &frame.locations {
            out.push_str(&format!("             {location}\n"));
        }
    }
    out
}

/// Parse `"  12: symbol::path"` into `"symbol::path"`.
fn frame_symbol(line: &str) -> Option<&str>
{
    let trimmed = line.trim_start();
    let (number, rest) = trimmed.split_once(':')?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(rest.trim())
}
