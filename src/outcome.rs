//! Outcome resolution: turn a finished k6 run into an execution result.
//!
//! Everything here is a pure function of the captured report text and the
//! exit signal. No I/O, no shared state.
mod assemble;
mod classify;
mod scenarios;

pub use assemble::resolve;
pub use classify::ExitSignal;

pub const CHECKS_FAILED_MESSAGE: &str = "some checks have failed";
pub const THRESHOLDS_FAILED_MESSAGE: &str = "some thresholds have failed";
