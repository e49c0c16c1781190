//! Line-oriented access to the k6 console report.
//!
//! The report is free-form text; every literal marker the resolver looks for is
//! owned by a versioned grammar so a k6 output change touches one place.
mod grammar;
mod scanner;

pub use grammar::{GrammarVersion, ReportGrammar};
pub use scanner::ReportScanner;
