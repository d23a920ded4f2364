//! Shared foundational types for the source-synchronous timing workspace.
//!
//! This crate provides the number formatting used by every textual output
//! (constraint reports and diagram labels) and clock frequency values
//! that convert to periods in nanoseconds.

#![warn(missing_docs)]

pub mod frequency;
pub mod number;

pub use frequency::{Frequency, ParseFrequencyError};
pub use number::{format_g, format_shortest};
