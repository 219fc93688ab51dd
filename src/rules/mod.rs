//! Match rules.
//!
//! - `resolve_click`: flip, match and mismatch logic for one click
//! - `clear_mismatch` / `settle_match`: the two delayed transitions
//! - `check_complete`: win detection

mod completion;
mod resolver;

pub use completion::check_complete;
pub use resolver::{clear_mismatch, resolve_click, settle_match, ClickOutcome, RejectReason, Resolution};
