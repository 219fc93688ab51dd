//! Timed transitions.
//!
//! The engine never sleeps. Delayed transitions (mismatch clear, match
//! settle, victory modal) are tasks in a virtual-clock `Scheduler` that the
//! owning session advances and cancels.

mod scheduler;

pub use scheduler::{Scheduler, TimerId};
