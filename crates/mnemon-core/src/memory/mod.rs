//! Memory module - Core types and data structures
//!
//! The per-card memory model consumed and produced by the scheduler:
//! - `Card`: DSR scalars, lifecycle state, counters, timestamps
//! - `State` / `Rating`: closed enumerations with stable wire integers
//! - `ReviewLog`: immutable per-review history record

mod card;
mod review_log;

pub use card::{Card, Rating, State};
pub use review_log::ReviewLog;
