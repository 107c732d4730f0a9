//! # Mnemon Core
//!
//! Deterministic FSRS scheduling engine: given one card and one review
//! instant, produce the four candidate next-states (Again / Hard / Good /
//! Easy) a reviewer could pick from.
//!
//! - **Memory model**: two components (stability, difficulty) plus derived
//!   retrievability, driven by 17 model weights
//! - **Lifecycle**: new -> learning -> review, with relearning on lapses
//! - **Purity**: no clock reads, no identifier generation, no persistence;
//!   the host supplies every instant and owns every card
//!
//! The numerics are plain IEEE-754 double arithmetic and reproduce the
//! published reference schedules to four decimal places, so cards scheduled
//! here stay compatible with other FSRS implementations.
//!
//! ## Quick Start
//!
//! ```rust
//! use mnemon_core::prelude::*;
//! use chrono::Utc;
//!
//! let scheduler = FSRSScheduler::default();
//! let now = Utc::now();
//! let card = Card::new(now);
//!
//! // Preview all four outcomes, then keep the one the reviewer chose.
//! let preview = scheduler.schedule(&card, now);
//! let chosen = preview.into_result(Rating::Good);
//! assert_eq!(chosen.card.reps, 1);
//! ```

// ============================================================================
// MODULES
// ============================================================================

pub mod fsrs;
pub mod memory;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Memory types
pub use memory::{Card, Rating, ReviewLog, State};

// FSRS algorithm and engine
pub use fsrs::{
    initial_difficulty,
    initial_stability,
    next_interval,
    // Core functions for advanced usage
    retrievability,
    FSRSParameters,
    FSRSScheduler,
    ParameterError,
    PreviewResults,
    ReviewResult,
    DEFAULT_WEIGHTS,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FSRS algorithm generation implemented here (4 = 17 parameters)
pub const FSRS_VERSION: u8 = 4;

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Card, FSRSParameters, FSRSScheduler, ParameterError, PreviewResults, Rating, ReviewLog,
        ReviewResult, State,
    };
}
