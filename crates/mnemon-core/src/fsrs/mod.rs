//! FSRS (Free Spaced Repetition Scheduler) Module
//!
//! The two-component memory model and the scheduling engine built on it.
//!
//! Reference: https://github.com/open-spaced-repetition/fsrs4anki
//!
//! ## Core formulas
//! - Retrievability: `R = (1 + FACTOR * t / S)^DECAY`, with `R(S, S) = 0.9`
//! - Interval: `t = S / FACTOR * (r^(1/DECAY) - 1)` for target retention `r`
//!
//! `algorithm` holds the pure weight-driven arithmetic; `scheduler` couples
//! it to the four-state review lifecycle.

pub mod algorithm;
mod parameters;
mod scheduler;

pub use algorithm::{
    initial_difficulty, initial_stability, next_difficulty, next_forget_stability, next_interval,
    next_recall_stability, retrievability, DECAY, DEFAULT_WEIGHTS, FACTOR,
};

pub use parameters::{
    FSRSParameters, ParameterError, DEFAULT_MAXIMUM_INTERVAL, DEFAULT_REQUEST_RETENTION,
    WEIGHT_COUNT,
};

pub use scheduler::{FSRSScheduler, PreviewResults, ReviewResult};
