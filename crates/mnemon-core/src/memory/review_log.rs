//! ReviewLog - Immutable record of a single scheduling decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::{Rating, State};

/// One line of review history, emitted alongside every candidate card.
///
/// The log captures the card as it was graded: `state` is the lifecycle state
/// *before* the transition, and `elapsed_days` is the gap the card had
/// accumulated when the review happened. Hosts that keep these records can
/// replay or audit a card's full scheduling history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
    /// The grade the reviewer gave.
    pub rating: Rating,
    /// Days until the next due instant chosen by this scheduling.
    pub scheduled_days: i64,
    /// Whole days since the previous review at the moment of grading.
    pub elapsed_days: i64,
    /// The review instant supplied by the host.
    pub review: DateTime<Utc>,
    /// Lifecycle state before the transition was applied.
    pub state: State,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round_trip() {
        let log = ReviewLog {
            rating: Rating::Hard,
            scheduled_days: 14,
            elapsed_days: 10,
            review: Utc.timestamp_opt(864_000, 0).unwrap(),
            state: State::Review,
        };
        let json = serde_json::to_string(&log).unwrap();
        let back: ReviewLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_wire_encoding_uses_integers() {
        let log = ReviewLog {
            rating: Rating::Again,
            scheduled_days: 0,
            elapsed_days: 0,
            review: Utc.timestamp_opt(0, 0).unwrap(),
            state: State::Learning,
        };
        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["rating"], serde_json::json!(1));
        assert_eq!(value["state"], serde_json::json!(1));
        assert_eq!(value["scheduledDays"], serde_json::json!(0));
    }
}
