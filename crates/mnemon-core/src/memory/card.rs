//! Card - The durable memory record for one flashcard
//!
//! A card carries everything the scheduler needs between reviews:
//! - DSR scalars (stability, difficulty, last computed retrievability)
//! - Lifecycle state (new, learning, review, relearning)
//! - Counters and scheduling timestamps
//!
//! Cards are plain value holders. The scheduling engine never mutates one in
//! place: every review produces fresh candidate cards and the host decides
//! which one to persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// LIFECYCLE STATE
// ============================================================================

/// Position of a card in the review lifecycle.
///
/// Serialized as the stable wire integers 0..3 so hosts can persist cards
/// in any store without knowing the variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum State {
    /// Created by the host, never reviewed.
    #[default]
    New = 0,
    /// In short-term acquisition after the first review.
    Learning = 1,
    /// Graduated; scheduled on day-scale intervals.
    Review = 2,
    /// Lapsed out of review; in short-term reacquisition.
    Relearning = 3,
}

impl State {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::New => "new",
            State::Learning => "learning",
            State::Review => "review",
            State::Relearning => "relearning",
        }
    }

    /// Parse from the wire integer 0..3.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(State::New),
            1 => Some(State::Learning),
            2 => Some(State::Review),
            3 => Some(State::Relearning),
            _ => None,
        }
    }

    /// True for the short-term acquisition states.
    #[inline]
    pub fn is_short_term(&self) -> bool {
        matches!(self, State::Learning | State::Relearning)
    }
}

impl From<State> for u8 {
    fn from(state: State) -> Self {
        state as u8
    }
}

impl TryFrom<u8> for State {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        State::from_i32(value as i32).ok_or_else(|| format!("invalid card state: {value}"))
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// REVIEW RATING
// ============================================================================

/// The reviewer's verdict on a single recall attempt.
///
/// Serialized as the stable wire integers 1..4:
/// 1 = Again (forgot), 2 = Hard, 3 = Good, 4 = Easy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Rating {
    /// Complete failure to recall.
    Again = 1,
    /// Successful but strained recall.
    Hard = 2,
    /// Normal successful recall.
    Good = 3,
    /// Effortless recall.
    Easy = 4,
}

impl Rating {
    /// All ratings in wire order. Handy for iterating candidate outcomes.
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }

    /// Parse from the wire integer 1..4.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }

    /// The grade as the real number the memory formulas consume.
    #[inline]
    pub(crate) fn grade(self) -> f64 {
        self as u8 as f64
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating as u8
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::from_i32(value as i32).ok_or_else(|| format!("invalid rating: {value}"))
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CARD
// ============================================================================

/// The persistent per-card memory state.
///
/// Field semantics:
/// - `stability`: days for retrievability to decay to 90%. Zero iff never
///   reviewed.
/// - `difficulty`: intrinsic complexity on \[1, 10\]. Zero iff never reviewed.
/// - `elapsed_days` / `scheduled_days`: whole-day bookkeeping from the most
///   recent scheduling.
/// - `retrievability`: recall probability computed at the last review;
///   populated only once a card is scheduled out of the review state.
/// - `step`: index into the host's learning/relearning step list. Carried for
///   persistence fidelity; the engine does not consult it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// When the card is next scheduled to be reviewed.
    pub due: DateTime<Utc>,
    /// When the card was most recently reviewed. `None` iff never reviewed.
    pub last_review: Option<DateTime<Utc>>,
    /// Memory stability in days.
    pub stability: f64,
    /// Intrinsic difficulty (1.0 = easiest, 10.0 = hardest).
    pub difficulty: f64,
    /// Whole days between the previous review and the current one.
    pub elapsed_days: i64,
    /// Days from the last review instant to `due`.
    pub scheduled_days: i64,
    /// Count of reviews ever performed.
    pub reps: u32,
    /// Count of lapses (review -> relearning transitions).
    pub lapses: u32,
    /// Lifecycle state.
    pub state: State,
    /// Learning/relearning step index.
    pub step: u32,
    /// Recall probability at the last review instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrievability: Option<f64>,
}

impl Card {
    /// Create a fresh, never-reviewed card due at `now`.
    ///
    /// The engine never reads a clock; the host supplies every instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            due: now,
            last_review: None,
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0,
            scheduled_days: 0,
            reps: 0,
            lapses: 0,
            state: State::New,
            step: 0,
            retrievability: None,
        }
    }

    /// Check if this card is due at the supplied instant.
    #[inline]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= now
    }

    /// Assert the structural invariants in debug builds.
    ///
    /// A card violating these was corrupted outside the engine; release
    /// builds propagate the values unchanged.
    pub(crate) fn debug_assert_invariants(&self) {
        debug_assert!(self.stability >= 0.0 && self.stability.is_finite());
        debug_assert!(self.elapsed_days >= 0 && self.scheduled_days >= 0);
        match self.state {
            State::New => {
                debug_assert!(self.reps == 0 && self.lapses == 0);
                debug_assert!(self.stability == 0.0 && self.difficulty == 0.0);
                debug_assert!(self.last_review.is_none());
            }
            _ => {
                debug_assert!(self.last_review.is_some());
                debug_assert!(self.stability > 0.0);
                debug_assert!((1.0..=10.0).contains(&self.difficulty));
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(0, 0).unwrap()
    }

    #[test]
    fn test_new_card_defaults() {
        let now = epoch();
        let card = Card::new(now);
        assert_eq!(card.state, State::New);
        assert_eq!(card.due, now);
        assert!(card.last_review.is_none());
        assert_eq!(card.stability, 0.0);
        assert_eq!(card.difficulty, 0.0);
        assert_eq!(card.reps, 0);
        assert_eq!(card.lapses, 0);
        assert_eq!(card.step, 0);
        assert!(card.retrievability.is_none());
        assert!(card.is_due(now));
        card.debug_assert_invariants();
    }

    #[test]
    fn test_state_wire_values() {
        assert_eq!(u8::from(State::New), 0);
        assert_eq!(u8::from(State::Learning), 1);
        assert_eq!(u8::from(State::Review), 2);
        assert_eq!(u8::from(State::Relearning), 3);
        for value in 0..4 {
            let state = State::from_i32(value).unwrap();
            assert_eq!(u8::from(state) as i32, value);
        }
        assert!(State::from_i32(4).is_none());
        assert!(State::from_i32(-1).is_none());
    }

    #[test]
    fn test_rating_wire_values() {
        assert_eq!(u8::from(Rating::Again), 1);
        assert_eq!(u8::from(Rating::Hard), 2);
        assert_eq!(u8::from(Rating::Good), 3);
        assert_eq!(u8::from(Rating::Easy), 4);
        assert!(Rating::from_i32(0).is_none());
        assert!(Rating::from_i32(5).is_none());
        assert_eq!(Rating::ALL.len(), 4);
    }

    #[test]
    fn test_state_serializes_as_integer() {
        let json = serde_json::to_value(State::Review).unwrap();
        assert_eq!(json, serde_json::json!(2));
        let back: State = serde_json::from_value(serde_json::json!(3)).unwrap();
        assert_eq!(back, State::Relearning);
        assert!(serde_json::from_value::<State>(serde_json::json!(7)).is_err());
    }

    #[test]
    fn test_rating_serializes_as_integer() {
        let json = serde_json::to_value(Rating::Again).unwrap();
        assert_eq!(json, serde_json::json!(1));
        let back: Rating = serde_json::from_value(serde_json::json!(4)).unwrap();
        assert_eq!(back, Rating::Easy);
        assert!(serde_json::from_value::<Rating>(serde_json::json!(0)).is_err());
    }

    #[test]
    fn test_card_round_trip_preserves_fields() {
        let now = epoch();
        let card = Card {
            due: now + chrono::Duration::days(15),
            last_review: Some(now),
            stability: 14.172863459,
            difficulty: 5.1618,
            elapsed_days: 4,
            scheduled_days: 15,
            reps: 3,
            lapses: 1,
            state: State::Review,
            step: 0,
            retrievability: Some(0.8934995),
        };

        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
        // Floats must survive bit-exact, not just approximately.
        assert_eq!(back.stability.to_bits(), card.stability.to_bits());
        assert_eq!(
            back.retrievability.unwrap().to_bits(),
            card.retrievability.unwrap().to_bits()
        );
    }

    #[test]
    fn test_card_round_trip_without_optionals() {
        let card = Card::new(epoch());
        let json = serde_json::to_string(&card).unwrap();
        // Unset retrievability is omitted from the wire form entirely.
        assert!(!json.contains("retrievability"));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(State::Relearning.to_string(), "relearning");
        assert_eq!(Rating::Good.to_string(), "good");
    }
}
