//! The scheduling engine.
//!
//! One-shot and pure: `schedule` takes a card plus the host-supplied review
//! instant and returns the four candidate next-cards, one per rating, each
//! paired with a review-log record. The input card is never mutated; the host
//! picks one candidate and persists it.
//!
//! State transitions, interval ordering, and the short-term retry offsets all
//! live in the single dispatch on the card's pre-review state below. The
//! memory arithmetic itself is in [`super::algorithm`].

use chrono::{DateTime, Duration, Utc};

use super::algorithm;
use super::parameters::{FSRSParameters, ParameterError};
use crate::memory::{Card, Rating, ReviewLog, State};

// ============================================================================
// OUTCOME TYPES
// ============================================================================

/// One candidate outcome: the next-card for a rating plus its log record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    /// The card as it would be persisted if the host picks this rating.
    pub card: Card,
    /// The history record for this scheduling decision.
    pub log: ReviewLog,
}

/// The four candidate outcomes of a single scheduling call.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewResults {
    pub again: ReviewResult,
    pub hard: ReviewResult,
    pub good: ReviewResult,
    pub easy: ReviewResult,
}

impl PreviewResults {
    /// Borrow the outcome for a rating.
    pub fn get(&self, rating: Rating) -> &ReviewResult {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }

    /// Move out the outcome for a rating, discarding the other three.
    pub fn into_result(self, rating: Rating) -> ReviewResult {
        match rating {
            Rating::Again => self.again,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
        }
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Deterministic FSRS scheduler.
///
/// Construction validates the parameter set once; after that every call is a
/// pure function of `(parameters, card, now)`. The scheduler holds no other
/// state, so sharing one instance across threads is safe.
#[derive(Debug, Clone)]
pub struct FSRSScheduler {
    params: FSRSParameters,
}

impl Default for FSRSScheduler {
    fn default() -> Self {
        Self {
            params: FSRSParameters::default(),
        }
    }
}

impl FSRSScheduler {
    /// Build a scheduler, rejecting invalid configuration.
    pub fn new(params: FSRSParameters) -> Result<Self, ParameterError> {
        params.validate()?;
        tracing::debug!(
            request_retention = params.request_retention,
            maximum_interval = params.maximum_interval,
            "scheduler configured"
        );
        Ok(Self { params })
    }

    /// The validated configuration this scheduler runs with.
    pub fn parameters(&self) -> &FSRSParameters {
        &self.params
    }

    /// Produce the four candidate next-cards for a review happening at `now`.
    ///
    /// `now` must not precede `card.last_review`; all instants are UTC by
    /// type. The input card is only read.
    pub fn schedule(&self, card: &Card, now: DateTime<Utc>) -> PreviewResults {
        card.debug_assert_invariants();
        let p = &self.params;

        // Prepare the working copy shared by all four candidates.
        let mut current = card.clone();
        current.elapsed_days = match (current.state, current.last_review) {
            (State::New, _) | (_, None) => 0,
            (_, Some(last)) => whole_days_between(now, last),
        };
        current.last_review = Some(now);
        current.reps += 1;

        tracing::trace!(
            state = %card.state,
            elapsed_days = current.elapsed_days,
            "computing candidate schedules"
        );

        let mut again = current.clone();
        let mut hard = current.clone();
        let mut good = current.clone();
        let mut easy = current.clone();

        match card.state {
            State::New => {
                for (candidate, rating) in [
                    (&mut again, Rating::Again),
                    (&mut hard, Rating::Hard),
                    (&mut good, Rating::Good),
                    (&mut easy, Rating::Easy),
                ] {
                    candidate.difficulty = algorithm::initial_difficulty(&p.w, rating);
                    candidate.stability = algorithm::initial_stability(&p.w, rating);
                }
                again.state = State::Learning;
                hard.state = State::Learning;
                good.state = State::Learning;
                easy.state = State::Review;

                // First-review retries are sub-day; only easy graduates
                // straight to a day-scale interval.
                again.scheduled_days = 0;
                again.due = now + Duration::minutes(1);
                hard.scheduled_days = 0;
                hard.due = now + Duration::minutes(5);
                good.scheduled_days = 0;
                good.due = now + Duration::minutes(10);
                let easy_interval =
                    algorithm::next_interval(easy.stability, p.request_retention, p.maximum_interval);
                easy.scheduled_days = easy_interval;
                easy.due = now + Duration::days(easy_interval);
            }
            State::Learning | State::Relearning => {
                // Stability and difficulty keep the values assigned when the
                // card left the new state; short-term work only re-derives
                // intervals.
                good.state = State::Review;
                easy.state = State::Review;

                let good_interval =
                    algorithm::next_interval(good.stability, p.request_retention, p.maximum_interval);
                let easy_interval =
                    algorithm::next_interval(easy.stability, p.request_retention, p.maximum_interval)
                        .max(good_interval + 1)
                        .min(p.maximum_interval);
                finalize_intervals(
                    [&mut again, &mut hard, &mut good, &mut easy],
                    0,
                    good_interval,
                    easy_interval,
                    now,
                );
            }
            State::Review => {
                let r = algorithm::retrievability(current.elapsed_days as f64, current.stability);
                for (candidate, rating) in [
                    (&mut again, Rating::Again),
                    (&mut hard, Rating::Hard),
                    (&mut good, Rating::Good),
                    (&mut easy, Rating::Easy),
                ] {
                    candidate.difficulty =
                        algorithm::next_difficulty(&p.w, current.difficulty, rating);
                    candidate.stability = if rating == Rating::Again {
                        algorithm::next_forget_stability(
                            &p.w,
                            current.difficulty,
                            current.stability,
                            r,
                        )
                    } else {
                        algorithm::next_recall_stability(
                            &p.w,
                            current.difficulty,
                            current.stability,
                            r,
                            rating,
                        )
                    };
                    candidate.retrievability = Some(r);
                }
                again.state = State::Relearning;
                again.lapses += 1;

                // Keep the day-scale candidates strictly ordered:
                // hard <= good < easy.
                let hard_by_stability =
                    algorithm::next_interval(hard.stability, p.request_retention, p.maximum_interval);
                let good_by_stability =
                    algorithm::next_interval(good.stability, p.request_retention, p.maximum_interval);
                let hard_interval = hard_by_stability.min(good_by_stability);
                let good_interval = good_by_stability
                    .max(hard_interval + 1)
                    .min(p.maximum_interval);
                let easy_interval =
                    algorithm::next_interval(easy.stability, p.request_retention, p.maximum_interval)
                        .max(good_interval + 1)
                        .min(p.maximum_interval);
                finalize_intervals(
                    [&mut again, &mut hard, &mut good, &mut easy],
                    hard_interval,
                    good_interval,
                    easy_interval,
                    now,
                );
            }
        }

        // Candidates must leave here structurally sound; degenerate weights
        // trip these in debug builds and propagate unchanged in release.
        for candidate in [&again, &hard, &good, &easy] {
            candidate.debug_assert_invariants();
        }

        let elapsed_days = current.elapsed_days;
        let log = |rating: Rating, candidate: &Card| ReviewLog {
            rating,
            scheduled_days: candidate.scheduled_days,
            elapsed_days,
            review: now,
            state: card.state,
        };

        PreviewResults {
            again: ReviewResult {
                log: log(Rating::Again, &again),
                card: again,
            },
            hard: ReviewResult {
                log: log(Rating::Hard, &hard),
                card: hard,
            },
            good: ReviewResult {
                log: log(Rating::Good, &good),
                card: good,
            },
            easy: ReviewResult {
                log: log(Rating::Easy, &easy),
                card: easy,
            },
        }
    }

    /// Schedule and keep only the outcome for the rating actually given.
    pub fn review(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> ReviewResult {
        self.schedule(card, now).into_result(rating)
    }

    /// Host-facing recall-probability projection.
    ///
    /// Anchored at the card's `due` instant with an exponential half-life of
    /// one stability: a card queried right when due reads 1.0, one stability
    /// past due reads 0.5. Queries a whole day or more before `due` sit above
    /// 1.0; the projection is a ranking signal, not the scheduling curve.
    pub fn retrievability_of(&self, card: &Card, now: DateTime<Utc>) -> f64 {
        if card.state == State::New || card.stability <= 0.0 {
            return 0.0;
        }
        let overdue_days = if now >= card.due {
            whole_days_between(now, card.due)
        } else {
            -whole_days_between(card.due, now)
        };
        2f64.powf(-(overdue_days as f64) / card.stability)
    }
}

/// Whole days between two instants, truncated from the absolute difference.
#[inline]
fn whole_days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_days().abs()
}

/// Common interval finalization for cards already out of the new state.
///
/// Candidates arrive ordered again/hard/good/easy. Again always retries in
/// five minutes; hard falls back to a ten-minute retry when its day interval
/// collapsed to zero.
fn finalize_intervals(
    [again, hard, good, easy]: [&mut Card; 4],
    hard_interval: i64,
    good_interval: i64,
    easy_interval: i64,
    now: DateTime<Utc>,
) {
    again.scheduled_days = 0;
    again.due = now + Duration::minutes(5);

    hard.scheduled_days = hard_interval;
    hard.due = if hard_interval > 0 {
        now + Duration::days(hard_interval)
    } else {
        now + Duration::minutes(10)
    };

    good.scheduled_days = good_interval;
    good.due = now + Duration::days(good_interval);

    easy.scheduled_days = easy_interval;
    easy.due = now + Duration::days(easy_interval);
}

// ============================================================================
// TESTS
// ============================================================================
