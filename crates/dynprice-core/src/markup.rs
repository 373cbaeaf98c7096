//! # Markup Table
//!
//! Maps a demand score to the base markup fraction added on top of cost.
//!
//! ```text
//! demand score │  1    2    3    4    5    6    7    8    9    10  │ other
//! ─────────────┼──────────────────────────────────────────────────┼──────
//! markup       │ .15  .18  .20  .25  .30  .35  .42  .50  .60  .75 │  .30
//! ```

use tracing::debug;

/// Markup used for demand scores outside 1..=10.
pub const DEFAULT_MARKUP: f64 = 0.30;

/// Returns the base markup fraction for a demand score.
///
/// Out-of-range scores are not an error; they take [`DEFAULT_MARKUP`].
pub fn base_markup(demand_score: i32) -> f64 {
    match demand_score {
        1 => 0.15,
        2 => 0.18,
        3 => 0.20,
        4 => 0.25,
        5 => 0.30,
        6 => 0.35,
        7 => 0.42,
        8 => 0.50,
        9 => 0.60,
        10 => 0.75,
        other => {
            debug!(demand_score = other, "Demand score outside markup table, using default markup");
            DEFAULT_MARKUP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let expected = [0.15, 0.18, 0.20, 0.25, 0.30, 0.35, 0.42, 0.50, 0.60, 0.75];
        for (score, markup) in (1..=10).zip(expected) {
            assert_eq!(base_markup(score), markup, "demand score {score}");
        }
    }

    #[test]
    fn test_out_of_range_scores_use_default() {
        for score in [0, -1, 11, 42, i32::MIN, i32::MAX] {
            assert_eq!(base_markup(score), DEFAULT_MARKUP, "demand score {score}");
        }
    }
}
