//! Draw intelligence: trend analysis, cutoff prediction, and user-score
//! comparison over historical Express Entry invitation rounds.
//!
//! Draw histories are read-only snapshots, assumed newest-first. The
//! functions rely only on aggregates and "most recent N" slices, so an
//! unsorted input degrades the estimate but never panics; analyses are
//! recomputed on every call and never cached as authoritative state.

mod comparison;
pub mod import;

pub use comparison::{
    compare_user_score, generate_draw_alerts, AlertKind, CategoryChance, ChanceLevel, DrawAlert,
    ScoreComparison,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical invitation round. Never derived, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub draw_date: NaiveDate,
    pub crs_minimum: u16,
    pub invitations_issued: u32,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
    Unknown,
}

/// Aggregate view over a draw history, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawAnalysis {
    pub sample_size: usize,
    pub minimum_cutoff: u16,
    pub maximum_cutoff: u16,
    pub average_cutoff: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Extrapolated next cutoff with an explicit uncertainty band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawPrediction {
    pub predicted_cutoff: u16,
    /// Half-width of the expected range (± points).
    pub margin: u16,
    pub confidence: Confidence,
    pub trend: TrendDirection,
    pub sample_size: usize,
}

/// Trend comparisons ignore swings inside this band.
const STABILITY_BAND: f64 = 2.0;
/// Predictions draw on at most this many recent rounds.
const RECENT_WINDOW: usize = 6;
const TREND_NUDGE: f64 = 2.0;

fn mean(values: impl Iterator<Item = u16>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value as f64;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn std_deviation(values: &[u16]) -> f64 {
    let Some(avg) = mean(values.iter().copied()) else {
        return 0.0;
    };
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|&value| {
            let diff = value as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Trend via a three-way split: the mean of the most-recent third is
/// compared against the mean of the earliest third. More robust to a single
/// outlier draw than a two-point delta.
fn trend_of(draws: &[DrawRecord]) -> TrendDirection {
    if draws.len() < 3 {
        return TrendDirection::Unknown;
    }

    let third = draws.len() / 3;
    let recent = mean(draws[..third].iter().map(|draw| draw.crs_minimum));
    let earliest = mean(
        draws[draws.len() - third..]
            .iter()
            .map(|draw| draw.crs_minimum),
    );

    match (recent, earliest) {
        (Some(recent), Some(earliest)) => {
            let delta = recent - earliest;
            if delta > STABILITY_BAND {
                TrendDirection::Rising
            } else if delta < -STABILITY_BAND {
                TrendDirection::Falling
            } else {
                TrendDirection::Stable
            }
        }
        _ => TrendDirection::Unknown,
    }
}

/// Computes min/avg/max cutoffs and the trend direction.
///
/// An empty history yields zeroed aggregates and an `Unknown` trend rather
/// than an error.
pub fn analyze_draw_history(draws: &[DrawRecord]) -> DrawAnalysis {
    if draws.is_empty() {
        return DrawAnalysis {
            sample_size: 0,
            minimum_cutoff: 0,
            maximum_cutoff: 0,
            average_cutoff: 0.0,
            trend: TrendDirection::Unknown,
        };
    }

    let minimum = draws.iter().map(|draw| draw.crs_minimum).min().unwrap_or(0);
    let maximum = draws.iter().map(|draw| draw.crs_minimum).max().unwrap_or(0);
    let average = mean(draws.iter().map(|draw| draw.crs_minimum)).unwrap_or(0.0);

    DrawAnalysis {
        sample_size: draws.len(),
        minimum_cutoff: minimum,
        maximum_cutoff: maximum,
        average_cutoff: average,
        trend: trend_of(draws),
    }
}

/// Extrapolates the next cutoff: recent average nudged by the trend, with a
/// margin from the recent standard deviation and a confidence label tied to
/// sample size and variance. Never panics on an empty history.
pub fn predict_next_draw(draws: &[DrawRecord]) -> DrawPrediction {
    if draws.is_empty() {
        return DrawPrediction {
            predicted_cutoff: 0,
            margin: 0,
            confidence: Confidence::Low,
            trend: TrendDirection::Unknown,
            sample_size: 0,
        };
    }

    let recent: Vec<u16> = draws
        .iter()
        .take(RECENT_WINDOW)
        .map(|draw| draw.crs_minimum)
        .collect();
    let recent_avg = mean(recent.iter().copied()).unwrap_or(0.0);
    let deviation = std_deviation(&recent);
    let trend = trend_of(draws);

    let nudge = match trend {
        TrendDirection::Rising => TREND_NUDGE,
        TrendDirection::Falling => -TREND_NUDGE,
        TrendDirection::Stable | TrendDirection::Unknown => 0.0,
    };

    let predicted = (recent_avg + nudge).round().max(0.0) as u16;
    let margin = deviation.round().max(5.0) as u16;

    let confidence = if draws.len() < 3 {
        Confidence::Low
    } else if draws.len() >= 8 && deviation <= 12.0 {
        Confidence::High
    } else {
        Confidence::Medium
    };

    DrawPrediction {
        predicted_cutoff: predicted,
        margin,
        confidence,
        trend,
        sample_size: draws.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn draw(days_ago: u32, cutoff: u16) -> DrawRecord {
        let base = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        DrawRecord {
            draw_date: base - chrono::Duration::days(days_ago as i64),
            crs_minimum: cutoff,
            invitations_issued: 3_000,
            category: "general".to_string(),
        }
    }

    #[test]
    fn empty_history_yields_zeroed_analysis() {
        let analysis = analyze_draw_history(&[]);
        assert_eq!(analysis.sample_size, 0);
        assert_eq!(analysis.minimum_cutoff, 0);
        assert_eq!(analysis.trend, TrendDirection::Unknown);
    }

    #[test]
    fn analysis_reports_min_avg_max() {
        let draws = vec![draw(0, 540), draw(14, 525), draw(28, 510)];
        let analysis = analyze_draw_history(&draws);
        assert_eq!(analysis.minimum_cutoff, 510);
        assert_eq!(analysis.maximum_cutoff, 540);
        assert!((analysis.average_cutoff - 525.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rising_series_reports_a_rising_trend() {
        let draws: Vec<DrawRecord> = (0..9)
            .map(|i| draw(i as u32 * 14, 540 - i as u16 * 5))
            .collect();
        assert_eq!(analyze_draw_history(&draws).trend, TrendDirection::Rising);
    }

    #[test]
    fn single_outlier_does_not_flip_a_flat_trend() {
        // Flat at 520 except one spike in the middle third.
        let mut draws: Vec<DrawRecord> =
            (0..9).map(|i| draw(i as u32 * 14, 520)).collect();
        draws[4].crs_minimum = 600;
        assert_eq!(analyze_draw_history(&draws).trend, TrendDirection::Stable);
    }

    #[test]
    fn prediction_on_empty_history_is_neutral_and_low_confidence() {
        let prediction = predict_next_draw(&[]);
        assert_eq!(prediction.predicted_cutoff, 0);
        assert_eq!(prediction.margin, 0);
        assert_eq!(prediction.confidence, Confidence::Low);
    }

    #[test]
    fn fewer_than_three_draws_degrades_confidence_to_low() {
        let prediction = predict_next_draw(&[draw(0, 530), draw(14, 525)]);
        assert_eq!(prediction.confidence, Confidence::Low);
        assert!(prediction.predicted_cutoff > 0);
    }

    #[test]
    fn stable_low_variance_history_earns_high_confidence() {
        let draws: Vec<DrawRecord> = (0..10).map(|i| draw(i as u32 * 14, 522)).collect();
        let prediction = predict_next_draw(&draws);
        assert_eq!(prediction.confidence, Confidence::High);
        assert_eq!(prediction.predicted_cutoff, 522);
        assert_eq!(prediction.margin, 5);
    }

    #[test]
    fn rising_trend_nudges_the_prediction_upward() {
        let flat: Vec<DrawRecord> = (0..9).map(|i| draw(i as u32 * 14, 520)).collect();
        let rising: Vec<DrawRecord> = (0..9)
            .map(|i| draw(i as u32 * 14, 560 - i as u16 * 10))
            .collect();
        let flat_prediction = predict_next_draw(&flat);
        let rising_prediction = predict_next_draw(&rising);
        assert_eq!(rising_prediction.trend, TrendDirection::Rising);
        assert!(rising_prediction.predicted_cutoff > flat_prediction.predicted_cutoff);
    }
}
