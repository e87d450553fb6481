//! User-score comparison against the historical series, plus derived
//! alerts. Everything here is computed fresh from the raw records.

use super::{DrawRecord, TrendDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceLevel {
    High,
    Medium,
    Low,
}

/// Qualification outlook for one draw category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryChance {
    pub category: String,
    pub draws: usize,
    pub average_cutoff: f64,
    pub chance: ChanceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComparison {
    pub user_score: u16,
    pub total_draws: usize,
    pub draws_cleared: usize,
    /// Share of historical draws the score would have cleared, 0-100.
    pub percentile: u8,
    /// Average points short of the draws the score missed; 0 when none.
    pub average_gap_to_missed: f64,
    pub categories: Vec<CategoryChance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Opportunity,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawAlert {
    pub kind: AlertKind,
    pub message: String,
}

/// A score within this many points of a cutoff counts as "close".
const CLOSE_GAP: f64 = 20.0;

fn chance_for(score: u16, average_cutoff: f64) -> ChanceLevel {
    let gap = average_cutoff - score as f64;
    if gap <= 0.0 {
        ChanceLevel::High
    } else if gap <= CLOSE_GAP {
        ChanceLevel::Medium
    } else {
        ChanceLevel::Low
    }
}

/// Positions a user's score against the historical series.
pub fn compare_user_score(score: u16, draws: &[DrawRecord]) -> ScoreComparison {
    let total_draws = draws.len();
    let draws_cleared = draws
        .iter()
        .filter(|draw| score >= draw.crs_minimum)
        .count();

    let percentile = if total_draws == 0 {
        0
    } else {
        ((draws_cleared as f64 / total_draws as f64) * 100.0).round() as u8
    };

    let missed_gaps: Vec<f64> = draws
        .iter()
        .filter(|draw| score < draw.crs_minimum)
        .map(|draw| (draw.crs_minimum - score) as f64)
        .collect();
    let average_gap_to_missed = if missed_gaps.is_empty() {
        0.0
    } else {
        missed_gaps.iter().sum::<f64>() / missed_gaps.len() as f64
    };

    // BTreeMap keeps category ordering deterministic.
    let mut by_category: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for draw in draws {
        let entry = by_category.entry(draw.category.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += draw.crs_minimum as f64;
    }

    let categories = by_category
        .into_iter()
        .map(|(category, (count, sum))| {
            let average_cutoff = sum / count as f64;
            CategoryChance {
                category: category.to_string(),
                draws: count,
                average_cutoff,
                chance: chance_for(score, average_cutoff),
            }
        })
        .collect();

    ScoreComparison {
        user_score: score,
        total_draws,
        draws_cleared,
        percentile,
        average_gap_to_missed,
        categories,
    }
}

/// Emits a small prioritized list of opportunity/warning/info messages.
pub fn generate_draw_alerts(score: u16, draws: &[DrawRecord]) -> Vec<DrawAlert> {
    if draws.is_empty() {
        return vec![DrawAlert {
            kind: AlertKind::Info,
            message: "No draw history is available yet; check back once rounds are published"
                .to_string(),
        }];
    }

    let analysis = super::analyze_draw_history(draws);
    let recent: Vec<u16> = draws
        .iter()
        .take(5)
        .map(|draw| draw.crs_minimum)
        .collect();
    let recent_avg = recent.iter().map(|&value| value as f64).sum::<f64>() / recent.len() as f64;

    let mut alerts = Vec::new();

    if (score as f64) >= recent_avg {
        alerts.push(DrawAlert {
            kind: AlertKind::Opportunity,
            message: format!(
                "Your score of {score} already clears the recent average cutoff of {:.0}",
                recent_avg
            ),
        });
    } else {
        let gap = (recent_avg - score as f64).ceil() as u16;
        if gap as f64 <= CLOSE_GAP {
            alerts.push(DrawAlert {
                kind: AlertKind::Info,
                message: format!(
                    "You're close: {gap} points away from the recent average cutoff of {:.0}",
                    recent_avg
                ),
            });
        } else {
            alerts.push(DrawAlert {
                kind: AlertKind::Warning,
                message: format!(
                    "Your score trails recent cutoffs by {gap} points; focus on the largest point gaps first"
                ),
            });
        }
    }

    if analysis.trend == TrendDirection::Rising {
        alerts.push(DrawAlert {
            kind: AlertKind::Warning,
            message: "Cutoffs are trending upward across recent rounds".to_string(),
        });
    } else if analysis.trend == TrendDirection::Falling {
        alerts.push(DrawAlert {
            kind: AlertKind::Opportunity,
            message: "Cutoffs are trending downward; upcoming rounds may be within reach"
                .to_string(),
        });
    }

    if score >= analysis.minimum_cutoff && score < analysis.maximum_cutoff {
        alerts.push(DrawAlert {
            kind: AlertKind::Info,
            message: format!(
                "Historical cutoffs ranged {}-{}; your score clears part of that range",
                analysis.minimum_cutoff, analysis.maximum_cutoff
            ),
        });
    }

    // Opportunities first, then warnings, then info.
    alerts.sort_by_key(|alert| alert.kind);
    alerts
}
