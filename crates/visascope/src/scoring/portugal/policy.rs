//! Tunable policy values for the Portuguese checkers. Scoring math never
//! hard-codes these; callers may override any of them.

use super::domain::EligibilityStatus;
use serde::{Deserialize, Serialize};

/// Status thresholds as a single named table so they can be retuned without
/// touching the scoring math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPolicy {
    pub eligible_at: u8,
    pub likely_eligible_at: u8,
    pub needs_more_info_at: u8,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            eligible_at: 80,
            likely_eligible_at: 60,
            needs_more_info_at: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortugalPolicy {
    /// National minimum wage, the baseline for income requirements.
    pub minimum_wage_eur: u32,
    /// D8 requires this multiple of the minimum wage.
    pub d8_income_multiplier: u32,
    /// Recommended share-capital floor for a credible D2 application.
    pub d2_minimum_investment_eur: u32,
    /// Months of the D7 income requirement expected as savings.
    pub d7_savings_months: u32,
    pub status: StatusPolicy,
}

impl Default for PortugalPolicy {
    fn default() -> Self {
        Self {
            minimum_wage_eur: 820,
            d8_income_multiplier: 4,
            d2_minimum_investment_eur: 5_000,
            d7_savings_months: 12,
            status: StatusPolicy::default(),
        }
    }
}

impl PortugalPolicy {
    /// D7 monthly income requirement: the wage baseline plus 50% per adult
    /// dependent and 30% per child, rounded to the nearest euro.
    pub fn d7_required_income(&self, adult_dependents: u8, child_dependents: u8) -> u32 {
        let base = self.minimum_wage_eur as f64;
        let required = base
            + base * 0.5 * adult_dependents as f64
            + base * 0.3 * child_dependents as f64;
        required.round() as u32
    }

    pub fn d8_required_income(&self) -> u32 {
        self.minimum_wage_eur * self.d8_income_multiplier
    }
}

/// Status is a pure function of the score and the hard-disqualifier flag.
pub(crate) fn status_for(score: u8, disqualified: bool, policy: &StatusPolicy) -> EligibilityStatus {
    if disqualified {
        return EligibilityStatus::NotEligible;
    }
    if score >= policy.eligible_at {
        EligibilityStatus::Eligible
    } else if score >= policy.likely_eligible_at {
        EligibilityStatus::LikelyEligible
    } else if score >= policy.needs_more_info_at {
        EligibilityStatus::NeedsMoreInfo
    } else {
        EligibilityStatus::NotEligible
    }
}
