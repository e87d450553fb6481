use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaType {
    D2,
    D7,
    D8,
}

impl VisaType {
    pub const fn label(self) -> &'static str {
        match self {
            VisaType::D2 => "D2 entrepreneur visa",
            VisaType::D7 => "D7 passive income visa",
            VisaType::D8 => "D8 digital nomad visa",
        }
    }
}

/// Business activity details supplied by D2 candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessPlan {
    #[serde(default)]
    pub written_plan: bool,
    #[serde(default)]
    pub investment_eur: u32,
    #[serde(default)]
    pub sector_experience_years: u8,
}

/// Applicant snapshot for the Portuguese visa checkers. Amounts are monthly
/// euros unless noted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortugalProfile {
    #[serde(default)]
    pub monthly_income_eur: u32,
    #[serde(default)]
    pub passive_income_eur: u32,
    #[serde(default)]
    pub savings_eur: u32,
    #[serde(default)]
    pub remote_worker: bool,
    #[serde(default)]
    pub employer_country: Option<String>,
    #[serde(default)]
    pub business: Option<BusinessPlan>,
    #[serde(default)]
    pub adult_dependents: u8,
    #[serde(default)]
    pub child_dependents: u8,
    #[serde(default)]
    pub has_accommodation: bool,
    #[serde(default)]
    pub has_health_insurance: bool,
    /// Hard disqualifier when false, regardless of score.
    #[serde(default = "default_true")]
    pub clean_criminal_record: bool,
}

fn default_true() -> bool {
    true
}

impl PortugalProfile {
    pub fn employer_outside_portugal(&self) -> bool {
        self.employer_country
            .as_deref()
            .map(|country| !country.trim().eq_ignore_ascii_case("portugal"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    LikelyEligible,
    NeedsMoreInfo,
    NotEligible,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::LikelyEligible => "likely_eligible",
            EligibilityStatus::NeedsMoreInfo => "needs_more_info",
            EligibilityStatus::NotEligible => "not_eligible",
        }
    }
}

/// One evaluated requirement row. `hard` rows gate the visa outright and
/// drive the matcher's tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementCheck {
    pub category: &'static str,
    pub met: bool,
    pub hard: bool,
    pub weight: u8,
    pub details: String,
}

/// Outcome of a single visa checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub visa: VisaType,
    pub status: EligibilityStatus,
    /// Weighted fraction of satisfied rules, 0-100.
    pub score: u8,
    pub requirements: Vec<RequirementCheck>,
    pub missing_requirements: Vec<String>,
    pub recommendations: Vec<String>,
}

impl EligibilityResult {
    pub fn unmet_hard_requirements(&self) -> usize {
        self.requirements
            .iter()
            .filter(|check| check.hard && !check.met)
            .count()
    }
}
