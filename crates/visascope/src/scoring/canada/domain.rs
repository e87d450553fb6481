use crate::scoring::language::ClbScores;
use serde::{Deserialize, Serialize};

/// Credential levels recognized by the Comprehensive Ranking System.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    OneYear,
    TwoYear,
    Bachelor,
    TwoOrMore,
    Master,
    Phd,
}

/// Arranged-employment tiers. Senior offers (TEER 0 major group 00) carry
/// the larger bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOfferTier {
    Senior,
    Skilled,
}

/// Length of a credential earned at a Canadian institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanadianCredentialLength {
    OneOrTwoYear,
    ThreeYearOrLonger,
}

/// Bonus flags evaluated in the additional-points section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalQualifications {
    #[serde(default)]
    pub provincial_nomination: bool,
    #[serde(default)]
    pub job_offer: Option<JobOfferTier>,
    #[serde(default)]
    pub canadian_credential: Option<CanadianCredentialLength>,
    #[serde(default)]
    pub sibling_in_canada: bool,
    #[serde(default)]
    pub certificate_of_qualification: bool,
}

/// Accompanying spouse or common-law partner. Every field is optional;
/// missing data contributes zero points rather than erroring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseProfile {
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub language: Option<ClbScores>,
    #[serde(default)]
    pub canadian_experience_years: u8,
}

/// Normalized applicant snapshot consumed by the CRS scorer. Language
/// scores arrive already converted to CLB by [`crate::scoring::language`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanadaProfile {
    pub age: u8,
    pub education: EducationLevel,
    pub first_language: ClbScores,
    #[serde(default)]
    pub second_language: Option<ClbScores>,
    /// Which official language the first test covers. Drives the
    /// French-language bonus.
    #[serde(default)]
    pub first_language_is_french: bool,
    #[serde(default)]
    pub canadian_experience_years: u8,
    #[serde(default)]
    pub foreign_experience_years: u8,
    #[serde(default)]
    pub spouse: Option<SpouseProfile>,
    #[serde(default)]
    pub additional: AdditionalQualifications,
}

impl CanadaProfile {
    pub fn has_spouse(&self) -> bool {
        self.spouse.is_some()
    }

    /// French-side CLB scores, if the applicant declared any.
    pub fn french_scores(&self) -> Option<&ClbScores> {
        if self.first_language_is_french {
            Some(&self.first_language)
        } else {
            self.second_language.as_ref()
        }
    }

    /// English-side CLB scores, if the applicant declared any.
    pub fn english_scores(&self) -> Option<&ClbScores> {
        if self.first_language_is_french {
            self.second_language.as_ref()
        } else {
            Some(&self.first_language)
        }
    }
}

/// Factors that can contribute to a CRS score, used to label audit rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrsFactor {
    Age,
    Education,
    FirstLanguage,
    SecondLanguage,
    CanadianExperience,
    SpouseEducation,
    SpouseLanguage,
    SpouseExperience,
    EducationLanguage,
    EducationCanadianExperience,
    ForeignExperienceLanguage,
    ForeignCanadianExperience,
    CertificateOfQualification,
    ProvincialNomination,
    JobOffer,
    CanadianEducation,
    FrenchBonus,
    SiblingInCanada,
}

/// Discrete contribution to a CRS total, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: CrsFactor,
    pub points: u16,
    pub notes: String,
}

/// Named section sub-totals. `total` always equals their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrsBreakdown {
    pub core_human_capital: u16,
    pub spouse_factors: u16,
    pub skill_transferability: u16,
    pub additional_points: u16,
}

impl CrsBreakdown {
    pub fn sum(&self) -> u16 {
        self.core_human_capital
            + self.spouse_factors
            + self.skill_transferability
            + self.additional_points
    }
}

/// CRS output describing the composite score and its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsScore {
    pub total: u16,
    pub breakdown: CrsBreakdown,
    pub components: Vec<ScoreComponent>,
}
