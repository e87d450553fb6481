//! Australian skilled-migration points test. An independent rule set that
//! shares only the lookup-table pattern with the CRS scorer: English carries
//! flat named tiers instead of per-ability sums, and partner circumstances
//! contribute a single flat bonus.

use crate::scoring::language::ClbScores;
use serde::{Deserialize, Serialize};

/// Minimum points total required to lodge an expression of interest.
pub const PASS_MARK: u16 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AustraliaQualification {
    None,
    DiplomaOrTrade,
    BachelorOrMaster,
    Doctorate,
}

/// Named English proficiency tiers, each worth a flat point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnglishTier {
    Competent,
    Proficient,
    Superior,
}

impl EnglishTier {
    /// Derived from the weakest ability on the normalized scale.
    pub fn from_clb(scores: &ClbScores) -> Self {
        match scores.minimum() {
            0..=6 => Self::Competent,
            7..=8 => Self::Proficient,
            _ => Self::Superior,
        }
    }

    pub const fn points(self) -> u16 {
        match self {
            Self::Competent => 0,
            Self::Proficient => 10,
            Self::Superior => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    /// Single, or partner is an Australian citizen/permanent resident.
    #[default]
    SingleOrCitizenPartner,
    SkilledPartner,
    CompetentEnglishPartner,
    Other,
}

impl PartnerStatus {
    const fn points(self) -> u16 {
        match self {
            Self::SingleOrCitizenPartner | Self::SkilledPartner => 10,
            Self::CompetentEnglishPartner => 5,
            Self::Other => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NominationStream {
    State,
    Regional,
}

impl NominationStream {
    const fn points(self) -> u16 {
        match self {
            Self::State => 5,
            Self::Regional => 15,
        }
    }
}

/// Applicant snapshot for the points test. English scores arrive already
/// normalized by [`crate::scoring::language`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AustraliaProfile {
    pub age: u8,
    pub english: ClbScores,
    #[serde(default)]
    pub overseas_experience_years: u8,
    #[serde(default)]
    pub australian_experience_years: u8,
    pub qualification: AustraliaQualification,
    #[serde(default)]
    pub australian_study: bool,
    #[serde(default)]
    pub specialist_qualification: bool,
    #[serde(default)]
    pub partner: PartnerStatus,
    #[serde(default)]
    pub nomination: Option<NominationStream>,
    #[serde(default)]
    pub credentialled_community_language: bool,
    #[serde(default)]
    pub professional_year: bool,
}

/// Grouped sub-totals. `total` always equals their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AustraliaBreakdown {
    pub age: u16,
    pub english: u16,
    pub work_experience: u16,
    pub education: u16,
    pub partner: u16,
    pub other: u16,
}

impl AustraliaBreakdown {
    pub fn sum(&self) -> u16 {
        self.age + self.english + self.work_experience + self.education + self.partner + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AustraliaScore {
    pub total: u16,
    pub english_tier: EnglishTier,
    pub breakdown: AustraliaBreakdown,
}

impl AustraliaScore {
    pub fn meets_pass_mark(&self) -> bool {
        self.total >= PASS_MARK
    }
}

struct PointsBand {
    min: u8,
    max: u8,
    points: u16,
}

const AGE_POINTS: &[PointsBand] = &[
    PointsBand { min: 18, max: 24, points: 25 },
    PointsBand { min: 25, max: 32, points: 30 },
    PointsBand { min: 33, max: 39, points: 25 },
    PointsBand { min: 40, max: 44, points: 15 },
];

const OVERSEAS_EXPERIENCE_POINTS: &[PointsBand] = &[
    PointsBand { min: 8, max: u8::MAX, points: 15 },
    PointsBand { min: 5, max: 7, points: 10 },
    PointsBand { min: 3, max: 4, points: 5 },
];

const AUSTRALIAN_EXPERIENCE_POINTS: &[PointsBand] = &[
    PointsBand { min: 8, max: u8::MAX, points: 20 },
    PointsBand { min: 5, max: 7, points: 15 },
    PointsBand { min: 3, max: 4, points: 10 },
    PointsBand { min: 1, max: 2, points: 5 },
];

const WORK_EXPERIENCE_CAP: u16 = 20;

fn band_points(bands: &[PointsBand], value: u8) -> u16 {
    bands
        .iter()
        .find(|band| value >= band.min && value <= band.max)
        .map(|band| band.points)
        .unwrap_or(0)
}

fn qualification_points(qualification: AustraliaQualification) -> u16 {
    match qualification {
        AustraliaQualification::None => 0,
        AustraliaQualification::DiplomaOrTrade => 10,
        AustraliaQualification::BachelorOrMaster => 15,
        AustraliaQualification::Doctorate => 20,
    }
}

/// Computes the points-test total for a normalized profile.
pub fn calculate_points(profile: &AustraliaProfile) -> AustraliaScore {
    let english_tier = EnglishTier::from_clb(&profile.english);

    let age = band_points(AGE_POINTS, profile.age);
    let english = english_tier.points();

    let overseas = band_points(OVERSEAS_EXPERIENCE_POINTS, profile.overseas_experience_years);
    let australian = band_points(
        AUSTRALIAN_EXPERIENCE_POINTS,
        profile.australian_experience_years,
    );
    let work_experience = (overseas + australian).min(WORK_EXPERIENCE_CAP);

    let mut education = qualification_points(profile.qualification);
    if profile.australian_study {
        education += 5;
    }
    if profile.specialist_qualification {
        education += 10;
    }

    let partner = profile.partner.points();

    let mut other = profile.nomination.map(NominationStream::points).unwrap_or(0);
    if profile.credentialled_community_language {
        other += 5;
    }
    if profile.professional_year {
        other += 5;
    }

    let breakdown = AustraliaBreakdown {
        age,
        english,
        work_experience,
        education,
        partner,
        other,
    };

    AustraliaScore {
        total: breakdown.sum(),
        english_tier,
        breakdown,
    }
}
