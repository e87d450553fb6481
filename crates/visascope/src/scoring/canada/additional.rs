//! Additional points: provincial nomination, arranged employment, Canadian
//! study, French-language skills, and a sibling in Canada. The bonuses are
//! not mutually exclusive, except the two French tiers which form a ranked
//! rule list evaluated top-down with early exit.

use super::domain::{
    CanadaProfile, CanadianCredentialLength, CrsFactor, JobOfferTier, ScoreComponent,
};

pub(crate) const PROVINCIAL_NOMINATION_POINTS: u16 = 600;
const SIBLING_POINTS: u16 = 15;

struct FrenchBonusRule {
    min_french_clb: u8,
    max_english_clb: Option<u8>,
    points: u16,
    label: &'static str,
}

/// Ordered highest tier first; the first applicable rule wins.
const FRENCH_BONUS_RULES: &[FrenchBonusRule] = &[
    FrenchBonusRule {
        min_french_clb: 7,
        max_english_clb: Some(4),
        points: 50,
        label: "CLB 7+ French with English at CLB 4 or lower",
    },
    FrenchBonusRule {
        min_french_clb: 7,
        max_english_clb: None,
        points: 25,
        label: "CLB 7+ French",
    },
];

fn french_bonus(profile: &CanadaProfile) -> Option<(u16, &'static str)> {
    let french = profile.french_scores()?;
    let french_min = french.minimum();
    // English CLB 0 when no English test was declared.
    let english_max = profile
        .english_scores()
        .map(|scores| scores.maximum())
        .unwrap_or(0);

    FRENCH_BONUS_RULES
        .iter()
        .find(|rule| {
            french_min >= rule.min_french_clb
                && rule
                    .max_english_clb
                    .map(|cap| english_max <= cap)
                    .unwrap_or(true)
        })
        .map(|rule| (rule.points, rule.label))
}

fn job_offer_points(tier: JobOfferTier) -> u16 {
    match tier {
        JobOfferTier::Senior => 200,
        JobOfferTier::Skilled => 50,
    }
}

fn canadian_education_points(length: CanadianCredentialLength) -> u16 {
    match length {
        CanadianCredentialLength::OneOrTwoYear => 15,
        CanadianCredentialLength::ThreeYearOrLonger => 30,
    }
}

pub(crate) fn score_additional(profile: &CanadaProfile) -> (u16, Vec<ScoreComponent>) {
    let mut components = Vec::new();
    let mut total: u16 = 0;
    let additional = &profile.additional;

    if additional.provincial_nomination {
        components.push(ScoreComponent {
            factor: CrsFactor::ProvincialNomination,
            points: PROVINCIAL_NOMINATION_POINTS,
            notes: "provincial or territorial nomination".to_string(),
        });
        total += PROVINCIAL_NOMINATION_POINTS;
    }

    if let Some(tier) = additional.job_offer {
        let points = job_offer_points(tier);
        components.push(ScoreComponent {
            factor: CrsFactor::JobOffer,
            points,
            notes: format!("arranged employment ({tier:?})").to_lowercase(),
        });
        total += points;
    }

    if let Some(length) = additional.canadian_credential {
        let points = canadian_education_points(length);
        components.push(ScoreComponent {
            factor: CrsFactor::CanadianEducation,
            points,
            notes: "credential from a Canadian institution".to_string(),
        });
        total += points;
    }

    if let Some((points, label)) = french_bonus(profile) {
        components.push(ScoreComponent {
            factor: CrsFactor::FrenchBonus,
            points,
            notes: label.to_string(),
        });
        total += points;
    }

    if additional.sibling_in_canada {
        components.push(ScoreComponent {
            factor: CrsFactor::SiblingInCanada,
            points: SIBLING_POINTS,
            notes: "sibling in Canada (citizen or permanent resident)".to_string(),
        });
        total += SIBLING_POINTS;
    }

    (total, components)
}
