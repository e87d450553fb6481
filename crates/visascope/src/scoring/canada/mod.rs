//! Comprehensive Ranking System scorer for Express Entry.

mod additional;
mod domain;
mod tables;
mod transferability;

pub use domain::{
    AdditionalQualifications, CanadaProfile, CanadianCredentialLength, CrsBreakdown, CrsFactor,
    CrsScore, EducationLevel, JobOfferTier, ScoreComponent, SpouseProfile,
};

/// Documented ceiling of the CRS scale.
pub const MAX_TOTAL: u16 = 1200;

/// Computes the four-part CRS score for a normalized profile.
///
/// Pure and deterministic: the same profile always yields the same
/// breakdown, and `total` always equals the sum of the four sections,
/// clipped to [`MAX_TOTAL`].
pub fn calculate_crs(profile: &CanadaProfile) -> CrsScore {
    let mut components = Vec::new();

    let core_human_capital = score_core(profile, &mut components);
    let spouse_factors = score_spouse(profile, &mut components);
    let (skill_transferability, transfer_components) =
        transferability::score_transferability(profile);
    components.extend(transfer_components);
    let (additional_points, additional_components) = additional::score_additional(profile);
    components.extend(additional_components);

    let breakdown = CrsBreakdown {
        core_human_capital,
        spouse_factors,
        skill_transferability,
        additional_points,
    };

    CrsScore {
        total: breakdown.sum().min(MAX_TOTAL),
        breakdown,
        components,
    }
}

fn score_core(profile: &CanadaProfile, components: &mut Vec<ScoreComponent>) -> u16 {
    let has_spouse = profile.has_spouse();

    let age = tables::age_points(profile.age, has_spouse);
    components.push(ScoreComponent {
        factor: CrsFactor::Age,
        points: age,
        notes: format!("age {}", profile.age),
    });

    let education = tables::education_points(profile.education, has_spouse);
    components.push(ScoreComponent {
        factor: CrsFactor::Education,
        points: education,
        notes: format!("{:?} level credential", profile.education).to_lowercase(),
    });

    let first_language: u16 = profile
        .first_language
        .abilities()
        .iter()
        .map(|&clb| tables::first_language_ability_points(clb, has_spouse))
        .sum();
    components.push(ScoreComponent {
        factor: CrsFactor::FirstLanguage,
        points: first_language,
        notes: format!(
            "first official language, minimum CLB {}",
            profile.first_language.minimum()
        ),
    });

    let second_language = profile
        .second_language
        .map(|scores| {
            let cap = if has_spouse {
                tables::SECOND_LANGUAGE_CAP_WITH_SPOUSE
            } else {
                tables::SECOND_LANGUAGE_CAP_SINGLE
            };
            scores
                .abilities()
                .iter()
                .map(|&clb| tables::second_language_ability_points(clb))
                .sum::<u16>()
                .min(cap)
        })
        .unwrap_or(0);
    if second_language > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::SecondLanguage,
            points: second_language,
            notes: "second official language".to_string(),
        });
    }

    let experience =
        tables::canadian_experience_points(profile.canadian_experience_years, has_spouse);
    components.push(ScoreComponent {
        factor: CrsFactor::CanadianExperience,
        points: experience,
        notes: format!(
            "{} year(s) of Canadian work experience",
            profile.canadian_experience_years
        ),
    });

    age + education + first_language + second_language + experience
}

fn score_spouse(profile: &CanadaProfile, components: &mut Vec<ScoreComponent>) -> u16 {
    let Some(spouse) = &profile.spouse else {
        return 0;
    };

    let education = spouse
        .education
        .map(tables::spouse_education_points)
        .unwrap_or(0);
    if education > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::SpouseEducation,
            points: education,
            notes: "spouse education".to_string(),
        });
    }

    let language = spouse
        .language
        .as_ref()
        .map(tables::spouse_language_points)
        .unwrap_or(0);
    if language > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::SpouseLanguage,
            points: language,
            notes: "spouse official language".to_string(),
        });
    }

    let experience = tables::spouse_experience_points(spouse.canadian_experience_years);
    if experience > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::SpouseExperience,
            points: experience,
            notes: format!(
                "spouse with {} year(s) of Canadian experience",
                spouse.canadian_experience_years
            ),
        });
    }

    (education + language + experience).min(tables::SPOUSE_FACTORS_CAP)
}
