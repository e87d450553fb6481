//! Skill-transferability combinations. Each pairing has its own threshold
//! table with no partial credit below the qualifying thresholds. The
//! education and experience pairings are capped at 50 each, and the section
//! total is capped at 100 after summation.

use super::domain::{CanadaProfile, CrsFactor, EducationLevel, ScoreComponent};

pub(crate) const SECTION_CAP: u16 = 100;
const PAIR_CAP: u16 = 50;

/// Credential tiers the combination tables key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialTier {
    None,
    OneCredential,
    AdvancedOrMultiple,
}

fn credential_tier(level: EducationLevel) -> CredentialTier {
    match level {
        EducationLevel::HighSchool => CredentialTier::None,
        EducationLevel::OneYear | EducationLevel::TwoYear => CredentialTier::OneCredential,
        EducationLevel::Bachelor
        | EducationLevel::TwoOrMore
        | EducationLevel::Master
        | EducationLevel::Phd => CredentialTier::AdvancedOrMultiple,
    }
}

fn education_language_points(level: EducationLevel, min_clb: u8) -> u16 {
    let tier = credential_tier(level);
    match (tier, min_clb) {
        (CredentialTier::None, _) => 0,
        (_, 0..=6) => 0,
        (CredentialTier::OneCredential, 7..=8) => 13,
        (CredentialTier::OneCredential, _) => 25,
        (CredentialTier::AdvancedOrMultiple, 7..=8) => 25,
        (CredentialTier::AdvancedOrMultiple, _) => 50,
    }
}

fn education_experience_points(level: EducationLevel, canadian_years: u8) -> u16 {
    let tier = credential_tier(level);
    match (tier, canadian_years) {
        (CredentialTier::None, _) => 0,
        (_, 0) => 0,
        (CredentialTier::OneCredential, 1) => 13,
        (CredentialTier::OneCredential, _) => 25,
        (CredentialTier::AdvancedOrMultiple, 1) => 25,
        (CredentialTier::AdvancedOrMultiple, _) => 50,
    }
}

fn foreign_language_points(foreign_years: u8, min_clb: u8) -> u16 {
    match (foreign_years, min_clb) {
        (0, _) | (_, 0..=6) => 0,
        (1..=2, 7..=8) => 13,
        (1..=2, _) => 25,
        (_, 7..=8) => 25,
        (_, _) => 50,
    }
}

fn foreign_canadian_points(foreign_years: u8, canadian_years: u8) -> u16 {
    match (foreign_years, canadian_years) {
        (0, _) | (_, 0) => 0,
        (1..=2, 1) => 13,
        (1..=2, _) => 25,
        (_, 1) => 25,
        (_, _) => 50,
    }
}

fn certificate_points(min_clb: u8) -> u16 {
    match min_clb {
        0..=4 => 0,
        5..=6 => 25,
        _ => 50,
    }
}

pub(crate) fn score_transferability(profile: &CanadaProfile) -> (u16, Vec<ScoreComponent>) {
    let mut components = Vec::new();
    let min_clb = profile.first_language.minimum();

    let edu_language = education_language_points(profile.education, min_clb);
    if edu_language > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::EducationLanguage,
            points: edu_language,
            notes: format!("education with CLB {min_clb} in all first-language abilities"),
        });
    }

    let edu_experience =
        education_experience_points(profile.education, profile.canadian_experience_years);
    if edu_experience > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::EducationCanadianExperience,
            points: edu_experience,
            notes: format!(
                "education with {} year(s) of Canadian experience",
                profile.canadian_experience_years
            ),
        });
    }

    let foreign_language =
        foreign_language_points(profile.foreign_experience_years, min_clb);
    if foreign_language > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::ForeignExperienceLanguage,
            points: foreign_language,
            notes: format!(
                "{} year(s) of foreign experience with CLB {min_clb}",
                profile.foreign_experience_years
            ),
        });
    }

    let foreign_canadian = foreign_canadian_points(
        profile.foreign_experience_years,
        profile.canadian_experience_years,
    );
    if foreign_canadian > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::ForeignCanadianExperience,
            points: foreign_canadian,
            notes: format!(
                "{} foreign and {} Canadian year(s) of experience",
                profile.foreign_experience_years, profile.canadian_experience_years
            ),
        });
    }

    let certificate = if profile.additional.certificate_of_qualification {
        certificate_points(min_clb)
    } else {
        0
    };
    if certificate > 0 {
        components.push(ScoreComponent {
            factor: CrsFactor::CertificateOfQualification,
            points: certificate,
            notes: format!("certificate of qualification with CLB {min_clb}"),
        });
    }

    let education_pair = (edu_language + edu_experience).min(PAIR_CAP);
    let experience_pair = (foreign_language + foreign_canadian).min(PAIR_CAP);
    let total = (education_pair + experience_pair + certificate).min(SECTION_CAP);

    (total, components)
}
