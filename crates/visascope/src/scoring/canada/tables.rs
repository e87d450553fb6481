//! Core human-capital and spouse-factor lookup tables, transcribed from the
//! published CRS criteria. Every table carries two columns because the
//! single-applicant maxima shrink when a spouse accompanies the applicant.

use super::domain::EducationLevel;
use crate::scoring::language::ClbScores;

pub(crate) struct AgeBand {
    pub min_age: u8,
    pub max_age: u8,
    pub single: u16,
    pub with_spouse: u16,
}

pub(crate) const AGE_POINTS: &[AgeBand] = &[
    AgeBand { min_age: 18, max_age: 18, single: 99, with_spouse: 90 },
    AgeBand { min_age: 19, max_age: 19, single: 105, with_spouse: 95 },
    AgeBand { min_age: 20, max_age: 29, single: 110, with_spouse: 100 },
    AgeBand { min_age: 30, max_age: 30, single: 105, with_spouse: 95 },
    AgeBand { min_age: 31, max_age: 31, single: 99, with_spouse: 90 },
    AgeBand { min_age: 32, max_age: 32, single: 94, with_spouse: 85 },
    AgeBand { min_age: 33, max_age: 33, single: 88, with_spouse: 80 },
    AgeBand { min_age: 34, max_age: 34, single: 83, with_spouse: 75 },
    AgeBand { min_age: 35, max_age: 35, single: 77, with_spouse: 70 },
    AgeBand { min_age: 36, max_age: 36, single: 72, with_spouse: 65 },
    AgeBand { min_age: 37, max_age: 37, single: 66, with_spouse: 60 },
    AgeBand { min_age: 38, max_age: 38, single: 61, with_spouse: 55 },
    AgeBand { min_age: 39, max_age: 39, single: 55, with_spouse: 50 },
    AgeBand { min_age: 40, max_age: 40, single: 50, with_spouse: 45 },
    AgeBand { min_age: 41, max_age: 41, single: 39, with_spouse: 35 },
    AgeBand { min_age: 42, max_age: 42, single: 28, with_spouse: 25 },
    AgeBand { min_age: 43, max_age: 43, single: 17, with_spouse: 15 },
    AgeBand { min_age: 44, max_age: 44, single: 6, with_spouse: 5 },
];

/// Ages outside 18-44 earn zero rather than erroring.
pub(crate) fn age_points(age: u8, has_spouse: bool) -> u16 {
    AGE_POINTS
        .iter()
        .find(|band| age >= band.min_age && age <= band.max_age)
        .map(|band| if has_spouse { band.with_spouse } else { band.single })
        .unwrap_or(0)
}

pub(crate) fn education_points(level: EducationLevel, has_spouse: bool) -> u16 {
    let (single, with_spouse) = match level {
        EducationLevel::HighSchool => (30, 28),
        EducationLevel::OneYear => (90, 84),
        EducationLevel::TwoYear => (98, 91),
        EducationLevel::Bachelor => (120, 112),
        EducationLevel::TwoOrMore => (128, 119),
        EducationLevel::Master => (135, 126),
        EducationLevel::Phd => (150, 140),
    };
    if has_spouse {
        with_spouse
    } else {
        single
    }
}

/// First-official-language points for a single ability.
pub(crate) fn first_language_ability_points(clb: u8, has_spouse: bool) -> u16 {
    let (single, with_spouse) = match clb {
        0..=3 => (0, 0),
        4..=5 => (6, 6),
        6 => (9, 8),
        7 => (17, 16),
        8 => (23, 22),
        9 => (31, 29),
        _ => (34, 32),
    };
    if has_spouse {
        with_spouse
    } else {
        single
    }
}

/// Second-official-language points for a single ability. The summed section
/// is capped separately in the scorer.
pub(crate) fn second_language_ability_points(clb: u8) -> u16 {
    match clb {
        0..=4 => 0,
        5..=6 => 1,
        7..=8 => 3,
        _ => 6,
    }
}

pub(crate) const SECOND_LANGUAGE_CAP_SINGLE: u16 = 24;
pub(crate) const SECOND_LANGUAGE_CAP_WITH_SPOUSE: u16 = 22;

pub(crate) fn canadian_experience_points(years: u8, has_spouse: bool) -> u16 {
    let (single, with_spouse) = match years {
        0 => (0, 0),
        1 => (40, 35),
        2 => (53, 46),
        3 => (64, 56),
        4 => (72, 63),
        _ => (80, 70),
    };
    if has_spouse {
        with_spouse
    } else {
        single
    }
}

// Spouse-factor tables. The three sub-scores are capped at 40 combined.

pub(crate) const SPOUSE_FACTORS_CAP: u16 = 40;

pub(crate) fn spouse_education_points(level: EducationLevel) -> u16 {
    match level {
        EducationLevel::HighSchool => 2,
        EducationLevel::OneYear => 6,
        EducationLevel::TwoYear => 7,
        EducationLevel::Bachelor => 8,
        EducationLevel::TwoOrMore => 9,
        EducationLevel::Master | EducationLevel::Phd => 10,
    }
}

pub(crate) fn spouse_language_points(scores: &ClbScores) -> u16 {
    scores
        .abilities()
        .iter()
        .map(|&clb| match clb {
            0..=4 => 0,
            5..=6 => 1,
            7..=8 => 3,
            _ => 5,
        })
        .sum::<u16>()
        .min(20)
}

pub(crate) fn spouse_experience_points(years: u8) -> u16 {
    match years {
        0 => 0,
        1 => 5,
        2 => 7,
        3 => 8,
        4 => 9,
        _ => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bands_do_not_overlap_and_peak_in_the_twenties() {
        for pair in AGE_POINTS.windows(2) {
            assert!(pair[0].max_age < pair[1].min_age);
        }
        assert_eq!(age_points(25, false), 110);
        assert_eq!(age_points(25, true), 100);
    }

    #[test]
    fn ages_outside_the_grid_earn_zero() {
        assert_eq!(age_points(17, false), 0);
        assert_eq!(age_points(45, false), 0);
        assert_eq!(age_points(99, true), 0);
    }

    #[test]
    fn education_points_match_published_maxima() {
        assert_eq!(education_points(EducationLevel::Phd, false), 150);
        assert_eq!(education_points(EducationLevel::Master, false), 135);
        assert_eq!(education_points(EducationLevel::Bachelor, true), 112);
    }

    #[test]
    fn clb_ten_earns_the_first_language_maximum() {
        assert_eq!(first_language_ability_points(10, false), 34);
        assert_eq!(first_language_ability_points(10, true), 32);
        assert_eq!(first_language_ability_points(3, false), 0);
    }

    #[test]
    fn canadian_experience_saturates_at_five_years() {
        assert_eq!(canadian_experience_points(5, false), 80);
        assert_eq!(canadian_experience_points(9, false), 80);
        assert_eq!(canadian_experience_points(0, true), 0);
    }

    #[test]
    fn spouse_language_is_capped_at_twenty() {
        let scores = ClbScores::uniform(10);
        assert_eq!(spouse_language_points(&scores), 20);
    }
}
