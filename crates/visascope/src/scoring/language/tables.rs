//! Raw-score to CLB conversion tables, transcribed from the published
//! equivalency grids of each test provider. Bands are ordered highest CLB
//! first; the first band whose `min_raw` the (clamped) raw score reaches
//! wins. Scores below the lowest band normalize to CLB 0.

use super::{Ability, TestType};

pub(crate) struct ClbBand {
    pub min_raw: f32,
    pub clb: u8,
}

struct TestDomain {
    min: f32,
    max: f32,
}

const IELTS_SPEAKING: &[ClbBand] = &[
    ClbBand { min_raw: 7.5, clb: 10 },
    ClbBand { min_raw: 7.0, clb: 9 },
    ClbBand { min_raw: 6.5, clb: 8 },
    ClbBand { min_raw: 6.0, clb: 7 },
    ClbBand { min_raw: 5.5, clb: 6 },
    ClbBand { min_raw: 5.0, clb: 5 },
    ClbBand { min_raw: 4.0, clb: 4 },
];

const IELTS_LISTENING: &[ClbBand] = &[
    ClbBand { min_raw: 8.5, clb: 10 },
    ClbBand { min_raw: 8.0, clb: 9 },
    ClbBand { min_raw: 7.5, clb: 8 },
    ClbBand { min_raw: 6.0, clb: 7 },
    ClbBand { min_raw: 5.5, clb: 6 },
    ClbBand { min_raw: 5.0, clb: 5 },
    ClbBand { min_raw: 4.5, clb: 4 },
];

const IELTS_READING: &[ClbBand] = &[
    ClbBand { min_raw: 8.0, clb: 10 },
    ClbBand { min_raw: 7.0, clb: 9 },
    ClbBand { min_raw: 6.5, clb: 8 },
    ClbBand { min_raw: 6.0, clb: 7 },
    ClbBand { min_raw: 5.0, clb: 6 },
    ClbBand { min_raw: 4.0, clb: 5 },
    ClbBand { min_raw: 3.5, clb: 4 },
];

const IELTS_WRITING: &[ClbBand] = &[
    ClbBand { min_raw: 7.5, clb: 10 },
    ClbBand { min_raw: 7.0, clb: 9 },
    ClbBand { min_raw: 6.5, clb: 8 },
    ClbBand { min_raw: 6.0, clb: 7 },
    ClbBand { min_raw: 5.5, clb: 6 },
    ClbBand { min_raw: 5.0, clb: 5 },
    ClbBand { min_raw: 4.0, clb: 4 },
];

// TEF Canada reports every ability on the 0-699 scale since the 2023
// rescoring; the thresholds are the same for all four abilities.
const TEF_ANY: &[ClbBand] = &[
    ClbBand { min_raw: 546.0, clb: 10 },
    ClbBand { min_raw: 503.0, clb: 9 },
    ClbBand { min_raw: 462.0, clb: 8 },
    ClbBand { min_raw: 434.0, clb: 7 },
    ClbBand { min_raw: 393.0, clb: 6 },
    ClbBand { min_raw: 352.0, clb: 5 },
    ClbBand { min_raw: 306.0, clb: 4 },
];

const TCF_LISTENING: &[ClbBand] = &[
    ClbBand { min_raw: 549.0, clb: 10 },
    ClbBand { min_raw: 523.0, clb: 9 },
    ClbBand { min_raw: 503.0, clb: 8 },
    ClbBand { min_raw: 458.0, clb: 7 },
    ClbBand { min_raw: 398.0, clb: 6 },
    ClbBand { min_raw: 369.0, clb: 5 },
    ClbBand { min_raw: 331.0, clb: 4 },
];

const TCF_READING: &[ClbBand] = &[
    ClbBand { min_raw: 549.0, clb: 10 },
    ClbBand { min_raw: 524.0, clb: 9 },
    ClbBand { min_raw: 499.0, clb: 8 },
    ClbBand { min_raw: 453.0, clb: 7 },
    ClbBand { min_raw: 406.0, clb: 6 },
    ClbBand { min_raw: 375.0, clb: 5 },
    ClbBand { min_raw: 342.0, clb: 4 },
];

// TCF speaking and writing are graded 0-20.
const TCF_SPOKEN: &[ClbBand] = &[
    ClbBand { min_raw: 16.0, clb: 10 },
    ClbBand { min_raw: 14.0, clb: 9 },
    ClbBand { min_raw: 12.0, clb: 8 },
    ClbBand { min_raw: 10.0, clb: 7 },
    ClbBand { min_raw: 7.0, clb: 6 },
    ClbBand { min_raw: 6.0, clb: 5 },
    ClbBand { min_raw: 4.0, clb: 4 },
];

const PTE_SPEAKING: &[ClbBand] = &[
    ClbBand { min_raw: 89.0, clb: 10 },
    ClbBand { min_raw: 84.0, clb: 9 },
    ClbBand { min_raw: 76.0, clb: 8 },
    ClbBand { min_raw: 68.0, clb: 7 },
    ClbBand { min_raw: 59.0, clb: 6 },
    ClbBand { min_raw: 51.0, clb: 5 },
    ClbBand { min_raw: 42.0, clb: 4 },
];

const PTE_LISTENING: &[ClbBand] = &[
    ClbBand { min_raw: 89.0, clb: 10 },
    ClbBand { min_raw: 82.0, clb: 9 },
    ClbBand { min_raw: 71.0, clb: 8 },
    ClbBand { min_raw: 60.0, clb: 7 },
    ClbBand { min_raw: 50.0, clb: 6 },
    ClbBand { min_raw: 39.0, clb: 5 },
    ClbBand { min_raw: 28.0, clb: 4 },
];

const PTE_READING: &[ClbBand] = &[
    ClbBand { min_raw: 88.0, clb: 10 },
    ClbBand { min_raw: 78.0, clb: 9 },
    ClbBand { min_raw: 69.0, clb: 8 },
    ClbBand { min_raw: 60.0, clb: 7 },
    ClbBand { min_raw: 51.0, clb: 6 },
    ClbBand { min_raw: 42.0, clb: 5 },
    ClbBand { min_raw: 33.0, clb: 4 },
];

const PTE_WRITING: &[ClbBand] = &[
    ClbBand { min_raw: 90.0, clb: 10 },
    ClbBand { min_raw: 88.0, clb: 9 },
    ClbBand { min_raw: 79.0, clb: 8 },
    ClbBand { min_raw: 69.0, clb: 7 },
    ClbBand { min_raw: 60.0, clb: 6 },
    ClbBand { min_raw: 51.0, clb: 5 },
    ClbBand { min_raw: 41.0, clb: 4 },
];

fn domain(test: TestType, ability: Ability) -> TestDomain {
    match test {
        TestType::Ielts => TestDomain { min: 0.0, max: 9.0 },
        TestType::Celpip => TestDomain {
            min: 1.0,
            max: 12.0,
        },
        TestType::Tef => TestDomain {
            min: 0.0,
            max: 699.0,
        },
        TestType::Tcf => match ability {
            Ability::Listening | Ability::Reading => TestDomain {
                min: 0.0,
                max: 699.0,
            },
            Ability::Speaking | Ability::Writing => TestDomain {
                min: 0.0,
                max: 20.0,
            },
        },
        TestType::PteCore => TestDomain {
            min: 10.0,
            max: 90.0,
        },
        TestType::Clb => TestDomain {
            min: 0.0,
            max: 10.0,
        },
    }
}

fn bands(test: TestType, ability: Ability) -> &'static [ClbBand] {
    match test {
        TestType::Ielts => match ability {
            Ability::Speaking => IELTS_SPEAKING,
            Ability::Listening => IELTS_LISTENING,
            Ability::Reading => IELTS_READING,
            Ability::Writing => IELTS_WRITING,
        },
        TestType::Tef => TEF_ANY,
        TestType::Tcf => match ability {
            Ability::Listening => TCF_LISTENING,
            Ability::Reading => TCF_READING,
            Ability::Speaking | Ability::Writing => TCF_SPOKEN,
        },
        TestType::PteCore => match ability {
            Ability::Speaking => PTE_SPEAKING,
            Ability::Listening => PTE_LISTENING,
            Ability::Reading => PTE_READING,
            Ability::Writing => PTE_WRITING,
        },
        // CELPIP and CLB are handled arithmetically in `clb_for`.
        TestType::Celpip | TestType::Clb => &[],
    }
}

pub(crate) fn clb_for(test: TestType, ability: Ability, raw: f32) -> u8 {
    let range = domain(test, ability);
    let raw = if raw.is_nan() {
        range.min
    } else {
        raw.clamp(range.min, range.max)
    };

    match test {
        // CELPIP levels are CLB levels, capped at 10 (levels 11 and 12 both
        // certify CLB 10). CLB input is the integer identity.
        TestType::Celpip | TestType::Clb => (raw.floor() as u8).min(10),
        _ => bands(test, ability)
            .iter()
            .find(|band| raw >= band.min_raw)
            .map(|band| band.clb)
            .unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_descending(bands: &[ClbBand], label: &str) {
        for pair in bands.windows(2) {
            assert!(
                pair[0].min_raw > pair[1].min_raw && pair[0].clb > pair[1].clb,
                "{label} table is not strictly descending"
            );
        }
    }

    #[test]
    fn all_band_tables_are_monotonic() {
        for (table, label) in [
            (IELTS_SPEAKING, "ielts speaking"),
            (IELTS_LISTENING, "ielts listening"),
            (IELTS_READING, "ielts reading"),
            (IELTS_WRITING, "ielts writing"),
            (TEF_ANY, "tef"),
            (TCF_LISTENING, "tcf listening"),
            (TCF_READING, "tcf reading"),
            (TCF_SPOKEN, "tcf spoken"),
            (PTE_SPEAKING, "pte speaking"),
            (PTE_LISTENING, "pte listening"),
            (PTE_READING, "pte reading"),
            (PTE_WRITING, "pte writing"),
        ] {
            assert_descending(table, label);
        }
    }

    #[test]
    fn below_lowest_band_normalizes_to_zero() {
        assert_eq!(clb_for(TestType::Ielts, Ability::Speaking, 2.0), 0);
        assert_eq!(clb_for(TestType::Tef, Ability::Reading, 100.0), 0);
    }

    #[test]
    fn tcf_spoken_scale_differs_from_comprehension_scale() {
        assert_eq!(clb_for(TestType::Tcf, Ability::Speaking, 16.0), 10);
        assert_eq!(clb_for(TestType::Tcf, Ability::Listening, 549.0), 10);
    }

    #[test]
    fn nan_raw_scores_fall_to_the_domain_floor() {
        assert_eq!(clb_for(TestType::Ielts, Ability::Reading, f32::NAN), 0);
    }
}
