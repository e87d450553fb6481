//! The three visa checkers. Each evaluates a fixed list of weighted
//! requirement rules and shares the [`EligibilityResult`] contract; a
//! criminal record is a hard disqualifier that forces `not_eligible`
//! regardless of the weighted score.

use super::domain::{
    EligibilityResult, PortugalProfile, RequirementCheck, VisaType,
};
use super::policy::{status_for, PortugalPolicy};

struct Rule {
    category: &'static str,
    met: bool,
    hard: bool,
    weight: u8,
    details: String,
    recommendation: &'static str,
}

fn build_result(
    visa: VisaType,
    profile: &PortugalProfile,
    policy: &PortugalPolicy,
    rules: Vec<Rule>,
) -> EligibilityResult {
    let total_weight: u32 = rules.iter().map(|rule| rule.weight as u32).sum();
    let met_weight: u32 = rules
        .iter()
        .filter(|rule| rule.met)
        .map(|rule| rule.weight as u32)
        .sum();

    let score = if total_weight == 0 {
        0
    } else {
        ((met_weight as f64 / total_weight as f64) * 100.0).round() as u8
    };

    let mut missing_requirements = Vec::new();
    let mut recommendations = Vec::new();
    let mut requirements = Vec::with_capacity(rules.len() + 1);

    for rule in rules {
        if !rule.met {
            missing_requirements.push(rule.details.clone());
            recommendations.push(rule.recommendation.to_string());
        }
        requirements.push(RequirementCheck {
            category: rule.category,
            met: rule.met,
            hard: rule.hard,
            weight: rule.weight,
            details: rule.details,
        });
    }

    // The record check carries no weight: it cannot buy points, only
    // disqualify.
    let disqualified = !profile.clean_criminal_record;
    requirements.push(RequirementCheck {
        category: "criminal_record",
        met: !disqualified,
        hard: true,
        weight: 0,
        details: if disqualified {
            "a disqualifying criminal record was declared".to_string()
        } else {
            "no disqualifying criminal record".to_string()
        },
    });
    if disqualified {
        missing_requirements.push("clean criminal record".to_string());
        recommendations
            .push("Seek legal advice before applying; a criminal record bars this route".to_string());
    }

    EligibilityResult {
        visa,
        status: status_for(score, disqualified, &policy.status),
        score,
        requirements,
        missing_requirements,
        recommendations,
    }
}

/// D7 passive income visa.
pub fn check_d7(profile: &PortugalProfile, policy: &PortugalPolicy) -> EligibilityResult {
    let required = policy.d7_required_income(profile.adult_dependents, profile.child_dependents);
    let savings_target = required * policy.d7_savings_months;

    let rules = vec![
        Rule {
            category: "income",
            met: profile.monthly_income_eur >= required,
            hard: true,
            weight: 40,
            details: format!(
                "monthly income €{} against a €{required} requirement for {} adult and {} child dependent(s)",
                profile.monthly_income_eur, profile.adult_dependents, profile.child_dependents
            ),
            recommendation: "Document stable monthly income at or above the household requirement",
        },
        Rule {
            category: "passive_income",
            met: profile.passive_income_eur > 0,
            hard: false,
            weight: 20,
            details: format!(
                "declared passive income €{}/month",
                profile.passive_income_eur
            ),
            recommendation: "Evidence a passive source (pension, rent, dividends) rather than salary alone",
        },
        Rule {
            category: "savings",
            met: profile.savings_eur >= savings_target,
            hard: false,
            weight: 15,
            details: format!(
                "savings €{} against a €{savings_target} target ({} months of the requirement)",
                profile.savings_eur, policy.d7_savings_months
            ),
            recommendation: "Build savings covering a year of the income requirement",
        },
        Rule {
            category: "accommodation",
            met: profile.has_accommodation,
            hard: true,
            weight: 15,
            details: accommodation_details(profile),
            recommendation: "Secure a lease or property deed in Portugal",
        },
        Rule {
            category: "health_insurance",
            met: profile.has_health_insurance,
            hard: false,
            weight: 10,
            details: insurance_details(profile),
            recommendation: "Arrange health cover valid in Portugal",
        },
    ];

    build_result(VisaType::D7, profile, policy, rules)
}

/// D8 digital nomad visa.
pub fn check_d8(profile: &PortugalProfile, policy: &PortugalPolicy) -> EligibilityResult {
    let required = policy.d8_required_income();

    let rules = vec![
        Rule {
            category: "income",
            // Exactly the multiple passes; one euro below does not.
            met: profile.monthly_income_eur >= required,
            hard: true,
            weight: 40,
            details: format!(
                "monthly income €{} against the €{required} requirement ({}x minimum wage)",
                profile.monthly_income_eur, policy.d8_income_multiplier
            ),
            recommendation: "Raise documented remote income to the wage-multiple threshold",
        },
        Rule {
            category: "remote_work",
            met: profile.remote_worker,
            hard: true,
            weight: 20,
            details: if profile.remote_worker {
                "works remotely".to_string()
            } else {
                "no remote working arrangement declared".to_string()
            },
            recommendation: "Obtain a remote work contract or statement from the employer",
        },
        Rule {
            category: "foreign_employer",
            met: profile.employer_outside_portugal(),
            hard: true,
            weight: 20,
            details: match profile.employer_country.as_deref() {
                Some(country) => format!("employer based in {country}"),
                None => "no employer country declared".to_string(),
            },
            recommendation: "The employer must be established outside Portugal for this route",
        },
        Rule {
            category: "accommodation",
            met: profile.has_accommodation,
            hard: false,
            weight: 10,
            details: accommodation_details(profile),
            recommendation: "Secure a lease or property deed in Portugal",
        },
        Rule {
            category: "health_insurance",
            met: profile.has_health_insurance,
            hard: false,
            weight: 10,
            details: insurance_details(profile),
            recommendation: "Arrange health cover valid in Portugal",
        },
    ];

    build_result(VisaType::D8, profile, policy, rules)
}

/// D2 entrepreneur visa.
pub fn check_d2(profile: &PortugalProfile, policy: &PortugalPolicy) -> EligibilityResult {
    let business = profile.business.clone().unwrap_or_default();
    let subsistence_target = policy.minimum_wage_eur * 12;

    let rules = vec![
        Rule {
            category: "business_plan",
            met: business.written_plan,
            hard: true,
            weight: 30,
            details: if business.written_plan {
                "written business plan provided".to_string()
            } else {
                "no written business plan".to_string()
            },
            recommendation: "Prepare a written business plan demonstrating economic viability",
        },
        Rule {
            category: "investment",
            met: business.investment_eur >= policy.d2_minimum_investment_eur,
            hard: false,
            weight: 25,
            details: format!(
                "committed investment €{} against a €{} floor",
                business.investment_eur, policy.d2_minimum_investment_eur
            ),
            recommendation: "Commit share capital at or above the recommended floor",
        },
        Rule {
            category: "sector_experience",
            met: business.sector_experience_years > 0,
            hard: false,
            weight: 15,
            details: format!(
                "{} year(s) of experience in the business sector",
                business.sector_experience_years
            ),
            recommendation: "Document prior experience in the proposed sector",
        },
        Rule {
            category: "subsistence",
            met: profile.savings_eur >= subsistence_target,
            hard: false,
            weight: 20,
            details: format!(
                "savings €{} against a €{subsistence_target} subsistence target",
                profile.savings_eur
            ),
            recommendation: "Show savings covering a year at the national minimum wage",
        },
        Rule {
            category: "accommodation",
            met: profile.has_accommodation,
            hard: false,
            weight: 10,
            details: accommodation_details(profile),
            recommendation: "Secure a lease or property deed in Portugal",
        },
    ];

    build_result(VisaType::D2, profile, policy, rules)
}

fn accommodation_details(profile: &PortugalProfile) -> String {
    if profile.has_accommodation {
        "accommodation in Portugal secured".to_string()
    } else {
        "no accommodation in Portugal".to_string()
    }
}

fn insurance_details(profile: &PortugalProfile) -> String {
    if profile.has_health_insurance {
        "health insurance in place".to_string()
    } else {
        "no health insurance declared".to_string()
    }
}
