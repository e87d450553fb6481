use crate::infra::{default_portugal_policy, load_draw_history};
use clap::Args;
use std::path::PathBuf;
use visascope::error::AppError;
use visascope::scoring::australia::{
    calculate_points, AustraliaProfile, AustraliaQualification, NominationStream, PartnerStatus,
    PASS_MARK,
};
use visascope::scoring::canada::{
    calculate_crs, AdditionalQualifications, CanadaProfile, EducationLevel, SpouseProfile,
};
use visascope::scoring::draws::{
    analyze_draw_history, compare_user_score, generate_draw_alerts, predict_next_draw, AlertKind,
    DrawRecord, TrendDirection,
};
use visascope::scoring::language::{AbilityScores, LanguageTestScore, TestType};
use visascope::scoring::portugal::{
    match_visas, BusinessPlan, PortugalProfile, VisaQuestionnaire,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CRS score used for the draw comparison portion of the demo.
    #[arg(long)]
    pub(crate) user_score: Option<u16>,
    /// Skip the draw intelligence portion of the demo.
    #[arg(long)]
    pub(crate) skip_draws: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DrawReportArgs {
    /// Draw history CSV with `Draw Date` and `CRS Minimum` columns
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Compare this CRS score against the history and emit alerts
    #[arg(long)]
    pub(crate) score: Option<u16>,
}

pub(crate) fn run_draw_report(args: DrawReportArgs) -> Result<(), AppError> {
    let DrawReportArgs { history, score } = args;

    let draws = load_draw_history(history)?;
    render_draw_report(&draws, score);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user_score,
        skip_draws,
    } = args;

    println!("Immigration scoring demo");

    let first_language = LanguageTestScore {
        test: TestType::Ielts,
        scores: AbilityScores {
            speaking: 7.0,
            listening: 8.0,
            reading: 7.0,
            writing: 7.0,
        },
    };
    let clb = first_language.normalized();
    println!("\nLanguage normalization");
    println!(
        "- IELTS S{} L{} R{} W{} -> CLB S{} L{} R{} W{}",
        first_language.scores.speaking,
        first_language.scores.listening,
        first_language.scores.reading,
        first_language.scores.writing,
        clb.speaking,
        clb.listening,
        clb.reading,
        clb.writing
    );

    let canada = CanadaProfile {
        age: 31,
        education: EducationLevel::Master,
        first_language: clb,
        second_language: None,
        first_language_is_french: false,
        canadian_experience_years: 1,
        foreign_experience_years: 4,
        spouse: Some(SpouseProfile {
            education: Some(EducationLevel::Bachelor),
            language: None,
            canadian_experience_years: 0,
        }),
        additional: AdditionalQualifications::default(),
    };
    let crs = calculate_crs(&canada);
    println!("\nCanada Express Entry (CRS)");
    println!(
        "- Total {} / core {} / spouse {} / transferability {} / additional {}",
        crs.total,
        crs.breakdown.core_human_capital,
        crs.breakdown.spouse_factors,
        crs.breakdown.skill_transferability,
        crs.breakdown.additional_points
    );
    println!("  Components:");
    for component in &crs.components {
        println!(
            "    - {:?}: {} ({})",
            component.factor, component.points, component.notes
        );
    }

    let australia = AustraliaProfile {
        age: 31,
        english: clb,
        overseas_experience_years: 4,
        australian_experience_years: 1,
        qualification: AustraliaQualification::BachelorOrMaster,
        australian_study: false,
        specialist_qualification: false,
        partner: PartnerStatus::SkilledPartner,
        nomination: Some(NominationStream::Regional),
        credentialled_community_language: false,
        professional_year: false,
    };
    let points = calculate_points(&australia);
    println!("\nAustralia skilled migration points");
    println!(
        "- Total {} ({} tier English) | pass mark {} -> {}",
        points.total,
        match points.english_tier {
            visascope::scoring::australia::EnglishTier::Competent => "competent",
            visascope::scoring::australia::EnglishTier::Proficient => "proficient",
            visascope::scoring::australia::EnglishTier::Superior => "superior",
        },
        PASS_MARK,
        if points.meets_pass_mark() {
            "meets the mark"
        } else {
            "below the mark"
        }
    );
    println!(
        "- age {} | english {} | experience {} | education {} | partner {} | other {}",
        points.breakdown.age,
        points.breakdown.english,
        points.breakdown.work_experience,
        points.breakdown.education,
        points.breakdown.partner,
        points.breakdown.other
    );

    let questionnaire = VisaQuestionnaire {
        remote_worker: true,
        employer_outside_portugal: true,
        plans_business: true,
        monthly_income_eur: 3400,
        ..VisaQuestionnaire::default()
    };
    let portugal = PortugalProfile {
        monthly_income_eur: 3400,
        passive_income_eur: 0,
        savings_eur: 18_000,
        remote_worker: true,
        employer_country: Some("Ireland".to_string()),
        business: Some(BusinessPlan {
            written_plan: false,
            investment_eur: 2_000,
            sector_experience_years: 6,
        }),
        adult_dependents: 1,
        child_dependents: 0,
        has_accommodation: true,
        has_health_insurance: true,
        clean_criminal_record: true,
    };
    let matched = match_visas(&questionnaire, &portugal, &default_portugal_policy());
    println!("\nPortugal residence visas");
    for note in &matched.notes {
        println!("- Note: {}", note);
    }
    for recommendation in &matched.recommendations {
        let result = &recommendation.result;
        println!(
            "- {}: {} (score {})",
            result.visa.label(),
            result.status.label(),
            result.score
        );
        for warning in &recommendation.warnings {
            println!("    ! {}", warning);
        }
        for missing in &result.missing_requirements {
            println!("    missing: {}", missing);
        }
    }

    if skip_draws {
        return Ok(());
    }

    println!("\nDraw intelligence (sample history)");
    let draws = sample_draw_history();
    render_draw_report(&draws, user_score.or(Some(crs.total)));

    Ok(())
}

fn render_draw_report(draws: &[DrawRecord], user_score: Option<u16>) {
    let analysis = analyze_draw_history(draws);
    let prediction = predict_next_draw(draws);

    println!(
        "Rounds analyzed: {} | cutoffs {}-{} (avg {:.1})",
        analysis.sample_size,
        analysis.minimum_cutoff,
        analysis.maximum_cutoff,
        analysis.average_cutoff
    );
    let trend_label = match analysis.trend {
        TrendDirection::Rising => "rising",
        TrendDirection::Falling => "falling",
        TrendDirection::Stable => "stable",
        TrendDirection::Unknown => "unknown (too few rounds)",
    };
    println!("Trend: {}", trend_label);
    println!(
        "Next cutoff estimate: {} +/- {} ({:?} confidence)",
        prediction.predicted_cutoff, prediction.margin, prediction.confidence
    );

    let Some(score) = user_score else {
        return;
    };

    let comparison = compare_user_score(score, draws);
    println!(
        "\nScore {} would have cleared {}/{} rounds ({}th percentile)",
        score, comparison.draws_cleared, comparison.total_draws, comparison.percentile
    );
    if comparison.average_gap_to_missed > 0.0 {
        println!(
            "Average gap to missed rounds: {:.1} points",
            comparison.average_gap_to_missed
        );
    }
    for category in &comparison.categories {
        println!(
            "- {}: {} round(s), avg cutoff {:.0}, chance {:?}",
            category.category, category.draws, category.average_cutoff, category.chance
        );
    }

    println!("Alerts:");
    for alert in generate_draw_alerts(score, draws) {
        let tag = match alert.kind {
            AlertKind::Opportunity => "opportunity",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
        };
        println!("- [{}] {}", tag, alert.message);
    }
}

fn sample_draw_history() -> Vec<DrawRecord> {
    let rounds = [
        ("2025-05-12", 504, 3_250, "general"),
        ("2025-04-28", 508, 3_250, "general"),
        ("2025-04-14", 512, 3_000, "general"),
        ("2025-04-02", 516, 1_280, "trades"),
        ("2025-03-21", 521, 7_500, "general"),
        ("2025-03-06", 525, 4_500, "general"),
        ("2025-02-20", 529, 4_500, "general"),
        ("2025-02-06", 535, 3_500, "general"),
    ];

    rounds
        .iter()
        .filter_map(|(date, cutoff, invitations, category)| {
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .map(|draw_date| DrawRecord {
                    draw_date,
                    crs_minimum: *cutoff,
                    invitations_issued: *invitations,
                    category: category.to_string(),
                })
        })
        .collect()
}
