use crate::infra::{default_portugal_policy, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use visascope::error::AppError;
use visascope::scoring::australia::{
    calculate_points, AustraliaProfile, AustraliaQualification, AustraliaScore, NominationStream,
    PartnerStatus, PASS_MARK,
};
use visascope::scoring::canada::{
    calculate_crs, AdditionalQualifications, CanadaProfile, CrsScore, EducationLevel,
};
use visascope::scoring::draws::{
    analyze_draw_history, compare_user_score, generate_draw_alerts, import::DrawHistoryImporter,
    predict_next_draw, DrawAlert, DrawAnalysis, DrawPrediction, ScoreComparison,
};
use visascope::scoring::language::{ClbScores, LanguageTestScore};
use visascope::scoring::portugal::{
    match_visas, PortugalPolicy, PortugalProfile, VisaMatch, VisaQuestionnaire,
};

/// Canada intake. Language results arrive as raw test scores and are
/// normalized to CLB before scoring.
#[derive(Debug, Deserialize)]
pub(crate) struct CanadaScoreRequest {
    pub(crate) age: u8,
    pub(crate) education: EducationLevel,
    pub(crate) first_language: LanguageTestScore,
    #[serde(default)]
    pub(crate) second_language: Option<LanguageTestScore>,
    #[serde(default)]
    pub(crate) first_language_is_french: bool,
    #[serde(default)]
    pub(crate) canadian_experience_years: u8,
    #[serde(default)]
    pub(crate) foreign_experience_years: u8,
    #[serde(default)]
    pub(crate) spouse: Option<SpouseRequest>,
    #[serde(default)]
    pub(crate) additional: AdditionalQualifications,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpouseRequest {
    #[serde(default)]
    pub(crate) education: Option<EducationLevel>,
    #[serde(default)]
    pub(crate) language: Option<LanguageTestScore>,
    #[serde(default)]
    pub(crate) canadian_experience_years: u8,
}

#[derive(Debug, Serialize)]
pub(crate) struct CanadaScoreResponse {
    pub(crate) normalized_first_language: ClbScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) normalized_second_language: Option<ClbScores>,
    pub(crate) score: CrsScore,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AustraliaScoreRequest {
    pub(crate) age: u8,
    pub(crate) english: LanguageTestScore,
    #[serde(default)]
    pub(crate) overseas_experience_years: u8,
    #[serde(default)]
    pub(crate) australian_experience_years: u8,
    pub(crate) qualification: AustraliaQualification,
    #[serde(default)]
    pub(crate) australian_study: bool,
    #[serde(default)]
    pub(crate) specialist_qualification: bool,
    #[serde(default)]
    pub(crate) partner: PartnerStatus,
    #[serde(default)]
    pub(crate) nomination: Option<NominationStream>,
    #[serde(default)]
    pub(crate) credentialled_community_language: bool,
    #[serde(default)]
    pub(crate) professional_year: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AustraliaScoreResponse {
    pub(crate) normalized_english: ClbScores,
    pub(crate) pass_mark: u16,
    pub(crate) meets_pass_mark: bool,
    pub(crate) score: AustraliaScore,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PortugalMatchRequest {
    pub(crate) questionnaire: VisaQuestionnaire,
    pub(crate) profile: PortugalProfile,
    /// Policy override for retuned wage baselines or thresholds.
    #[serde(default)]
    pub(crate) policy: Option<PortugalPolicy>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DrawReportRequest {
    /// Draw history CSV with `Draw Date` and `CRS Minimum` columns.
    pub(crate) csv: String,
    /// When present, the report includes a comparison and alerts for this score.
    #[serde(default)]
    pub(crate) user_score: Option<u16>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DrawReportResponse {
    pub(crate) analysis: DrawAnalysis,
    pub(crate) prediction: DrawPrediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) comparison: Option<ScoreComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) alerts: Option<Vec<DrawAlert>>,
}

pub(crate) fn app_router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/canada/score",
            axum::routing::post(canada_score_endpoint),
        )
        .route(
            "/api/v1/australia/score",
            axum::routing::post(australia_score_endpoint),
        )
        .route(
            "/api/v1/portugal/match",
            axum::routing::post(portugal_match_endpoint),
        )
        .route(
            "/api/v1/draws/report",
            axum::routing::post(draw_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn canada_score_endpoint(
    Json(payload): Json<CanadaScoreRequest>,
) -> Result<Json<CanadaScoreResponse>, AppError> {
    let normalized_first_language = payload.first_language.normalized();
    let normalized_second_language = payload
        .second_language
        .map(|test| test.normalized());

    let profile = CanadaProfile {
        age: payload.age,
        education: payload.education,
        first_language: normalized_first_language,
        second_language: normalized_second_language,
        first_language_is_french: payload.first_language_is_french,
        canadian_experience_years: payload.canadian_experience_years,
        foreign_experience_years: payload.foreign_experience_years,
        spouse: payload.spouse.map(|spouse| {
            visascope::scoring::canada::SpouseProfile {
                education: spouse.education,
                language: spouse.language.map(|test| test.normalized()),
                canadian_experience_years: spouse.canadian_experience_years,
            }
        }),
        additional: payload.additional,
    };

    Ok(Json(CanadaScoreResponse {
        normalized_first_language,
        normalized_second_language,
        score: calculate_crs(&profile),
    }))
}

pub(crate) async fn australia_score_endpoint(
    Json(payload): Json<AustraliaScoreRequest>,
) -> Result<Json<AustraliaScoreResponse>, AppError> {
    let normalized_english = payload.english.normalized();

    let profile = AustraliaProfile {
        age: payload.age,
        english: normalized_english,
        overseas_experience_years: payload.overseas_experience_years,
        australian_experience_years: payload.australian_experience_years,
        qualification: payload.qualification,
        australian_study: payload.australian_study,
        specialist_qualification: payload.specialist_qualification,
        partner: payload.partner,
        nomination: payload.nomination,
        credentialled_community_language: payload.credentialled_community_language,
        professional_year: payload.professional_year,
    };

    let score = calculate_points(&profile);
    Ok(Json(AustraliaScoreResponse {
        normalized_english,
        pass_mark: PASS_MARK,
        meets_pass_mark: score.meets_pass_mark(),
        score,
    }))
}

pub(crate) async fn portugal_match_endpoint(
    Json(payload): Json<PortugalMatchRequest>,
) -> Result<Json<VisaMatch>, AppError> {
    let policy = payload.policy.unwrap_or_else(default_portugal_policy);
    let matched = match_visas(&payload.questionnaire, &payload.profile, &policy);
    Ok(Json(matched))
}

pub(crate) async fn draw_report_endpoint(
    Json(payload): Json<DrawReportRequest>,
) -> Result<Json<DrawReportResponse>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let draws = DrawHistoryImporter::from_reader(reader)?;

    let analysis = analyze_draw_history(&draws);
    let prediction = predict_next_draw(&draws);
    let (comparison, alerts) = match payload.user_score {
        Some(score) => (
            Some(compare_user_score(score, &draws)),
            Some(generate_draw_alerts(score, &draws)),
        ),
        None => (None, None),
    };

    Ok(Json(DrawReportResponse {
        analysis,
        prediction,
        comparison,
        alerts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use visascope::scoring::draws::TrendDirection;
    use visascope::scoring::language::{AbilityScores, TestType};
    use visascope::scoring::portugal::EligibilityStatus;

    fn ielts(uniform: f32) -> LanguageTestScore {
        LanguageTestScore {
            test: TestType::Ielts,
            scores: AbilityScores::uniform(uniform),
        }
    }

    #[tokio::test]
    async fn canada_endpoint_normalizes_before_scoring() {
        let request = CanadaScoreRequest {
            age: 28,
            education: EducationLevel::Bachelor,
            first_language: LanguageTestScore {
                test: TestType::Ielts,
                scores: AbilityScores {
                    speaking: 7.0,
                    listening: 8.0,
                    reading: 7.0,
                    writing: 7.0,
                },
            },
            second_language: None,
            first_language_is_french: false,
            canadian_experience_years: 2,
            foreign_experience_years: 0,
            spouse: None,
            additional: AdditionalQualifications::default(),
        };

        let Json(body) = canada_score_endpoint(Json(request))
            .await
            .expect("score computes");

        assert_eq!(body.normalized_first_language, ClbScores::uniform(9));
        assert_eq!(body.score.total, 457);
    }

    #[tokio::test]
    async fn australia_endpoint_reports_the_pass_mark() {
        let request = AustraliaScoreRequest {
            age: 28,
            english: ielts(8.5),
            overseas_experience_years: 0,
            australian_experience_years: 3,
            qualification: AustraliaQualification::BachelorOrMaster,
            australian_study: false,
            specialist_qualification: false,
            partner: PartnerStatus::SingleOrCitizenPartner,
            nomination: Some(NominationStream::State),
            credentialled_community_language: false,
            professional_year: false,
        };

        let Json(body) = australia_score_endpoint(Json(request))
            .await
            .expect("score computes");

        assert_eq!(body.pass_mark, PASS_MARK);
        assert_eq!(body.score.total, 90);
        assert!(body.meets_pass_mark);
    }

    #[tokio::test]
    async fn portugal_endpoint_ranks_recommendations() {
        let request = PortugalMatchRequest {
            questionnaire: VisaQuestionnaire {
                remote_worker: true,
                employer_outside_portugal: true,
                monthly_income_eur: 3600,
                ..VisaQuestionnaire::default()
            },
            profile: PortugalProfile {
                monthly_income_eur: 3600,
                passive_income_eur: 0,
                savings_eur: 20_000,
                remote_worker: true,
                employer_country: Some("Spain".to_string()),
                business: None,
                adult_dependents: 0,
                child_dependents: 0,
                has_accommodation: true,
                has_health_insurance: true,
                clean_criminal_record: true,
            },
            policy: None,
        };

        let Json(body) = portugal_match_endpoint(Json(request))
            .await
            .expect("match computes");

        assert_eq!(body.recommendations.len(), 1);
        assert_eq!(
            body.recommendations[0].result.status,
            EligibilityStatus::Eligible
        );
    }

    #[tokio::test]
    async fn draw_endpoint_builds_a_full_report() {
        let request = DrawReportRequest {
            csv: "Draw Date,CRS Minimum,Invitations,Category\n\
2025-05-12,504,3250,general\n\
2025-04-28,508,3250,general\n\
2025-04-14,512,3000,general\n\
2025-03-21,521,7500,general\n"
                .to_string(),
            user_score: Some(510),
        };

        let Json(body) = draw_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.analysis.sample_size, 4);
        assert_eq!(body.analysis.trend, TrendDirection::Falling);
        assert!(body.prediction.predicted_cutoff > 0);
        let comparison = body.comparison.expect("comparison returned");
        assert_eq!(comparison.draws_cleared, 2);
        assert!(body.alerts.expect("alerts returned").len() >= 1);
    }

    #[tokio::test]
    async fn draw_endpoint_rejects_malformed_csv() {
        let request = DrawReportRequest {
            csv: "Draw Date,CRS Minimum\nnot-a-date,522\n".to_string(),
            user_score: None,
        };

        let error = draw_report_endpoint(Json(request))
            .await
            .expect_err("import fails");
        assert!(matches!(error, AppError::DrawImport(_)));
    }
}
