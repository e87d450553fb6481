use std::io::Cursor;
use visascope::scoring::draws::{
    analyze_draw_history, compare_user_score, generate_draw_alerts, import::DrawHistoryImporter,
    predict_next_draw, AlertKind, Confidence, TrendDirection,
};

const HISTORY: &str = "Draw Date,CRS Minimum,Invitations,Category\n\
2025-01-08,541,1500,general\n\
2025-01-23,538,4000,general\n\
2025-02-06,535,3500,general\n\
2025-02-20,529,4500,general\n\
2025-03-06,525,4500,general\n\
2025-03-21,521,7500,general\n\
2025-04-02,516,1280,trades\n\
2025-04-14,512,3000,general\n\
2025-04-28,508,3250,general\n\
2025-05-12,504,3250,general\n";

#[test]
fn imported_history_flows_into_the_analysis() {
    let draws = DrawHistoryImporter::from_reader(Cursor::new(HISTORY)).expect("import succeeds");
    assert_eq!(draws.len(), 10);
    // Importer guarantees newest-first regardless of file order.
    assert_eq!(draws[0].crs_minimum, 504);
    assert_eq!(draws[9].crs_minimum, 541);

    let analysis = analyze_draw_history(&draws);
    assert_eq!(analysis.sample_size, 10);
    assert_eq!(analysis.minimum_cutoff, 504);
    assert_eq!(analysis.maximum_cutoff, 541);
    assert_eq!(analysis.trend, TrendDirection::Falling);
}

#[test]
fn prediction_tracks_the_recent_window_of_a_falling_series() {
    let draws = DrawHistoryImporter::from_reader(Cursor::new(HISTORY)).expect("import succeeds");
    let prediction = predict_next_draw(&draws);

    assert_eq!(prediction.trend, TrendDirection::Falling);
    assert_eq!(prediction.sample_size, 10);
    // Recent six average 514.33, nudged down by the falling trend.
    assert_eq!(prediction.predicted_cutoff, 512);
    assert!(prediction.margin >= 5);
    // Ten rounds with modest variance is enough for a confident call.
    assert_eq!(prediction.confidence, Confidence::High);
}

#[test]
fn long_stable_history_earns_high_confidence() {
    let mut csv = String::from("Draw Date,CRS Minimum,Invitations,Category\n");
    for day in 1..=12 {
        csv.push_str(&format!("2025-{:02}-01,520,3000,general\n", (day % 12) + 1));
    }
    let draws = DrawHistoryImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    let prediction = predict_next_draw(&draws);
    assert_eq!(prediction.confidence, Confidence::High);
    assert_eq!(prediction.predicted_cutoff, 520);
    assert_eq!(prediction.margin, 5);
}

#[test]
fn comparison_reports_cleared_share_and_category_outlook() {
    let draws = DrawHistoryImporter::from_reader(Cursor::new(HISTORY)).expect("import succeeds");
    let comparison = compare_user_score(525, &draws);

    assert_eq!(comparison.total_draws, 10);
    assert_eq!(comparison.draws_cleared, 6);
    assert_eq!(comparison.percentile, 60);
    assert!(comparison.average_gap_to_missed > 0.0);
    assert_eq!(comparison.categories.len(), 2);
    let trades = comparison
        .categories
        .iter()
        .find(|category| category.category == "trades")
        .expect("trades category present");
    assert_eq!(trades.draws, 1);
    assert!((trades.average_cutoff - 516.0).abs() < f64::EPSILON);
}

#[test]
fn alerts_open_with_an_opportunity_for_a_clearing_score() {
    let draws = DrawHistoryImporter::from_reader(Cursor::new(HISTORY)).expect("import succeeds");
    let alerts = generate_draw_alerts(545, &draws);

    assert!(!alerts.is_empty());
    assert_eq!(alerts[0].kind, AlertKind::Opportunity);
    // Falling trend adds a second opportunity; order stays by priority.
    assert!(alerts.windows(2).all(|pair| pair[0].kind <= pair[1].kind));
    assert!(alerts
        .iter()
        .any(|alert| alert.message.contains("trending downward")));
}

#[test]
fn trailing_score_gets_a_warning_with_the_gap_spelled_out() {
    let draws = DrawHistoryImporter::from_reader(Cursor::new(HISTORY)).expect("import succeeds");
    let alerts = generate_draw_alerts(450, &draws);
    assert!(alerts
        .iter()
        .any(|alert| alert.kind == AlertKind::Warning && alert.message.contains("trails")));
}
