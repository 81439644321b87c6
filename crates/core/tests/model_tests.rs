use chrono::NaiveDate;
use courtside_core::models::filter::{
    BarFilter, Bucket, Context, Dimension, Metric, PaceType, Tier,
};
use courtside_core::models::reconciliation::{
    values_match, BarGamesResponse, ReconciliationResult, MATCH_TOLERANCE,
};
use courtside_core::models::record::{DetailRecord, ThreePointLine};
use courtside_core::models::series::{AxisBounds, Direction, NumericSeries};
use courtside_core::models::settings::ClientSettings;
use courtside_core::errors::CoreError;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn record(game_id: &str, team_pts: u32, opp_pts: u32) -> DetailRecord {
    DetailRecord {
        game_id: game_id.to_string(),
        game_date: d(2025, 1, 10),
        is_home: true,
        opponent_abbr: "BOS".to_string(),
        team_pts,
        opp_pts,
        total_points: None,
        three_pt: None,
        turnovers: None,
        pace_value: None,
        opponent_rank: None,
    }
}

fn pace_filter(bucket: Bucket) -> BarFilter {
    BarFilter::new(
        1610612747,
        Metric::Scoring,
        Dimension::PaceBucket { bucket },
        Context::Home,
        PaceType::Actual,
        "2024-25",
        112.4,
    )
}

// ═══════════════════════════════════════════════════════════════════
//  BarFilter / Dimension
// ═══════════════════════════════════════════════════════════════════

mod bar_filter {
    use super::*;

    #[test]
    fn pace_bucket_carries_bucket_only() {
        let dim = Dimension::PaceBucket { bucket: Bucket::Fast };
        assert_eq!(dim.bucket(), Some(Bucket::Fast));
        assert_eq!(dim.tier(), None);
    }

    #[test]
    fn tiered_dimensions_carry_tier_only() {
        for dim in [
            Dimension::DefenseTier { tier: Tier::Elite },
            Dimension::ThreePtDefTier { tier: Tier::Elite },
            Dimension::PressureTier { tier: Tier::Elite },
        ] {
            assert_eq!(dim.tier(), Some(Tier::Elite));
            assert_eq!(dim.bucket(), None);
        }
    }

    #[test]
    fn query_params_use_bucket_for_pace() {
        let params = pace_filter(Bucket::Slow).query_params();
        assert!(params.contains(&("bucket", "slow".to_string())));
        assert!(params.iter().all(|(k, _)| *k != "tier"));
        assert!(params.contains(&("dimension", "pace_bucket".to_string())));
    }

    #[test]
    fn query_params_use_tier_otherwise() {
        let filter = BarFilter::new(
            7,
            Metric::ThreePt,
            Dimension::ThreePtDefTier { tier: Tier::Bad },
            Context::Away,
            PaceType::Projected,
            "2024-25",
            36.0,
        );
        let params = filter.query_params();
        assert!(params.contains(&("tier", "bad".to_string())));
        assert!(params.iter().all(|(k, _)| *k != "bucket"));
        assert!(params.contains(&("metric", "threept".to_string())));
        assert!(params.contains(&("dimension", "threept_def_tier".to_string())));
        assert!(params.contains(&("context", "away".to_string())));
        assert!(params.contains(&("pace_type", "projected".to_string())));
        assert!(params.contains(&("season", "2024-25".to_string())));
    }

    #[test]
    fn exactly_one_selector_param() {
        let filter = pace_filter(Bucket::Normal);
        let selectors = filter
            .query_params()
            .iter()
            .filter(|(k, _)| *k == "bucket" || *k == "tier")
            .count();
        assert_eq!(selectors, 1);
    }

    #[test]
    fn serializes_flat_with_dimension_tag() {
        let json = serde_json::to_value(pace_filter(Bucket::Fast)).unwrap();
        assert_eq!(json["dimension"], "pace_bucket");
        assert_eq!(json["bucket"], "fast");
        assert!(json.get("tier").is_none());
        assert_eq!(json["metric"], "scoring");
    }

    #[test]
    fn deserializes_tiered_filter() {
        let json = r#"{
            "team_id": 5,
            "metric": "turnovers",
            "dimension": "pressure_tier",
            "tier": "low",
            "context": "home",
            "pace_type": "actual",
            "season": "2023-24",
            "displayed_value": 13.1
        }"#;
        let filter: BarFilter = serde_json::from_str(json).unwrap();
        assert_eq!(filter.dimension, Dimension::PressureTier { tier: Tier::Low });
        assert_eq!(filter.metric, Metric::Turnovers);
    }

    #[test]
    fn pace_dimension_without_bucket_is_rejected() {
        let json = r#"{
            "team_id": 5,
            "metric": "scoring",
            "dimension": "pace_bucket",
            "tier": "elite",
            "context": "home",
            "pace_type": "actual",
            "season": "2023-24",
            "displayed_value": 100.0
        }"#;
        assert!(serde_json::from_str::<BarFilter>(json).is_err());
    }

    #[test]
    fn same_bar_ignores_displayed_value() {
        let a = pace_filter(Bucket::Fast);
        let mut b = a.clone();
        b.displayed_value = 99.0;
        assert!(a.same_bar(&b));
        assert!(!a.same_bar(&pace_filter(Bucket::Slow)));
    }

    #[test]
    fn display_names_the_bar() {
        let text = pace_filter(Bucket::Fast).to_string();
        assert!(text.contains("pace_bucket[bucket=fast]"));
        assert!(text.contains("2024-25"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DetailRecord
// ═══════════════════════════════════════════════════════════════════

mod detail_record {
    use super::*;

    #[test]
    fn margin_and_win() {
        let win = record("g1", 112, 104);
        assert_eq!(win.margin(), 8);
        assert!(win.is_win());

        let loss = record("g2", 98, 101);
        assert_eq!(loss.margin(), -3);
        assert!(!loss.is_win());
    }

    #[test]
    fn combined_points_prefers_total() {
        let mut r = record("g1", 100, 90);
        assert_eq!(r.combined_points(), 190);
        r.total_points = Some(191);
        assert_eq!(r.combined_points(), 191);
    }

    #[test]
    fn combined_points_saturates() {
        let r = record("g1", u32::MAX, 5);
        assert_eq!(r.combined_points(), u32::MAX);
    }

    #[test]
    fn metric_values() {
        let mut r = record("g1", 110, 100);
        assert_eq!(r.metric_value(Metric::Scoring), Some(110.0));
        assert_eq!(r.metric_value(Metric::ThreePt), None);
        assert_eq!(r.metric_value(Metric::Turnovers), None);

        r.three_pt = Some(ThreePointLine {
            made: 14,
            attempted: 38,
            points: 42,
            pct: 36.8,
        });
        r.turnovers = Some(12);
        assert_eq!(r.metric_value(Metric::ThreePt), Some(42.0));
        assert_eq!(r.metric_value(Metric::Turnovers), Some(12.0));
    }

    #[test]
    fn result_label() {
        let mut r = record("g1", 112, 104);
        assert_eq!(r.result_label(), "W 112-104 vs BOS");
        r.is_home = false;
        r.team_pts = 90;
        assert_eq!(r.result_label(), "L 90-104 @ BOS");
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{
            "game_id": "0022400123",
            "game_date": "2025-01-10",
            "is_home": false,
            "opponent_abbr": "DEN",
            "team_pts": 120,
            "opp_pts": 115
        }"#;
        let r: DetailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.game_date, d(2025, 1, 10));
        assert!(r.three_pt.is_none());
        assert!(r.pace_value.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ReconciliationResult
// ═══════════════════════════════════════════════════════════════════

mod reconciliation_result {
    use super::*;

    #[test]
    fn tolerance_boundary_both_sides() {
        assert!(ReconciliationResult::new(vec![], 0, 10.19, None, 10.0).matches_displayed);
        assert!(!ReconciliationResult::new(vec![], 0, 10.21, None, 10.0).matches_displayed);
        assert!(!ReconciliationResult::new(vec![], 0, 9.79, None, 10.0).matches_displayed);
        assert!(ReconciliationResult::new(vec![], 0, 9.81, None, 10.0).matches_displayed);
    }

    #[test]
    fn tolerance_is_exclusive() {
        assert_eq!(MATCH_TOLERANCE, 0.2);
        assert!(!values_match(0.5, 0.0));
        assert!(values_match(0.0, 0.0));
    }

    #[test]
    fn discrepancy_is_signed() {
        let r = ReconciliationResult::new(vec![], 0, 101.5, None, 100.0);
        assert!((r.discrepancy() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn client_side_aggregate_averages_records() {
        let r = ReconciliationResult::new(
            vec![record("a", 100, 90), record("b", 110, 120), record("c", 120, 100)],
            3,
            110.0,
            None,
            110.0,
        );
        assert_eq!(r.client_side_aggregate(Metric::Scoring), Some(110.0));
        assert_eq!(r.client_side_aggregate(Metric::Turnovers), None);
        assert_eq!(r.wins(), 2);
        assert_eq!(r.losses(), 1);
        assert!(r.count_consistent());
    }

    #[test]
    fn count_mismatch_detected() {
        let r = ReconciliationResult::new(vec![record("a", 100, 90)], 2, 100.0, None, 100.0);
        assert!(!r.count_consistent());
    }

    #[test]
    fn envelope_defaults_missing_fields() {
        let resp: BarGamesResponse =
            serde_json::from_str(r#"{"success": false, "error": "No games"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.games.is_empty());
        assert_eq!(resp.bar_value, None);
        assert_eq!(resp.error.as_deref(), Some("No games"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Series models
// ═══════════════════════════════════════════════════════════════════

mod series_models {
    use super::*;

    #[test]
    fn from_newest_first_reverses() {
        let s = NumericSeries::from_newest_first(&[3.0, 2.0, 1.0]);
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.latest(), Some(3.0));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn empty_series() {
        let s = NumericSeries::default();
        assert!(s.is_empty());
        assert_eq!(s.latest(), None);
    }

    #[test]
    fn axis_bounds_span_and_contains() {
        let b = AxisBounds { min: 90.0, max: 120.0 };
        assert_eq!(b.span(), 30.0);
        assert!(b.contains(90.0));
        assert!(!b.contains(120.5));
    }

    #[test]
    fn direction_of_sign() {
        assert_eq!(Direction::of(0.4), Direction::Up);
        assert_eq!(Direction::of(-0.4), Direction::Down);
        assert_eq!(Direction::of(0.0), Direction::Flat);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ClientSettings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = ClientSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.timeout_secs, 30);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let s = ClientSettings::from_json(r#"{"base_url": "https://stats.example.com/api/"}"#)
            .unwrap();
        assert_eq!(s.timeout_secs, 30);
        assert_eq!(s.normalized_base_url(), "https://stats.example.com/api");
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = ClientSettings::from_json(r#"{"base_url": ""}"#).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let s = ClientSettings::with_base_url("ftp://stats.example.com");
        assert!(matches!(s.validate(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientSettings::from_json(r#"{"timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn malformed_json_is_deserialization_error() {
        let err = ClientSettings::from_json("{").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
