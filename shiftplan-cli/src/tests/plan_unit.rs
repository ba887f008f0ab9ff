//! Focused unit tests covering plan configuration and request loading.

use super::helpers::{FallbackNamer, FixedNamer, MORNING_SHIFT, workspace, write_utf8};
use super::*;
use crate::plan::{
    DEFAULT_SEED, NamerBuilder, NominatimNamerBuilder, PlanArgs, PlanConfig,
    config_from_layers_for_test, load_shift, name_stops,
};
use camino::Utf8PathBuf;
use rstest::rstest;
use shiftplan_core::geometry::lat_lng;
use shiftplan_core::{BreakWindow, ShiftError, Stop, TimeOfDay};
use shiftplan_data::BlockingGeocoder;
use shiftplan_data::geocoding::test_support::StubGeocoder;
use shiftplan_data::GeocodeError;
use shiftplan_planner::{RadialCandidates, SelectionStrategy};

fn config(request_path: Utf8PathBuf) -> PlanConfig {
    PlanConfig {
        request_path,
        seed: 7,
        candidates: 4,
        strategy: SelectionStrategy::BestScore,
        max_stops: Some(6),
        nominatim_url: None,
        output: None,
    }
}

#[rstest]
fn converting_plan_without_request_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(env, ENV_PLAN_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("shift.json")),
        nominatim_url: Some("   ".to_owned()),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.candidates, RadialCandidates::DEFAULT_COUNT);
    assert_eq!(config.strategy, SelectionStrategy::BestScore);
    assert_eq!(config.max_stops, None);
    assert_eq!(config.nominatim_url, None);
}

#[rstest]
#[case("nearest", SelectionStrategy::Nearest)]
#[case("best-score", SelectionStrategy::BestScore)]
fn plan_config_parses_strategy(#[case] name: &str, #[case] expected: SelectionStrategy) {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("shift.json")),
        strategy: Some(name.to_owned()),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.strategy, expected);
}

#[rstest]
fn unknown_strategy_is_rejected() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("shift.json")),
        strategy: Some("random".to_owned()),
        ..PlanArgs::default()
    };
    let err = PlanConfig::try_from(args).expect_err("unknown strategy should error");
    assert!(matches!(err, CliError::InvalidStrategy(_)), "found {err:?}");
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, root) = workspace();
    let err = config(root.join("absent.json"))
        .validate_sources()
        .expect_err("missing request should fail");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_PLAN_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, root) = workspace();
    let request_path = root.join("shift.json");
    std::fs::create_dir(&request_path).expect("request directory");

    let err = config(request_path.clone())
        .validate_sources()
        .expect_err("directory should fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_shift_decodes_and_validates() {
    let (_tmp, root) = workspace();
    let request_path = root.join("shift.json");
    write_utf8(&request_path, MORNING_SHIFT.as_bytes());

    let shift = load_shift(&request_path).expect("request should load");
    assert_eq!(shift.window().start_hour, 8);
    assert_eq!(shift.window().end_hour, 12);
    assert_eq!(shift.breaks().windows(), &[BreakWindow::new(10, 11)]);
}

#[rstest]
fn load_shift_rejects_invalid_json() {
    let (_tmp, root) = workspace();
    let request_path = root.join("shift.json");
    write_utf8(&request_path, b"{ not valid json");

    let err = load_shift(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParseShiftRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_shift_rejects_inverted_window() {
    let (_tmp, root) = workspace();
    let request_path = root.join("shift.json");
    write_utf8(
        &request_path,
        br#"{ "start": { "lat": 1.3, "lng": 103.8 }, "start_hour": 18, "end_hour": 9 }"#,
    );

    let err = load_shift(&request_path).expect_err("inverted window should error");
    match err {
        CliError::InvalidShiftRequest { source, .. } => {
            assert!(matches!(source, ShiftError::InvalidWindow { .. }));
        }
        other => panic!("expected InvalidShiftRequest, found {other:?}"),
    }
}

#[rstest]
fn load_shift_io_error_returns_open_error() {
    let (_tmp, root) = workspace();
    let request_path = root.join("shift.json");

    let err = load_shift(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenShiftRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenShiftRequest, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "seed": "not a number" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "seed": 1,
            "strategy": "nearest",
            "nominatim_url": "http://from-file:8080",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "seed": 2,
    }));
    composer.push_cli(json!({ "seed": 3 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.seed, 3);
    assert_eq!(config.strategy, SelectionStrategy::Nearest);
    assert_eq!(config.nominatim_url.as_deref(), Some("http://from-file:8080"));
}

fn sample_stops() -> Vec<Stop> {
    let here = lat_lng(1.2840, 103.8510);
    vec![
        Stop::pickup(here, TimeOfDay::from_hour(8), 0),
        Stop::dropoff(here, TimeOfDay::from_hm(8, 20), 9.5, 1),
    ]
}

#[rstest]
fn name_stops_labels_every_stop() {
    let mut stops = sample_stops();
    name_stops(&FixedNamer("Raffles Place"), &mut stops);
    assert!(stops
        .iter()
        .all(|stop| stop.location_name.as_deref() == Some("Raffles Place")));
}

#[rstest]
fn name_stops_numbers_fallbacks_from_one() {
    let mut stops = sample_stops();
    name_stops(&FallbackNamer, &mut stops);
    let names: Vec<_> = stops.iter().filter_map(|s| s.location_name.clone()).collect();
    assert_eq!(names, ["Location 1", "Location 2"]);
}

#[rstest]
fn failing_geocoder_falls_back_per_stop() {
    let geocoder = BlockingGeocoder::new(StubGeocoder::failing(GeocodeError::NotFound {
        query: "1.28,103.85".to_owned(),
    }))
    .expect("runtime");
    let mut stops = sample_stops();
    name_stops(&geocoder, &mut stops);
    assert_eq!(
        stops.get(1).and_then(|s| s.location_name.as_deref()),
        Some("Location 2")
    );
    assert_eq!(geocoder.inner().calls(), 2);
}

#[rstest]
fn nominatim_builder_is_disabled_without_url() {
    let built = NominatimNamerBuilder
        .build(&config(Utf8PathBuf::from("shift.json")))
        .expect("no geocoder needed");
    assert!(built.is_none());
}

#[rstest]
fn nominatim_builder_rejects_invalid_url() {
    let mut cfg = config(Utf8PathBuf::from("shift.json"));
    cfg.nominatim_url = Some("not a url".to_owned());
    let Err(err) = NominatimNamerBuilder.build(&cfg) else {
        panic!("invalid URL should fail");
    };
    assert!(matches!(err, CliError::BuildGeocoder { .. }), "found {err:?}");
}
