//! Resolution of layered options and JSON output of both subcommands.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use darksky_core::test_support::{
    MUNICH, StubFeatureLookup, StubGeocoder, bavaria_bounds, sparse_grid,
};
use darksky_core::{CellIndex, SpotFinder};
use darksky_data::nominatim::DEFAULT_NOMINATIM_URL;
use darksky_data::overpass::DEFAULT_OVERPASS_URL;
use geo::Coord;
use ortho_config::MergeComposer;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::NamedTempFile;

use super::*;
use crate::search::{
    BandsConfig, DEFAULT_COUNT, DEFAULT_MAX_DISTANCE_KM, SpotsConfig, run_bands_with,
    run_spots_with, spots_config_from_layers_for_test,
};
use crate::services::{ServiceConfig, ServiceOptions};

#[fixture]
fn spots_args() -> SpotsArgs {
    SpotsArgs {
        lat: Some(MUNICH.y),
        lng: Some(MUNICH.x),
        raster: Some(Utf8PathBuf::from("brightness.json")),
        ..SpotsArgs::default()
    }
}

#[fixture]
fn services() -> ServiceConfig {
    ServiceConfig {
        raster: Utf8PathBuf::from("brightness.json"),
        overpass_url: DEFAULT_OVERPASS_URL.to_owned(),
        nominatim_url: DEFAULT_NOMINATIM_URL.to_owned(),
        lookup_timeout: Duration::from_secs(5),
    }
}

fn stub_finder(cells: &[(CellIndex, u8)]) -> SpotFinder<StubFeatureLookup, StubGeocoder> {
    let grid = sparse_grid(bavaria_bounds(), 0.1, cells).expect("valid raster");
    SpotFinder::new(
        Arc::new(grid),
        StubFeatureLookup::parking_everywhere(),
        StubGeocoder::named("München, Bayern, Deutschland"),
    )
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "test uses float maths for assertions")]
fn spots_defaults_apply(spots_args: SpotsArgs) {
    let config = SpotsConfig::try_from(spots_args).expect("config resolves");
    assert_eq!(config.origin, MUNICH);
    assert!((config.max_distance_km - DEFAULT_MAX_DISTANCE_KM).abs() < f64::EPSILON);
    assert_eq!(config.count, DEFAULT_COUNT);
    assert_eq!(config.min_accessible, 1);
    assert_eq!(config.services.overpass_url, DEFAULT_OVERPASS_URL);
    assert_eq!(config.services.nominatim_url, DEFAULT_NOMINATIM_URL);
    assert_eq!(config.services.lookup_timeout, Duration::from_secs(5));
    assert_eq!(config.log_level, "warn");
}

#[rstest]
#[case::lat(SpotsArgs { lat: None, ..spots_args() }, ARG_LAT, ENV_SPOTS_LAT)]
#[case::lng(SpotsArgs { lng: None, ..spots_args() }, ARG_LNG, ENV_SPOTS_LNG)]
#[case::raster(SpotsArgs { raster: None, ..spots_args() }, ARG_RASTER, ENV_SPOTS_RASTER)]
fn spots_reports_missing_options(
    #[case] args: SpotsArgs,
    #[case] expected_field: &str,
    #[case] expected_env: &str,
) {
    let err = SpotsConfig::try_from(args).expect_err("missing option");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn bands_names_its_own_environment_variable() {
    let args = BandsArgs {
        lat: Some(MUNICH.y),
        lng: Some(MUNICH.x),
        ..BandsArgs::default()
    };
    let err = BandsConfig::try_from(args).expect_err("missing raster");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_RASTER);
            assert_eq!(env, ENV_BANDS_RASTER);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn negative_coordinates_parse_as_values() {
    let cli = Cli::try_parse_from([
        "darksky", "bands", "--lat", "-33.86", "--lng", "-70.65", "--raster", "chile.json",
    ])
    .expect("arguments parse");
    let Command::Bands(args) = cli.command else {
        panic!("expected bands subcommand");
    };
    assert_eq!(args.lat, Some(-33.86));
    assert_eq!(args.lng, Some(-70.65));
}

#[rstest]
fn service_options_override_defaults() {
    let config = ServiceConfig::resolve(
        ServiceOptions {
            raster: Some(Utf8PathBuf::from("r.json")),
            overpass_url: Some("http://overpass.local/api".to_owned()),
            nominatim_url: Some("http://nominatim.local".to_owned()),
            lookup_timeout_secs: Some(2),
        },
        ENV_SPOTS_RASTER,
    )
    .expect("options resolve");
    assert_eq!(config.overpass_url, "http://overpass.local/api");
    assert_eq!(config.nominatim_url, "http://nominatim.local");
    assert_eq!(config.search_config().lookup_timeout, Duration::from_secs(2));
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "raster": "from-file.json",
            "count": 7,
            "overpass_url": "http://from-file/api",
        }),
        None,
    );
    composer.push_environment(json!({
        "lat": 47.5,
        "lng": 11.1,
        "raster": "from-env.json",
    }));
    composer.push_cli(json!({ "raster": "from-cli.json" }));

    let config = spots_config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.origin, Coord { x: 11.1, y: 47.5 });
    assert_eq!(config.count, 7);
    assert_eq!(config.services.raster, Utf8PathBuf::from("from-cli.json"));
    assert_eq!(config.services.overpass_url, "http://from-file/api");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "count": "many" }));

    let err = spots_config_from_layers_for_test(composer.layers())
        .expect_err("invalid layer should fail");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
#[expect(clippy::indexing_slicing, reason = "Test uses known fixed index [0]")]
fn spots_output_is_pretty_json(spots_args: SpotsArgs) {
    let config = SpotsConfig::try_from(spots_args).expect("config resolves");
    let finder = stub_finder(&[
        (CellIndex { row: 18, col: 15 }, 5),
        (CellIndex { row: 17, col: 15 }, 2),
    ]);
    let mut buffer = Vec::new();
    run_spots_with(&config, &finder, &mut buffer).expect("search succeeds");

    let text = String::from_utf8(buffer).expect("UTF-8 output");
    assert!(text.ends_with('\n'));
    let document: Value = serde_json::from_str(&text).expect("valid JSON");
    let spots = document.as_array().expect("array of spots");
    assert_eq!(spots.len(), 2);
    assert_eq!(spots[0]["brightness_class"], 2);
    assert_eq!(spots[0]["score"], 9);
    assert_eq!(spots[0]["label"], "exceptional");
    assert_eq!(spots[0]["has_road_access"], true);
    assert_eq!(spots[0]["nearest_feature"]["kind"], "parking");
    assert!(spots[0].get("band").is_none());
}

#[rstest]
#[expect(clippy::indexing_slicing, reason = "Test uses known fixed index [0]")]
fn bands_output_carries_origin_name(services: ServiceConfig) {
    let config = BandsConfig {
        origin: MUNICH,
        services,
        log_level: "warn".to_owned(),
    };
    let finder = stub_finder(&[(CellIndex { row: 18, col: 15 }, 3)]);
    let mut buffer = Vec::new();
    run_bands_with(&config, &finder, &mut buffer).expect("search succeeds");

    let result: Value = serde_json::from_slice(&buffer).expect("valid JSON");
    assert_eq!(result["origin_name"], "München, Bayern, Deutschland");
    let spots = result["spots"].as_array().expect("array of spots");
    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0]["band"]["label"], "Nearby");
    assert!(spots[0]["combined_score"].is_number());
}

#[rstest]
fn invalid_origin_surfaces_as_search_error(spots_args: SpotsArgs) {
    let args = SpotsArgs {
        lat: Some(91.0),
        ..spots_args
    };
    let config = SpotsConfig::try_from(args).expect("config resolves");
    let finder = stub_finder(&[]);
    let err = run_spots_with(&config, &finder, &mut Vec::new()).expect_err("invalid origin");
    assert!(matches!(err, CliError::Search(_)), "found {err:?}");
}

#[rstest]
fn missing_raster_file_fails_to_load(services: ServiceConfig) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let raster = Utf8PathBuf::from_path_buf(dir.path().join("absent.json")).expect("UTF-8 path");
    let err = ServiceConfig { raster, ..services }
        .build_finder()
        .expect_err("missing raster");
    assert!(matches!(err, CliError::LoadRaster(_)), "found {err:?}");
}

#[rstest]
fn bad_service_url_is_reported(services: ServiceConfig) {
    let mut file = NamedTempFile::new().expect("temporary file");
    write!(
        file,
        r#"{{"resolution": 0.5,
            "bounds": {{"min_lat": 47.0, "max_lat": 48.0, "min_lng": 11.0, "max_lng": 12.0}},
            "cells": [[1, 2], [3, 4]]}}"#
    )
    .expect("write raster");
    let raster = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).expect("UTF-8 path");
    let err = ServiceConfig {
        raster,
        overpass_url: "not a url".to_owned(),
        ..services
    }
    .build_finder()
    .expect_err("invalid URL");
    match err {
        CliError::BuildProvider { service, url, .. } => {
            assert_eq!(service, "Overpass");
            assert_eq!(url, "not a url");
        }
        other => panic!("expected BuildProvider, found {other:?}"),
    }
}

#[rstest]
fn missing_argument_message_names_flag_and_env() {
    let err = CliError::MissingArgument {
        field: ARG_LAT,
        env: ENV_SPOTS_LAT,
    };
    assert_eq!(
        err.to_string(),
        "missing lat (set --lat or DARKSKY_CMDS_SPOTS_LAT)"
    );
}
