//! `plan` command: load a shift request, plan it, print the route as JSON.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use shiftplan_core::{ShiftParameters, ShiftRequest, Stop};
use shiftplan_data::{BlockingGeocoder, Geocoder, NominatimConfig, NominatimGeocoder};
use shiftplan_fs::{create_utf8_file, file_is_file, open_utf8_file};
use shiftplan_planner::summary::{PairingMode, RouteSummary, Trip, recover_trips};
use shiftplan_planner::{AutoPlanner, PlanningSession, RadialCandidates, SelectionStrategy};
use shiftplan_scorer::{CandidateScorer, SeededDemand};

use crate::{
    ARG_PLAN_CANDIDATES, ARG_PLAN_MAX_STOPS, ARG_PLAN_NOMINATIM_URL, ARG_PLAN_OUTPUT,
    ARG_PLAN_REQUEST, ARG_PLAN_SEED, ARG_PLAN_STRATEGY, CliError, ENV_PLAN_REQUEST,
};

/// Seed used when none is configured.
pub(crate) const DEFAULT_SEED: u64 = 42;

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a full shift without a human in the loop. The shift \
                 is read from a JSON-encoded ShiftRequest; candidate \
                 locations and demand are generated from the seed so runs \
                 are reproducible. Stop names are resolved through \
                 Nominatim when a base URL is configured.",
    about = "Plan a route for one shift"
)]
#[ortho_config(prefix = "SHIFTPLAN")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a ShiftRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Seed for candidate generation and simulated demand.
    #[arg(long = ARG_PLAN_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Number of candidates offered per stop.
    #[arg(long = ARG_PLAN_CANDIDATES, value_name = "n")]
    #[serde(default)]
    pub(crate) candidates: Option<usize>,
    /// Selection strategy: "best-score" or "nearest".
    #[arg(long = ARG_PLAN_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// Stop cap per route.
    #[arg(long = ARG_PLAN_MAX_STOPS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_stops: Option<usize>,
    /// Base URL of a Nominatim instance used to name stops.
    #[arg(long = ARG_PLAN_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// Write the plan here instead of standard output.
    #[arg(long = ARG_PLAN_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) seed: u64,
    pub(crate) candidates: usize,
    pub(crate) strategy: SelectionStrategy,
    pub(crate) max_stops: Option<usize>,
    pub(crate) nominatim_url: Option<String>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_PLAN_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let strategy = args
            .strategy
            .as_deref()
            .map(str::parse::<SelectionStrategy>)
            .transpose()?
            .unwrap_or_default();
        let nominatim_url = args.nominatim_url.filter(|url| !url.trim().is_empty());
        Ok(Self {
            request_path,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            candidates: args.candidates.unwrap_or(RadialCandidates::DEFAULT_COUNT),
            strategy,
            max_stops: args.max_stops,
            nominatim_url,
            output: args.output,
        })
    }
}

/// Labels a stop, falling back to `fallback` when no name is known.
pub(crate) trait StopNamer {
    fn name(&self, stop: &Stop, fallback: &str) -> String;
}

impl<G: Geocoder> StopNamer for BlockingGeocoder<G> {
    fn name(&self, stop: &Stop, fallback: &str) -> String {
        self.resolve_name_or(stop.location, fallback)
    }
}

/// Builds the stop namer for the current invocation, if naming is enabled.
pub(crate) trait NamerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Option<Box<dyn StopNamer>>, CliError>;
}

pub(crate) struct NominatimNamerBuilder;

impl NamerBuilder for NominatimNamerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Option<Box<dyn StopNamer>>, CliError> {
        let Some(base_url) = config.nominatim_url.as_deref() else {
            return Ok(None);
        };
        let wrap = |source| CliError::BuildGeocoder {
            base_url: base_url.to_owned(),
            source,
        };
        let geocoder = NominatimGeocoder::with_config(NominatimConfig::new(base_url)).map_err(wrap)?;
        let blocking = BlockingGeocoder::new(geocoder).map_err(wrap)?;
        Ok(Some(Box::new(blocking)))
    }
}

/// JSON document printed by the `plan` command.
#[derive(Debug, Serialize)]
pub(crate) struct PlanOutput {
    pub(crate) stops: Vec<Stop>,
    pub(crate) summary: RouteSummary,
    pub(crate) trips: Vec<Trip>,
    pub(crate) pairing: PairingMode,
}

impl PlanOutput {
    fn new(stops: Vec<Stop>, summary: RouteSummary) -> Self {
        let recovered = recover_trips(&stops);
        Self {
            stops,
            summary,
            trips: recovered.trips,
            pairing: recovered.mode,
        }
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &NominatimNamerBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    namer: &dyn NamerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let output = execute_plan(&config, namer)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(CliError::WritePlanOutput)?;
            write_plan_output(&mut file, &output)
        }
        None => write_plan_output(writer, &output),
    }
}

fn execute_plan(config: &PlanConfig, namer: &dyn NamerBuilder) -> Result<PlanOutput, CliError> {
    let shift = load_shift(&config.request_path)?;
    info!(
        "planning shift from hour {} to {} with seed {}",
        shift.window().start_hour,
        shift.window().end_hour,
        config.seed
    );
    let mut planner = AutoPlanner::new(
        CandidateScorer::new(SeededDemand::new(config.seed)),
        RadialCandidates::new(config.seed).with_count(config.candidates),
    )
    .with_strategy(config.strategy);
    if let Some(max_stops) = config.max_stops {
        planner = planner.with_max_stops(max_stops);
    }

    let mut session = PlanningSession::new();
    let archived = planner
        .plan(&mut session, shift)
        .map_err(|source| CliError::Plan { source })?;
    let mut stops = archived.route().stops().to_vec();
    let summary = archived.summary().clone();

    if let Some(namer) = namer.build(config)? {
        name_stops(namer.as_ref(), &mut stops);
    }
    Ok(PlanOutput::new(stops, summary))
}

/// Label every stop, numbering fallbacks from one.
pub(crate) fn name_stops(namer: &dyn StopNamer, stops: &mut [Stop]) {
    for (index, stop) in stops.iter_mut().enumerate() {
        let fallback = format!("Location {}", index + 1);
        stop.location_name = Some(namer.name(stop, &fallback));
    }
}

/// Load and validate a JSON-encoded [`ShiftRequest`].
pub(crate) fn load_shift(path: &Utf8Path) -> Result<ShiftParameters, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenShiftRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let request: ShiftRequest =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseShiftRequest {
                path: path.to_path_buf(),
                source,
            }
        })?;
    request
        .validate()
        .map_err(|source| CliError::InvalidShiftRequest {
            path: path.to_path_buf(),
            source,
        })
}

fn write_plan_output(writer: &mut dyn Write, output: &PlanOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialisePlanOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
