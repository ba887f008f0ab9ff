//! Error types emitted by the shiftplan CLI.
//!
//! Keep this type small; most helpers return `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use shiftplan_core::ShiftError;
use shiftplan_data::GeocoderBuildError;
use shiftplan_planner::{PlanningError, UnknownStrategy};
use thiserror::Error;

/// Errors emitted by the shiftplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The selection strategy name is not recognised.
    #[error(transparent)]
    InvalidStrategy(#[from] UnknownStrategy),
    /// Opening the shift request file failed.
    #[error("failed to open shift request at {path:?}: {source}")]
    OpenShiftRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Shift request JSON could not be decoded.
    #[error("failed to parse shift request JSON at {path:?}: {source}")]
    ParseShiftRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The shift request failed validation.
    #[error("shift request in {path:?} failed validation: {source}")]
    InvalidShiftRequest {
        path: Utf8PathBuf,
        #[source]
        source: ShiftError,
    },
    /// The planner rejected the shift.
    #[error("planning failed: {source}")]
    Plan {
        #[source]
        source: PlanningError,
    },
    /// Constructing the geocoder failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        base_url: String,
        #[source]
        source: GeocoderBuildError,
    },
    /// Serialising the plan failed.
    #[error("failed to serialise plan output: {0}")]
    SerialisePlanOutput(#[source] serde_json::Error),
    /// Writing the plan failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
