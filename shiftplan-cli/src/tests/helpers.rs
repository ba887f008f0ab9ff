//! Test helpers for writing shift requests and stub stop namers.

use super::*;
use crate::plan::{NamerBuilder, PlanConfig, StopNamer};
use camino::{Utf8Path, Utf8PathBuf};
use shiftplan_core::Stop;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// A morning shift from Raffles Place with a short break.
pub(super) const MORNING_SHIFT: &str = r#"{
    "start": { "lat": 1.2840, "lng": 103.8510 },
    "start_hour": 8,
    "end_hour": 12,
    "breaks": [{ "start_hour": 10, "end_hour": 11 }]
}"#;

/// Names every stop with the same label.
pub(super) struct FixedNamer(pub(super) &'static str);

impl StopNamer for FixedNamer {
    fn name(&self, _stop: &Stop, _fallback: &str) -> String {
        self.0.to_owned()
    }
}

/// Always answers with the caller's fallback.
pub(super) struct FallbackNamer;

impl StopNamer for FallbackNamer {
    fn name(&self, _stop: &Stop, fallback: &str) -> String {
        fallback.to_owned()
    }
}

/// Hands out [`FixedNamer`] when naming is requested.
pub(super) struct FixedNamerBuilder(pub(super) &'static str);

impl NamerBuilder for FixedNamerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Option<Box<dyn StopNamer>>, CliError> {
        Ok(config
            .nominatim_url
            .as_ref()
            .map(|_| Box::new(FixedNamer(self.0)) as Box<dyn StopNamer>))
    }
}
