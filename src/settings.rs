//! Optional settings file for the `interventions` binary.
//!
//! ```json
//! {"output_dir": "runs/campus", "default_compliance": 0.9, "default_num_days": 14}
//! ```
//!
//! Defaults pre-fill blank blocks; `output_dir` is where schedule files are written when the
//! command line does not say otherwise.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;
use serde_derive::Deserialize;

use crate::block::BlockValues;
use crate::error::InterventionError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub output_dir: Option<PathBuf>,
    pub default_compliance: Option<f64>,
    pub default_num_days: Option<u32>,
}

impl Settings {
    /// Loads and checks a settings file. Defaults must themselves be valid field values.
    pub fn load(path: &Path) -> Result<Self, InterventionError> {
        let reader = BufReader::new(File::open(path)?);
        let settings: Settings = serde_json::from_reader(reader)?;
        settings.validate()?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<(), InterventionError> {
        if let Some(compliance) = self.default_compliance {
            if !(0.0..=1.0).contains(&compliance) {
                return Err(format!(
                    "default_compliance must be between 0 and 1, got {compliance}"
                )
                .into());
            }
        }
        if self.default_num_days == Some(0) {
            return Err("default_num_days must be at least 1, got 0".into());
        }
        Ok(())
    }

    /// The values blank blocks start with.
    #[must_use]
    pub fn block_defaults(&self) -> BlockValues {
        BlockValues {
            num_days: self.default_num_days.map(i64::from),
            compliance: self.default_compliance,
            ..BlockValues::default()
        }
    }
}
