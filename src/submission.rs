//! The payload posted when a schedule is saved, and the schedule files read by the simulator.
//!
//! The simulator is pointed at `<output_dir>/<name>.json`, which holds the bare schedule array.

use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::SerializedBlock;
use crate::error::InterventionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionSubmission {
    #[serde(rename = "intvName")]
    pub name: String,
    #[serde(rename = "intvDict")]
    pub schedule: Vec<SerializedBlock>,
}

impl InterventionSubmission {
    /// # Errors
    ///
    /// The name becomes a file name, so it must be non-empty and may not contain path separators
    /// or be `.`/`..`.
    pub fn new(name: &str, schedule: Vec<SerializedBlock>) -> Result<Self, InterventionError> {
        validate_name(name)?;
        Ok(InterventionSubmission {
            name: name.trim().to_string(),
            schedule,
        })
    }

    #[must_use]
    pub fn schedule_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.json", self.name))
    }

    /// Writes the schedule array to `<output_dir>/<name>.json`, creating the directory if needed.
    /// Returns the path written.
    pub fn write_schedule(&self, output_dir: &Path) -> Result<PathBuf, InterventionError> {
        create_dir_all(output_dir)?;
        let path = self.schedule_path(output_dir);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &self.schedule)?;
        writer.flush()?;
        info!(
            "Wrote intervention {} ({} blocks) to {}",
            self.name,
            self.schedule.len(),
            path.display()
        );
        Ok(path)
    }
}

fn validate_name(name: &str) -> Result<(), InterventionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Intervention name must not be empty".into());
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(format!("Intervention name {name:?} cannot be used as a file name").into());
    }
    Ok(())
}

/// Reads a saved schedule for editing. Each element is kept as a JSON object so that keys the
/// form does not know about are skipped rather than rejected.
pub fn read_schedule(path: &Path) -> Result<Vec<Map<String, Value>>, InterventionError> {
    let reader = BufReader::new(File::open(path)?);
    let schedule: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
    Ok(schedule)
}
