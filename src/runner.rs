use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::assembler::FormArrays;
use crate::codes::InterventionCode;
use crate::form::FormState;
use crate::log::{apply_log_level_spec, LogLevelSpec};
use crate::settings::Settings;
use crate::submission::{read_schedule, InterventionSubmission};

#[derive(Parser, Debug)]
#[command(name = "interventions")]
#[command(about = "Builds, reads and serializes intervention schedules for the campus simulator")]
pub struct Cli {
    #[command(flatten)]
    pub base: BaseArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Default)]
pub struct BaseArgs {
    /// Optional path for a settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable logging: a level (`info`) or module levels (`ixa_interventions::form=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a schedule from the arrays collected out of the form
    Assemble {
        /// JSON file with the `intv`, `compliance`, `num_days` and `spaces` arrays
        form: PathBuf,
        /// Name of the intervention; prints the submission payload
        #[arg(short, long)]
        name: Option<String>,
        /// Write the schedule to `<output_dir>/<name>.json` instead of printing it
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Render the form as HTML
    Render {
        /// Number of blank blocks
        #[arg(short, long, default_value_t = 1)]
        blocks: usize,
        /// Saved schedule to pre-populate the blocks from
        #[arg(short, long)]
        schedule: Option<PathBuf>,
    },
    /// Describe each block of a saved schedule
    Inspect {
        /// Saved schedule file
        schedule: PathBuf,
    },
}

/// Parses the command line and runs the requested command, writing to stdout.
#[allow(clippy::missing_errors_doc)]
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_args(cli, &mut out)
}

/// Runs a parsed command line, writing results to `out`.
#[allow(clippy::missing_errors_doc)]
pub fn run_with_args<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    if let Some(spec) = &cli.base.log_level {
        let spec: LogLevelSpec = spec.parse()?;
        apply_log_level_spec(&spec);
    }

    let settings = match &cli.base.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Assemble {
            form,
            name,
            output_dir,
        } => assemble(&settings, &form, name.as_deref(), output_dir, out),
        Commands::Render { blocks, schedule } => {
            render(&settings, blocks, schedule.as_deref(), out)
        }
        Commands::Inspect { schedule } => inspect(&schedule, out),
    }
}

fn assemble<W: Write>(
    settings: &Settings,
    form: &Path,
    name: Option<&str>,
    output_dir: Option<PathBuf>,
    out: &mut W,
) -> Result<()> {
    let reader = BufReader::new(
        File::open(form).with_context(|| format!("Failed to open {}", form.display()))?,
    );
    let arrays: FormArrays = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to read form arrays from {}", form.display()))?;
    let schedule = arrays.assemble()?;
    info!("Assembled {} intervention blocks", schedule.len());

    let output_dir = output_dir.or_else(|| settings.output_dir.clone());
    match (name, output_dir) {
        (Some(name), Some(output_dir)) => {
            let submission = InterventionSubmission::new(name, schedule)?;
            let path = submission.write_schedule(&output_dir)?;
            writeln!(out, "{}", path.display())?;
        }
        (Some(name), None) => {
            let submission = InterventionSubmission::new(name, schedule)?;
            writeln!(out, "{}", serde_json::to_string(&submission)?)?;
        }
        (None, Some(_)) => bail!("Writing a schedule file requires --name"),
        (None, None) => writeln!(out, "{}", serde_json::to_string(&schedule)?)?,
    }
    Ok(())
}

fn render<W: Write>(
    settings: &Settings,
    blocks: usize,
    schedule: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let mut form = FormState::with_defaults(settings.block_defaults());
    match schedule {
        Some(path) => {
            form.load_schedule(&read_schedule(path)?);
        }
        None => {
            for _ in 0..blocks {
                form.new_block();
            }
        }
    }
    write!(out, "{form}")?;
    Ok(())
}

fn inspect<W: Write>(schedule: &Path, out: &mut W) -> Result<()> {
    let mut form = FormState::new();
    form.load_schedule(&read_schedule(schedule)?);
    for (index, block) in form.intervention_blocks()?.iter().enumerate() {
        let labels: Vec<&str> = block
            .selected_interventions
            .iter()
            .map(|intervention| intervention.label())
            .collect();
        let labels = if labels.is_empty() {
            InterventionCode::NoIntervention.label().to_string()
        } else {
            labels.join(", ")
        };
        write!(
            out,
            "Block {}: {} days, compliance {}: {labels}",
            index + 1,
            block.duration_days,
            block.compliance_probability
        )?;
        if block
            .selected_interventions
            .contains(&InterventionCode::SelectiveShutdown)
        {
            let spaces: Vec<&str> = block
                .disabled_spaces
                .iter()
                .map(|space| space.label())
                .collect();
            write!(out, " (disabled: {})", spaces.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn cli(command: Commands) -> Cli {
        Cli {
            base: BaseArgs::default(),
            command,
        }
    }

    fn write_json(path: &Path, value: &Value) {
        std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
    }

    fn run_to_string(cli: Cli) -> Result<String> {
        let mut out = Vec::new();
        run_with_args(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn assemble_prints_schedule() {
        let temp_dir = tempdir().unwrap();
        let form = temp_dir.path().join("form.json");
        write_json(
            &form,
            &json!({"intv": [[1, 3]], "compliance": [0.5], "num_days": [14], "spaces": [[]]}),
        );
        let output = run_to_string(cli(Commands::Assemble {
            form,
            name: None,
            output_dir: None,
        }))
        .unwrap();
        assert_eq!(
            output,
            "[{\"num_days\":14,\"compliance\":0.5,\"case_isolation\":{\"active\":true},\"lockdown\":{\"active\":true}}]\n"
        );
    }

    #[test]
    fn assemble_writes_named_schedule() {
        let temp_dir = tempdir().unwrap();
        let form = temp_dir.path().join("form.json");
        write_json(
            &form,
            &json!({"intv": [[5]], "compliance": [0.7], "num_days": [10], "spaces": [["2", "4"]]}),
        );
        let output_dir = temp_dir.path().join("out");
        let output = run_to_string(cli(Commands::Assemble {
            form,
            name: Some("custom".to_string()),
            output_dir: Some(output_dir.clone()),
        }))
        .unwrap();
        let path = output_dir.join("custom.json");
        assert_eq!(output.trim_end(), path.display().to_string());
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!([{
                "num_days": 10,
                "compliance": 0.7,
                "selective_shutdown": {"active": true, "spaces": [2, 4]},
            }])
        );
    }

    #[test]
    fn output_dir_needs_a_name() {
        let temp_dir = tempdir().unwrap();
        let form = temp_dir.path().join("form.json");
        write_json(
            &form,
            &json!({"intv": [], "compliance": [], "num_days": [], "spaces": []}),
        );
        let result = run_to_string(cli(Commands::Assemble {
            form,
            name: None,
            output_dir: Some(temp_dir.path().to_path_buf()),
        }));
        assert!(result.is_err());
    }

    #[test]
    fn render_uses_settings_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = temp_dir.path().join("settings.json");
        write_json(&config, &json!({"default_compliance": 0.9, "default_num_days": 7}));
        let output = run_to_string(Cli {
            base: BaseArgs {
                config: Some(config),
                log_level: None,
            },
            command: Commands::Render {
                blocks: 2,
                schedule: None,
            },
        })
        .unwrap();
        assert!(output.contains(r#"id="compProb1""#));
        assert_eq!(output.matches(r#"step="0.001" value="0.9""#).count(), 2);
        assert_eq!(output.matches(r#"step="1" value="7""#).count(), 2);
    }

    #[test]
    fn inspect_describes_blocks() {
        let temp_dir = tempdir().unwrap();
        let schedule = temp_dir.path().join("schedule.json");
        write_json(
            &schedule,
            &json!([
                {"num_days": 14, "compliance": 0.5, "lockdown": {"active": true}},
                {"num_days": 7, "compliance": 1.0,
                 "selective_shutdown": {"active": true, "spaces": [5, 3]}},
                {"num_days": 30, "compliance": 0.0},
            ]),
        );
        let output = run_to_string(cli(Commands::Inspect { schedule })).unwrap();
        assert_eq!(
            output,
            "Block 1: 14 days, compliance 0.5: Shelter in Place (no activity allowed)\n\
             Block 2: 7 days, compliance 1: Custom intervention (disabled: Close Messes, Close Library)\n\
             Block 3: 30 days, compliance 0: No Intervention (business as usual)\n"
        );
    }

    #[test]
    fn inspect_reports_invalid_blocks() {
        let temp_dir = tempdir().unwrap();
        let schedule = temp_dir.path().join("schedule.json");
        write_json(&schedule, &json!([{"num_days": 0, "compliance": 0.5}]));
        let error = run_to_string(cli(Commands::Inspect { schedule })).unwrap_err();
        assert!(error.to_string().starts_with("Block 1: duration"));
    }
}
