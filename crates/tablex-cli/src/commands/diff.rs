//! Diff command
//!
//! Usage: tablex diff <OLD> <NEW> [--group-moves top|bottom] [--item-moves top|bottom]
//!        [--no-validate] [--no-defer] [--config <FILE>] [--format json|summary]
//!        [--output <FILE>]

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::config::{CliConfig, MovePreference};
use crate::snapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Edit plan as pretty-printed JSON
    #[default]
    Json,
    /// Markdown summary
    Summary,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Old snapshot file (JSON)
    pub old: PathBuf,

    /// New snapshot file (JSON)
    pub new: PathBuf,

    /// How reordered groups are explained as moves
    #[arg(long, value_enum)]
    pub group_moves: Option<MovePreference>,

    /// How reordered items are explained as moves
    #[arg(long, value_enum)]
    pub item_moves: Option<MovePreference>,

    /// Skip the identity uniqueness check
    #[arg(long)]
    pub no_validate: bool,

    /// Keep reloads of moved items in the structural wave
    #[arg(long)]
    pub no_defer: bool,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DiffArgs {
    fn flag_overrides(&self) -> CliConfig {
        CliConfig {
            group_moves: self.group_moves,
            item_moves: self.item_moves,
            validate: self.no_validate.then_some(false),
            defer_conflicting_reloads: self.no_defer.then_some(false),
        }
    }
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let file_config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let config = file_config.overlay(args.flag_overrides()).to_reconcile_config();

    let old = snapshot::load(&args.old)?;
    let new = snapshot::load(&args.new)?;

    let plan = tablex_core::reconcile(&old, &new, &config)?;

    let mut rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&plan)?,
        OutputFormat::Summary => tablex_core::render_summary(&plan),
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
        println!("✓ Plan written to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
