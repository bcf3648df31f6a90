//! Command line arguments.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lexigrade_core::{CefrLevel, Language};

/// CEFR level estimation, constraint testing and text simplification.
#[derive(Parser, Debug)]
#[command(name = "lexigrade", version, propagate_version = true)]
pub struct Cli {
    /// Configuration file; `.yaml`/`.yml` files are read as YAML, others as TOML.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding one resource directory per language.
    #[arg(long, global = true)]
    pub datasets: Option<PathBuf>,

    /// Disables console logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimates the CEFR level of a text.
    Estimate(EstimateArgs),

    /// Runs the hard constraint battery at a target level.
    Hard(TargetArgs),

    /// Runs the soft constraint battery at a target level.
    Soft(TargetArgs),

    /// Simplifies a text toward a target level.
    Execute(TargetArgs),

    /// Builds language resources from labelled texts.
    #[command(subcommand)]
    Calibrate(CalibrateCommand),
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[arg(short, long)]
    pub language: Language,

    /// Includes per-window details for the metric classifier.
    #[arg(long)]
    pub debug_windows: bool,

    #[command(flatten)]
    pub input: TextInput,
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    #[arg(short, long)]
    pub language: Language,

    #[arg(short, long)]
    pub target: CefrLevel,

    #[command(flatten)]
    pub input: TextInput,
}

/// Text given inline, read from a file, or read from stdin.
#[derive(Args, Debug, Default)]
pub struct TextInput {
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl TextInput {
    pub fn read(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()));
        }
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(text)
    }
}

#[derive(Subcommand, Debug)]
pub enum CalibrateCommand {
    /// Builds the lexicon and corpus frequencies from texts by level.
    Lexicon {
        #[arg(short, long)]
        language: Language,

        /// Level map or array of `{text, cefr_level}` records.
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Calibrates per-level rarity thresholds.
    Rarity {
        #[arg(short, long)]
        language: Language,
    },

    /// Calibrates the classifier metric ranges.
    Ranges {
        #[arg(short, long)]
        language: Language,
    },

    /// Converts SUBTLEX norms into the profile frequency table.
    Subtlex {
        #[arg(short, long)]
        language: Language,

        /// Raw norms; defaults to the profile frequency file.
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
}

impl CalibrateCommand {
    pub fn language(&self) -> Language {
        match self {
            CalibrateCommand::Lexicon { language, .. }
            | CalibrateCommand::Rarity { language }
            | CalibrateCommand::Ranges { language }
            | CalibrateCommand::Subtlex { language, .. } => *language,
        }
    }
}
