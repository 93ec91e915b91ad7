use crate::utils::parser::{RotationSpec, parse_rotation};
use clap::{Args, Parser, Subcommand};
use motifalign::engine::config::ScoringMode;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Sameer Dingore, Judah Silva, Shahidul Islam",
    version,
    about = "MotifAlign CLI - Structural alignment and RMSD similarity scoring for RNA 3D motifs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Atom used as the landmark of each residue (e.g., "C1'", "P", "CA").
    #[arg(long, global = true, value_name = "ATOM", conflicts_with = "polymer")]
    pub landmark_atom: Option<String>,

    /// Pick the landmark atom by polymer kind ('rna', 'dna' or 'protein').
    #[arg(long, global = true, value_name = "KIND")]
    pub polymer: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the all-pairs RMSD similarity matrix of a set of motifs.
    Matrix(MatrixArgs),
    /// Superpose one motif onto another and report the best window and rotation.
    Align(AlignArgs),
    /// Score selected motifs against all others as currently oriented, without fitting.
    Quick(QuickArgs),
}

/// Arguments for the `matrix` subcommand.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Motif JSON files. Appended to the motifs listed in the config file.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Scoring mode, overriding the config file ('kabsch' or 'quick').
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<ScoringMode>,

    /// Write the matrix as CSV to this path instead of printing it.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `align` subcommand.
#[derive(Args, Debug)]
pub struct AlignArgs {
    /// The motif that stays fixed.
    #[arg(required = true, value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// The motif rotated onto the reference.
    #[arg(required = true, value_name = "MOVING")]
    pub moving: PathBuf,
}

/// Arguments for the `quick` subcommand.
#[derive(Args, Debug)]
pub struct QuickArgs {
    /// Motif JSON files. Appended to the motifs listed in the config file.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Id (file stem) of a motif to select. Can be used multiple times.
    /// Adds to the motifs marked `selected` in the config file.
    #[arg(short, long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Rotate the selected, unlocked motifs before scoring, as 'AXIS:DEGREES'
    /// (e.g., 'z:90' or '0,1,1:45'). Can be used multiple times; applied in order.
    #[arg(short, long, value_name = "AXIS:DEGREES", value_parser = parse_rotation_arg)]
    pub rotate: Vec<RotationSpec>,

    /// Write the scores as CSV to this path instead of printing them.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

fn parse_rotation_arg(value: &str) -> Result<RotationSpec, String> {
    parse_rotation(value).map_err(|e| e.to_string())
}
