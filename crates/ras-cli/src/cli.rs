//! CLI argument definitions for the HEC-RAS project tools.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ras-tools",
    version,
    about = "HEC-RAS project tools - copy resources, rewire plans and scale hydrographs",
    long_about = "Automate the configuration layer of HEC-RAS projects.\n\n\
                  Copies plans, geometries and flow files from templates under new numbers,\n\
                  points plans at other geometries and unsteady flows, adjusts plan run settings\n\
                  and scales the fixed-width hydrograph tables of unsteady flow files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find the HEC-RAS project file in a folder.
    Find(FindArgs),

    /// List the resources a project file references.
    Entries(EntriesArgs),

    /// Copy a plan, geometry or flow file under a new number and register it.
    Copy(CopyArgs),

    /// Point a plan at a registered geometry.
    ApplyGeometry(ApplyArgs),

    /// Point a plan at a registered unsteady flow.
    ApplyUnsteady(ApplyArgs),

    /// Set the solver core counts of a plan.
    SetCores(SetCoresArgs),

    /// Set the hydraulic-table precompute flags of a plan.
    SetPrecompute(SetPrecomputeArgs),

    /// List the hydrograph tables of an unsteady flow file.
    Tables(TablesArgs),

    /// Scale hydrograph tables of an unsteady flow file.
    Scale(ScaleArgs),

    /// Run a plan with the HEC-RAS solver.
    Compute(ComputeArgs),
}

#[derive(Args)]
pub struct FindArgs {
    /// Folder containing the project.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,
}

#[derive(Args)]
pub struct EntriesArgs {
    /// Path to the project (.prj) file.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Only list one kind (plan, geometry, unsteady, flow).
    #[arg(long = "kind", value_name = "KIND")]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct CopyArgs {
    /// Path to the project (.prj) file.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Template resource, e.g. p01, g02 or u01.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Short identifier of a copied plan (default: <template label>_copy).
    #[arg(long = "label", value_name = "LABEL")]
    pub label: Option<String>,

    /// Numbering policy (default: append for plans, gap-fill otherwise).
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Path to the project (.prj) file.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Plan file path, or a plan number such as p02.
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Resource number to apply, e.g. 3, 03 or g03.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args)]
pub struct SetCoresArgs {
    /// Path to the plan file.
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,

    /// Number of cores (at least 1).
    #[arg(value_name = "CORES")]
    pub cores: u32,
}

#[derive(Args)]
pub struct SetPrecomputeArgs {
    /// Path to the plan file.
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,

    /// `Run HTab` value (0 or -1).
    #[arg(long = "run-htab", allow_hyphen_values = true, value_name = "VALUE")]
    pub run_htab: i32,

    /// `UNET Use Existing IB Tables` value (0 or -1).
    #[arg(long = "use-ib-tables", allow_hyphen_values = true, value_name = "VALUE")]
    pub use_ib_tables: i32,
}

#[derive(Args)]
pub struct TablesArgs {
    /// Path to the unsteady flow file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print tables as JSON instead of a summary table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ScaleArgs {
    /// Path to the unsteady flow file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Factor applied to every value.
    #[arg(long = "factor", allow_hyphen_values = true, value_name = "FACTOR")]
    pub factor: f64,

    /// Table kind to scale.
    #[arg(long = "kind", default_value = "flow", value_name = "KIND")]
    pub kind: String,

    /// Only scale the table with this 0-based ordinal among tables of the kind.
    #[arg(long = "index", value_name = "N")]
    pub index: Option<usize>,

    /// Write original and scaled values of the first scaled table to a CSV file.
    #[arg(long = "compare-csv", value_name = "PATH")]
    pub compare_csv: Option<PathBuf>,

    /// Report the scaled values without writing the file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ComputeArgs {
    /// Path to the project (.prj) file.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Plan file path, or a plan number such as p02.
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Path to the HEC-RAS executable.
    #[arg(long = "exe", value_name = "PATH")]
    pub exe: PathBuf,
}

/// CLI numbering policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    GapFill,
    Append,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
