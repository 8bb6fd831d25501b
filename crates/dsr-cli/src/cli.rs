//! CLI argument definitions for the DSR assembler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dsr-assembler",
    version,
    about = "DSR Assembler - map and resolve regulatory document sections",
    long_about = "Map Drug Safety Report sections onto an aggregate-report template\n\
                  and resolve source citations (IB, PBRER, literature) into evidence\n\
                  content or explicit data-needed placeholders."
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
    /// Map DSR sections onto template sections.
    Map(MapArgs),

    /// Resolve template source citations into evidence content.
    Resolve(ResolveArgs),

    /// Build or inspect a vector index snapshot.
    Index(IndexArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// DSR sections (JSON array).
    #[arg(long = "sections", value_name = "PATH")]
    pub sections: PathBuf,

    /// Template sections (JSON array).
    #[arg(long = "template", value_name = "PATH")]
    pub template: PathBuf,

    /// Explicit mapping-table entries (JSON array).
    #[arg(long = "mapping-table", value_name = "PATH")]
    pub mapping_table: Option<PathBuf>,

    /// Directory for vector index snapshots. Snapshots are reused when the
    /// template content is unchanged.
    #[arg(long = "vector-index", value_name = "DIR")]
    pub vector_index: Option<PathBuf>,

    /// Skip the vector pass and use keyword-overlap scoring instead.
    #[arg(long = "no-vector")]
    pub no_vector: bool,

    /// Output path for the mapping records.
    #[arg(
        long = "output",
        value_name = "PATH",
        default_value = "section_mappings.json"
    )]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Template sections with required sources (JSON array).
    #[arg(long = "template", value_name = "PATH")]
    pub template: PathBuf,

    /// IB section index (JSON object, section number to content).
    #[arg(long = "ib-index", value_name = "PATH")]
    pub ib_index: PathBuf,

    /// PBRER section index (JSON object, section number to content).
    #[arg(long = "pbrer-index", value_name = "PATH")]
    pub pbrer_index: Option<PathBuf>,

    /// Literature references (JSON object, source name to content).
    /// A missing or malformed file degrades to placeholders.
    #[arg(long = "literature", value_name = "PATH")]
    pub literature: Option<PathBuf>,

    /// Output path for the resolution records.
    #[arg(
        long = "output",
        value_name = "PATH",
        default_value = "resolved_sources.json"
    )]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct IndexArgs {
    /// Documents to index (JSON array of {text, metadata}). When omitted,
    /// the existing snapshot is loaded and its size reported.
    #[arg(long = "documents", value_name = "PATH")]
    pub documents: Option<PathBuf>,

    /// Directory holding index snapshots.
    #[arg(long = "index-dir", value_name = "DIR")]
    pub index_dir: PathBuf,

    /// Snapshot name.
    #[arg(long = "name", value_name = "NAME", default_value = "dsr")]
    pub name: String,

    /// Source type recorded in every document's metadata.
    #[arg(long = "source-type", value_name = "TYPE", default_value = "template")]
    pub source_type: String,

    /// Embedding dimension for newly built snapshots.
    #[arg(long = "dimension", value_name = "N", default_value_t = 256)]
    pub dimension: usize,
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
