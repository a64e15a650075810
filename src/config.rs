use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vcf-intervals")]
#[command(about = "Convert VCF/BCF variant records into named interval lists")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write the variants of a VCF/BCF file as a Picard interval list
    Intervals(IntervalsArgs),
    /// Print the sequence dictionary from a VCF/BCF header
    Dict(DictArgs),
    /// Print the records overlapping a region as JSON lines (needs an index)
    Query(QueryArgs),
    /// Serve interval lists over HTTP
    Serve(ServeConfig),
}

#[derive(Debug, Clone, Args)]
pub struct IntervalsArgs {
    /// VCF/BCF path or file:// URI
    pub input: String,

    /// Explicit index path
    #[arg(long)]
    pub index: Option<String>,

    /// Keep records that failed a filter
    #[arg(long)]
    pub include_filtered: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DictArgs {
    /// VCF/BCF path or file:// URI
    pub input: String,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// VCF/BCF path or file:// URI
    pub input: String,

    /// Region such as chr1:100-200
    pub region: String,

    /// Explicit index path
    #[arg(long)]
    pub index: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ServeConfig {
    /// Host address to bind to
    #[arg(long, env = "VCF_INTERVALS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "VCF_INTERVALS_PORT", default_value = "8080")]
    pub port: u16,

    /// Directory containing variant files
    #[arg(long, env = "VCF_INTERVALS_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Enable CORS for all origins
    #[arg(long, env = "VCF_INTERVALS_CORS", default_value = "true")]
    pub cors: bool,
}

impl ServeConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
