use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sql2csv")]
#[command(about = "Convert single-table MySQL dump scripts into CSV")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Append NDJSON audit events for this invocation to a file
    #[arg(long = "audit-log", global = true)]
    pub audit_log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a dump file to CSV (or JSON)
    Convert {
        /// Path to the dump file (.sql)
        #[arg(short, long)]
        file: String,

        /// Output format
        #[arg(long, default_value = "csv")]
        format: OutputFormat,

        /// Write a timestamped converted_<YYYYMMDD_HHMMSS> file into this directory
        #[arg(long = "output-dir")]
        output_dir: Option<String>,

        /// Fail when the dump has no CREATE TABLE statement
        #[arg(long = "require-schema")]
        require_schema: bool,

        /// Show a progress bar over INSERT statements
        #[arg(long)]
        progress: bool,

        /// List skipped statements and row/column mismatches
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the table name and extracted column list
    Columns {
        /// Path to the dump file (.sql)
        #[arg(short, long)]
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
