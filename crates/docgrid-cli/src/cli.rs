//! Command-line interface definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bulk document extraction: documents × columns → a grid of answers.
#[derive(Debug, Parser)]
#[command(name = "docgrid", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Output format for the extracted grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GridFormat {
    /// RFC 4180 CSV, one row per document
    Csv,
    /// Pretty JSON with full cells
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run extraction over documents and export the grid
    Run {
        /// Document files (text or markdown; anything else needs --convert-endpoint)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Column definitions (TOML, see `docgrid columns-init`)
        #[arg(long)]
        columns: PathBuf,

        /// Model passed to the extraction API
        #[arg(long, default_value = "llama3")]
        model: String,

        /// Ollama endpoint
        #[arg(long, env = "DOCGRID_ENDPOINT", default_value = docgrid_client::ollama::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Convert files through the docling sidecar at this endpoint
        #[arg(long, env = "DOCGRID_CONVERT_ENDPOINT")]
        convert_endpoint: Option<String>,

        /// Recompute cells that already exist
        #[arg(long)]
        overwrite: bool,

        /// Re-run scope: only these file names, force-overwriting their rows
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,

        /// Grid output format
        #[arg(long, value_enum, default_value = "csv")]
        format: GridFormat,

        /// Write the grid here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Convert one file through the docling sidecar and print the markdown
    Convert {
        /// Source file
        file: PathBuf,

        /// Docling sidecar endpoint
        #[arg(long, env = "DOCGRID_CONVERT_ENDPOINT", default_value = docgrid_client::docling::DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Write a starter column definitions file
    ColumnsInit {
        /// Where to write the TOML scaffold
        #[arg(default_value = "columns.toml")]
        path: PathBuf,
    },
}
