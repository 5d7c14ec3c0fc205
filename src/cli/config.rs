// CLI configuration
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::output::OutputFormat;
use id3scan::ParseOptions;

/// id3scan - ID3v2.3 tag reader
#[derive(Parser, Debug)]
#[command(name = "id3scan")]
#[command(about = "Read ID3v2.3 tags from MP3 files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (only errors are logged, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (log every tag and frame found)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Re-slice JPEG artwork from its SOI/EOI markers instead of trusting the frame size
    #[arg(long, global = true)]
    pub recover_jpeg: bool,

    /// Accept ID3v2.4 headers and read them with the v2.3 frame layout
    #[arg(long, global = true)]
    pub allow_v24: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tag record of each file
    Read {
        /// MP3 file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Include artwork bytes (base64) instead of their size
        #[arg(long)]
        with_artwork: bool,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the raw frame map of each file
    Frames {
        /// MP3 file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Report whether each file carries a readable ID3v2 header
    Detect {
        /// MP3 file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Parse every file matching a pattern and report failures
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: PathBuf,

        /// File pattern (e.g., "*.mp3"); plain names are searched recursively
        #[arg(short, long, default_value = "*.mp3")]
        pattern: String,
    },

    /// Write the attached picture to a file
    ExportCover {
        /// MP3 file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for the cover image
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Config {
    /// Parser options selected by the global flags
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_jpeg_recovery(self.recover_jpeg)
            .with_strict_versions(!self.allow_v24)
    }
}
