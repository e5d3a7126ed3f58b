// mediaconv-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;
use mediaconv_core::config::FFMPEG_PATH_ENV;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "convert",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Converts every supported media file of a directory",
    long_about = "Converts JPEG to PNG, PNG/HEIC/RAW to JPEG and MP4 to MP3 audio. \
                  Each file is tried against an ordered list of backends until one succeeds."
)]
pub struct Cli {
    /// Directory containing the files to convert (not searched recursively)
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where converted files will be written (created if missing)
    #[arg(required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Optional: Directory for a debug log file of this run
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Enable verbose output for troubleshooting
    #[arg(short, long)]
    pub verbose: bool,

    /// Print events as JSON lines on stdout instead of status markers
    #[arg(long)]
    pub json: bool,

    /// Optional: Write the batch report as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Optional: ffmpeg executable used for MP4 to MP3 extraction.
    /// Can also be set via the MEDIACONV_FFMPEG environment variable.
    #[arg(long = "ffmpeg", value_name = "PATH", env = FFMPEG_PATH_ENV)]
    pub ffmpeg_path: Option<PathBuf>,
}
