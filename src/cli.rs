//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Resumable downloader for CivitAI model files.
///
/// Resolves a model version ID (or full download URL) to the real content
/// URL, then streams the file to disk with byte-range resume support.
#[derive(Parser, Debug)]
#[command(name = "civfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Model ID or full URL, eg: 46846 or https://civitai.com/api/download/models/46846
    pub url: String,

    /// Output path, eg: /workspace/stable-diffusion-webui/models/Stable-diffusion
    /// (default: current directory)
    #[arg(default_value = ".")]
    pub output_path: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
