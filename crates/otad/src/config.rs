//! Command line interface for otad.

use clap::Parser;
use ota_common::Channel;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "otad")]
#[command(about = "OTA update manifest server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Port to serve on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Directory of update files (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Release channel whose naming convention to match
    #[arg(long, default_value_t = Channel::Nightly)]
    pub channel: Channel,
}
