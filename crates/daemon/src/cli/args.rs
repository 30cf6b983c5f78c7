pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "vsl")]
#[command(about = "Share secrets that can be read exactly once")]
pub struct Args {
    /// Daemon URL (defaults to localhost on the configured listen port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the vsl config directory (defaults to ~/.vsl)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
