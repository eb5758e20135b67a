use clap::Parser;
use std::path::PathBuf;

/// Generate binary-exact table codecs from a schema document
#[derive(Debug, Parser)]
#[command(name = "tablegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the project configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Schema document (.json or .toml); overrides the config file
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Directory receiving generated sources; overrides the config file
    #[arg(long, value_name = "PATH")]
    pub out_dir: Option<PathBuf>,

    /// Compare generated output with the files on disk instead of writing
    #[arg(long)]
    pub check: bool,
}
