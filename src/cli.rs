use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "supplier-ledger", version, about = "Supplier and invoice records over HTTP")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,
}
