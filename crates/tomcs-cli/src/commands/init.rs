//! `tomcs init` — Write a default tomcs.json.

use std::path::Path;

use anyhow::bail;
use clap::Args;
use tomcs_common::config::TomcsConfig;

/// Arguments for the `init` command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name stored in the file.
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Executes the `init` command.
///
/// # Errors
///
/// Returns an error if the file exists and `--force` was not given, or the
/// write fails.
pub fn execute(config_path: &Path, args: InitArgs) -> anyhow::Result<()> {
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    let mut config = TomcsConfig::default();
    if let Some(name) = args.name {
        config.name = name;
    }
    config.save(config_path)?;
    Ok(())
}
