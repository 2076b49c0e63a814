//! `tomcs design` — Open the interactive canvas designer.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use tomcs_common::types::ThemeName;

use super::BindingArgs;

/// Arguments for the `design` command.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Color theme, overriding the configuration file.
    #[arg(long)]
    pub theme: Option<ThemeName>,

    /// Command binding overrides.
    #[command(flatten)]
    pub bindings: BindingArgs,
}

/// Executes the `design` command.
///
/// Runs the designer on a single-threaded runtime until the user quits.
/// Terminal modes are restored before this returns.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the terminal cannot
/// be driven.
pub fn execute(config_path: &Path, args: DesignArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    args.bindings.apply(&mut config)?;

    tracing::info!(
        config = %config_path.display(),
        bindings = config.bindings.len(),
        "launching designer"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    runtime.block_on(tomcs_tui::run(&config))?;
    Ok(())
}
