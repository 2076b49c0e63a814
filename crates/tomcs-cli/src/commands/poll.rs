//! `tomcs poll` — Run command bindings headless and print their output.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Args;
use tomcs_runtime::poller::{self, Poller};

use super::BindingArgs;
use crate::output;

/// Arguments for the `poll` command.
#[derive(Args, Debug)]
pub struct PollArgs {
    /// Command binding overrides.
    #[command(flatten)]
    pub bindings: BindingArgs,

    /// Stop after this many snapshot changes.
    #[arg(long)]
    pub count: Option<usize>,
}

/// Executes the `poll` command.
///
/// Prints the whole snapshot every time an entry changes, until `--count`
/// changes were seen or Ctrl+C is pressed.
///
/// # Errors
///
/// Returns an error if no binding is configured or the configuration is
/// invalid.
pub fn execute(config_path: &Path, args: PollArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    args.bindings.apply(&mut config)?;
    if config.bindings.is_empty() {
        bail!("no bindings configured (add --bind id=command or a \"bindings\" map to the config)");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    runtime.block_on(async {
        let mut poller = Poller::new(Duration::from_millis(config.poll_interval_ms));
        let mut updates = poller.subscribe();
        poller
            .configure(poller::bindings_from_map(&config.bindings))
            .await;

        let result = print_updates(&mut updates, args.count).await;
        poller.shutdown().await;
        result
    })
}

async fn print_updates(
    updates: &mut tokio::sync::watch::Receiver<poller::BindingSnapshot>,
    count: Option<usize>,
) -> anyhow::Result<()> {
    let mut seen = 0usize;
    while count.is_none_or(|limit| seen < limit) {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
        let text = output::format_snapshot(&updates.borrow_and_update());
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()?;
        seen += 1;
    }
    Ok(())
}
