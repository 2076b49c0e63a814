//! Command-binding poller.
//!
//! Every [`Binding`] runs its shell command once right away and then again
//! on its own fixed-period timer. Successful runs publish the trimmed
//! stdout into a shared [`BindingSnapshot`]; failed runs leave the previous
//! value in place and are only logged.
//!
//! Runs are fire-and-forget relative to their timer: a slow command may
//! still be running when the next tick starts another one. Whichever run
//! *completes* last owns the snapshot entry.
//!
//! A [`PollerHandle`] owns the timers for one binding set. Stopping it (or
//! dropping it) signals cancellation; timers exit at their next wake-up and
//! in-flight runs are killed without writing.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::exec::{self, ExecOutput};

/// Latest output per binding id.
pub type BindingSnapshot = BTreeMap<String, String>;

/// A named shell command whose output feeds a canvas element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Id of the element the output belongs to.
    pub id: String,
    /// Command line passed to the host shell.
    pub command: String,
}

impl Binding {
    /// Creates a binding.
    #[must_use]
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
        }
    }
}

/// Builds bindings from an id → command map, in id order.
#[must_use]
pub fn bindings_from_map(map: &BTreeMap<String, String>) -> Vec<Binding> {
    map.iter()
        .map(|(id, command)| Binding::new(id.clone(), command.clone()))
        .collect()
}

/// Applies one finished run to the snapshot.
///
/// Successful output replaces the entry whatever its age; failures are
/// ignored. Returns whether the snapshot changed.
pub fn record_output(snapshot: &mut BindingSnapshot, id: &str, output: &ExecOutput) -> bool {
    if !output.success() {
        return false;
    }
    let value = output.stdout.trim();
    if snapshot.get(id).map(String::as_str) == Some(value) {
        return false;
    }
    let _ = snapshot.insert(id.to_string(), value.to_string());
    true
}

/// The running timers for one binding set.
#[derive(Debug)]
pub struct PollerHandle {
    bindings: Vec<Binding>,
    cancel: watch::Sender<bool>,
    timers: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    /// Starts one timer per binding. Must be called inside a tokio runtime.
    pub fn spawn(
        bindings: Vec<Binding>,
        period: Duration,
        snapshot: Arc<watch::Sender<BindingSnapshot>>,
    ) -> Self {
        let (cancel, _) = watch::channel(false);
        let timers = bindings
            .iter()
            .map(|binding| {
                tokio::spawn(run_timer(
                    binding.clone(),
                    period,
                    Arc::clone(&snapshot),
                    cancel.subscribe(),
                ))
            })
            .collect();
        tracing::info!(
            bindings = bindings.len(),
            period_ms = period.as_millis(),
            "command poller started"
        );
        Self {
            bindings,
            cancel,
            timers,
        }
    }

    /// The binding set these timers serve.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Number of timers still running.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.timers.iter().filter(|timer| !timer.is_finished()).count()
    }

    /// Cancels every timer and waits until all of them have exited.
    pub async fn stop(mut self) {
        let _ = self.cancel.send_replace(true);
        for timer in self.timers.drain(..) {
            if let Err(e) = timer.await {
                tracing::warn!(error = %e, "binding timer ended abnormally");
            }
        }
        tracing::info!(bindings = self.bindings.len(), "command poller stopped");
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.cancel.send_replace(true);
        for timer in &self.timers {
            timer.abort();
        }
    }
}

async fn run_timer(
    binding: Binding,
    period: Duration,
    snapshot: Arc<watch::Sender<BindingSnapshot>>,
    mut cancel: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if *cancel.borrow() {
            break;
        }
        tokio::select! {
            biased;
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let _ = tokio::spawn(execute(
                    binding.clone(),
                    Arc::clone(&snapshot),
                    cancel.clone(),
                ));
            }
        }
    }
    tracing::debug!(id = %binding.id, "binding timer cancelled");
}

async fn execute(
    binding: Binding,
    snapshot: Arc<watch::Sender<BindingSnapshot>>,
    mut cancel: watch::Receiver<bool>,
) {
    let result = tokio::select! {
        biased;
        () = cancelled(&mut cancel) => return,
        result = exec::run_shell(&binding.command) => result,
    };
    if *cancel.borrow() {
        return;
    }

    match result {
        Ok(output) if output.success() => {
            let changed = snapshot.send_if_modified(|s| record_output(s, &binding.id, &output));
            if changed {
                tracing::debug!(id = %binding.id, "binding output updated");
            }
        }
        Ok(output) => {
            tracing::debug!(id = %binding.id, exit_code = output.exit_code, "binding command failed");
        }
        Err(e) => {
            tracing::debug!(id = %binding.id, error = %e, "binding command could not run");
        }
    }
}

/// Resolves once cancellation is signalled or the sender is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    while !*cancel.borrow_and_update() {
        if cancel.changed().await.is_err() {
            return;
        }
    }
}

/// Owns the snapshot and rebuilds the timer set when bindings change.
#[derive(Debug)]
pub struct Poller {
    period: Duration,
    snapshot: Arc<watch::Sender<BindingSnapshot>>,
    handle: Option<PollerHandle>,
}

impl Poller {
    /// Creates an idle poller with the given timer period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let (snapshot, _) = watch::channel(BindingSnapshot::new());
        Self {
            period,
            snapshot: Arc::new(snapshot),
            handle: None,
        }
    }

    /// Replaces the binding set.
    ///
    /// An identical set keeps the running timers. Otherwise every old timer
    /// is cancelled and joined before the new ones start.
    pub async fn configure(&mut self, bindings: Vec<Binding>) {
        let current = self.handle.as_ref().map_or(&[][..], PollerHandle::bindings);
        if current == bindings.as_slice() {
            return;
        }
        if let Some(old) = self.handle.take() {
            old.stop().await;
        }
        if !bindings.is_empty() {
            self.handle = Some(PollerHandle::spawn(
                bindings,
                self.period,
                Arc::clone(&self.snapshot),
            ));
        }
    }

    /// A receiver that wakes whenever an entry changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BindingSnapshot> {
        self.snapshot.subscribe()
    }

    /// A copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BindingSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Number of timers still running.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.handle.as_ref().map_or(0, PollerHandle::active_timers)
    }

    /// Stops all timers and clears the snapshot.
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop().await;
        }
        let _ = self.snapshot.send_replace(BindingSnapshot::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(stdout: &str) -> ExecOutput {
        ExecOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    fn failed() -> ExecOutput {
        ExecOutput {
            stdout: "partial".to_string(),
            stderr: "boom".to_string(),
            exit_code: 1,
        }
    }

    #[test]
    fn success_is_trimmed_and_upserted() {
        let mut snapshot = BindingSnapshot::new();
        assert!(record_output(&mut snapshot, "time", &ok("  42\n")));
        assert_eq!(snapshot.get("time").map(String::as_str), Some("42"));
    }

    #[test]
    fn failure_keeps_previous_value() {
        let mut snapshot = BindingSnapshot::new();
        let _ = record_output(&mut snapshot, "cpu", &ok("7%"));
        assert!(!record_output(&mut snapshot, "cpu", &failed()));
        assert_eq!(snapshot.get("cpu").map(String::as_str), Some("7%"));
    }

    #[test]
    fn failure_on_fresh_binding_leaves_no_entry() {
        let mut snapshot = BindingSnapshot::new();
        assert!(!record_output(&mut snapshot, "cpu", &failed()));
        assert!(snapshot.is_empty());
    }

    #[test]
    fn last_completed_run_wins() {
        // A slow run started first but finishing second overwrites the
        // newer run's value.
        let mut snapshot = BindingSnapshot::new();
        let _ = record_output(&mut snapshot, "date", &ok("tick 2"));
        let _ = record_output(&mut snapshot, "date", &ok("tick 1"));
        assert_eq!(snapshot.get("date").map(String::as_str), Some("tick 1"));
    }

    #[test]
    fn unchanged_output_is_not_a_change() {
        let mut snapshot = BindingSnapshot::new();
        assert!(record_output(&mut snapshot, "x", &ok("same")));
        assert!(!record_output(&mut snapshot, "x", &ok("same\n")));
    }

    #[test]
    fn bindings_from_map_preserves_id_order() {
        let mut map = BTreeMap::new();
        let _ = map.insert("b".to_string(), "echo b".to_string());
        let _ = map.insert("a".to_string(), "echo a".to_string());
        let bindings = bindings_from_map(&map);
        assert_eq!(bindings, vec![Binding::new("a", "echo a"), Binding::new("b", "echo b")]);
    }

    #[tokio::test]
    async fn empty_binding_set_starts_no_timers() {
        let mut poller = Poller::new(Duration::from_millis(50));
        poller.configure(Vec::new()).await;
        assert_eq!(poller.active_timers(), 0);
        assert!(poller.snapshot().is_empty());
    }
}
