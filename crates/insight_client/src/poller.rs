//! Adaptive status poller with stale-response protection.
//!
//! Each fetch is stamped with a sequence number and runs independently of any
//! in-flight predecessor; the [`SnapshotGate`] accepts only snapshots newer
//! than the last accepted one and detects the completion edge by re-reading
//! the stored previous snapshot, never a value captured at schedule time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use client_logging::{client_debug, client_warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::api::DashboardApi;
use crate::types::PollerEvent;
use crate::wire::StatusPayload;

#[derive(Debug, Clone)]
pub struct PollerSettings {
    /// Interval between fetches while the job is running.
    pub active_interval: Duration,
    /// Grace period after a re-arm signal, letting the backend flip its
    /// in-progress flag before the first fetch.
    pub rearm_delay: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            active_interval: Duration::from_secs(10),
            rearm_delay: Duration::from_secs(2),
        }
    }
}

pub trait StatusSink: Send + Sync {
    fn emit(&self, event: PollerEvent);
}

pub struct ChannelStatusSink {
    tx: mpsc::Sender<PollerEvent>,
}

impl ChannelStatusSink {
    pub fn new(tx: mpsc::Sender<PollerEvent>) -> Self {
        Self { tx }
    }
}

impl StatusSink for ChannelStatusSink {
    fn emit(&self, event: PollerEvent) {
        let _ = self.tx.send(event);
    }
}

/// What the gate did with a stamped snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Older than the latest accepted snapshot; discarded.
    Stale,
    /// Accepted; `completed` is the running-to-finished edge.
    Accepted { completed: bool },
}

/// Holds the latest accepted snapshot and its sequence stamp.
///
/// Overlapping fetches may resolve out of order; only a snapshot stamped
/// newer than the last accepted one gets in, so the completion edge fires
/// exactly once per running-to-finished transition.
#[derive(Debug, Default)]
pub struct SnapshotGate {
    accepted_seq: u64,
    last: Option<StatusPayload>,
}

impl SnapshotGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, seq: u64, snapshot: StatusPayload) -> Admission {
        if seq <= self.accepted_seq {
            return Admission::Stale;
        }
        let completed = self
            .last
            .as_ref()
            .is_some_and(|previous| previous.scrape_in_progress)
            && !snapshot.scrape_in_progress;
        self.accepted_seq = seq;
        self.last = Some(snapshot);
        Admission::Accepted { completed }
    }

    pub fn accepted_seq(&self) -> u64 {
        self.accepted_seq
    }

    pub fn last(&self) -> Option<&StatusPayload> {
        self.last.as_ref()
    }
}

/// Running poller. `stop()` cancels the schedule and any in-flight fetch
/// synchronously; dropping the handle does the same.
pub struct PollerHandle {
    cancel: CancellationToken,
    rearm_tx: UnboundedSender<()>,
}

impl PollerHandle {
    /// Wakes an idle poller after a job trigger was accepted.
    pub fn rearm(&self) {
        let _ = self.rearm_tx.send(());
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub struct StatusPoller;

impl StatusPoller {
    /// Starts polling on the current tokio runtime: one immediate fetch, then
    /// `active_interval` ticks while the job runs, idle otherwise until
    /// re-armed.
    pub fn start(
        api: Arc<dyn DashboardApi>,
        settings: PollerSettings,
        sink: Arc<dyn StatusSink>,
    ) -> PollerHandle {
        let cancel = CancellationToken::new();
        let (rearm_tx, rearm_rx) = unbounded_channel();
        tokio::spawn(run_poller(api, settings, sink, cancel.clone(), rearm_rx));
        PollerHandle { cancel, rearm_tx }
    }
}

async fn run_poller(
    api: Arc<dyn DashboardApi>,
    settings: PollerSettings,
    sink: Arc<dyn StatusSink>,
    cancel: CancellationToken,
    mut rearm_rx: UnboundedReceiver<()>,
) {
    let gate = Arc::new(Mutex::new(SnapshotGate::new()));
    let seq = Arc::new(AtomicU64::new(0));

    // A fetch whose resolution we are still waiting on before the schedule
    // may idle; covers startup and the post-re-arm window.
    let mut pending = Some(spawn_fetch(&api, &gate, &seq, &sink, &cancel));
    let mut fetch_due = false;

    loop {
        // Re-read the latest accepted snapshot every iteration; scheduling
        // decisions never rely on state captured at setup time.
        let (accepted_seq, in_progress) = {
            let gate = gate.lock().expect("status gate lock");
            (
                gate.accepted_seq(),
                gate.last().map(|snapshot| snapshot.scrape_in_progress),
            )
        };
        if pending.is_some_and(|stamp| accepted_seq >= stamp) {
            pending = None;
        }
        let armed = pending.is_some() || in_progress.unwrap_or(true);

        if armed && fetch_due {
            spawn_fetch(&api, &gate, &seq, &sink, &cancel);
        }
        fetch_due = false;

        if armed {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(settings.active_interval) => {
                    fetch_due = true;
                }
                received = rearm_rx.recv() => {
                    if received.is_none() {
                        break;
                    }
                    match rearm_fetch(&api, &gate, &seq, &sink, &cancel, &settings).await {
                        Some(stamp) => pending = Some(stamp),
                        None => break,
                    }
                }
            }
        } else {
            tokio::select! {
                _ = cancel.cancelled() => break,
                received = rearm_rx.recv() => {
                    if received.is_none() {
                        break;
                    }
                    match rearm_fetch(&api, &gate, &seq, &sink, &cancel, &settings).await {
                        Some(stamp) => pending = Some(stamp),
                        None => break,
                    }
                }
            }
        }
    }
}

/// Waits out the re-arm grace period, then fetches. Returns the fetch stamp,
/// or `None` when cancelled mid-delay.
async fn rearm_fetch(
    api: &Arc<dyn DashboardApi>,
    gate: &Arc<Mutex<SnapshotGate>>,
    seq: &Arc<AtomicU64>,
    sink: &Arc<dyn StatusSink>,
    cancel: &CancellationToken,
    settings: &PollerSettings,
) -> Option<u64> {
    tokio::select! {
        _ = cancel.cancelled() => return None,
        _ = tokio::time::sleep(settings.rearm_delay) => {}
    }
    Some(spawn_fetch(api, gate, seq, sink, cancel))
}

/// Stamps and launches one fetch, independent of any in-flight predecessor.
/// The request future races a child cancellation token so no network call
/// outlives the handle.
fn spawn_fetch(
    api: &Arc<dyn DashboardApi>,
    gate: &Arc<Mutex<SnapshotGate>>,
    seq: &Arc<AtomicU64>,
    sink: &Arc<dyn StatusSink>,
    cancel: &CancellationToken,
) -> u64 {
    let stamp = seq.fetch_add(1, Ordering::SeqCst) + 1;
    let api = api.clone();
    let gate = gate.clone();
    let sink = sink.clone();
    let child = cancel.child_token();
    tokio::spawn(async move {
        let result = tokio::select! {
            _ = child.cancelled() => return,
            result = api.status() => result,
        };
        match result {
            Ok(snapshot) => {
                let admission = gate
                    .lock()
                    .expect("status gate lock")
                    .admit(stamp, snapshot.clone());
                match admission {
                    Admission::Accepted { completed } => {
                        sink.emit(PollerEvent::Snapshot(snapshot.clone()));
                        if completed {
                            sink.emit(PollerEvent::JobCompleted(snapshot));
                        }
                    }
                    Admission::Stale => {
                        client_debug!("discarding stale status snapshot (seq {stamp})");
                    }
                }
            }
            // A failed poll is never a completion edge and never stops the
            // schedule.
            Err(err) => client_warn!("status poll {stamp} failed: {err}"),
        }
    });
    stamp
}
