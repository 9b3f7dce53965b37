//! Live translation of interactive input.
//!
//! Input lines are coalesced by a debounce discipline: only the last input
//! within the quiet period fires a translate call. In-flight calls are not
//! cancelled; instead every dispatch carries a sequence number and any
//! completion that is no longer the latest issued is discarded, so newer
//! output is never overwritten by a slow older request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::Result;
use crate::orchestrator::{Orchestrator, Outcome};

/// Monotonically increasing request counter; only the latest issued
/// sequence number is considered current
#[derive(Debug, Default)]
pub struct SequenceGate {
    issued: AtomicU64,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new dispatch
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the given stamp is still the newest one handed out
    pub fn is_latest(&self, sequence: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == sequence
    }
}

/// Forward only the last input of each burst. Every arrival restarts the
/// quiet-period timer; the pending value is replaced, never queued.
pub async fn debounce(
    mut input: mpsc::Receiver<String>,
    quiet: Duration,
    output: mpsc::Sender<String>,
) {
    while let Some(mut pending) = input.recv().await {
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(next) => pending = next,
                    None => {
                        // Input closed; flush what is pending and stop
                        let _ = output.send(pending).await;
                        return;
                    }
                },
                _ = sleep(quiet) => {
                    if output.send(pending).await.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}

/// Read stdin line by line, debounce, translate, and print only results
/// that are still current when they complete.
pub async fn run(orchestrator: Arc<Orchestrator>, quiet: Duration) -> Result<()> {
    info!(
        "Live translation started (quiet period {}ms), Ctrl-D to exit",
        quiet.as_millis()
    );

    let (raw_tx, raw_rx) = mpsc::channel::<String>(64);
    let (fired_tx, mut fired_rx) = mpsc::channel::<String>(64);
    tokio::spawn(debounce(raw_rx, quiet, fired_tx));

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if raw_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let gate = Arc::new(SequenceGate::new());
    let (done_tx, mut done_rx) = mpsc::channel::<(u64, Outcome)>(64);

    loop {
        tokio::select! {
            fired = fired_rx.recv() => match fired {
                Some(text) => {
                    let sequence = gate.issue();
                    let orchestrator = orchestrator.clone();
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        if let Some(outcome) = orchestrator.translate(&text).await {
                            let _ = done_tx.send((sequence, outcome)).await;
                        }
                    });
                }
                None => break,
            },
            completed = done_rx.recv() => {
                if let Some((sequence, outcome)) = completed {
                    if gate.is_latest(sequence) {
                        println!("{}", outcome.render());
                    } else {
                        debug!("Discarding stale result #{}", sequence);
                    }
                }
            }
        }
    }

    // Input is exhausted; wait for in-flight translations to settle
    drop(done_tx);
    while let Some((sequence, outcome)) = done_rx.recv().await {
        if gate.is_latest(sequence) {
            println!("{}", outcome.render());
        }
    }

    reader.abort();
    Ok(())
}
