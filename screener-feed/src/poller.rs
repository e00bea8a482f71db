//! Periodic snapshot polling with last-writer-wins delivery.
//!
//! Each interval tick fetches a fresh snapshot and overwrites the watch
//! value; consumers always observe the most recent successful fetch. There
//! is no retry/backoff beyond the next scheduled tick, no cancellation of
//! in-flight requests, and no de-duplication.

use crate::client::BridgeClient;
use crate::config::BridgeConfig;
use chrono::{DateTime, Utc};
use screener_core::row::ScreenRow;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{info, warn};

/// One delivered row snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub rows: Vec<ScreenRow>,
    /// When the snapshot was fetched; `None` until the first successful
    /// fetch.
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Handle to a running poll loop.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn the polling loop and return a watch receiver for snapshots.
    ///
    /// The receiver starts with an empty [`Snapshot`]; the first tick fires
    /// immediately.
    pub fn spawn(client: BridgeClient, config: &BridgeConfig) -> (Self, watch::Receiver<Snapshot>) {
        let (tx, rx) = watch::channel(Snapshot::default());
        let poll_interval = config.poll_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            loop {
                ticker.tick().await;
                match client.fetch_rows().await {
                    Ok(rows) => {
                        info!(rows = rows.len(), "row snapshot refreshed");
                        let snapshot = Snapshot {
                            rows,
                            fetched_at: Some(Utc::now()),
                        };
                        // Receivers may all be gone; keep polling anyway so
                        // a late subscriber sees fresh data
                        let _ = tx.send(snapshot);
                    }
                    Err(err) => {
                        // No retry here; the next interval tick is the retry
                        warn!(%err, "row snapshot fetch failed");
                    }
                }
            }
        });

        (Self { handle }, rx)
    }

    /// Stop the poll loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Initialize tracing output for feed consumers, honouring `RUST_LOG` and
/// defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
