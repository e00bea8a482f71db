/// Screener Feed - bridge polling client
///
/// Delivers periodic row snapshots from the upstream bridge API to
/// in-process consumers of `screener-core`. Fetches are fire-and-forget
/// per timer tick with last-writer-wins semantics: a consumer always sees
/// the latest successful snapshot, never a queue.
pub mod client;
pub mod config;
pub mod error;
pub mod poller;

// Re-export commonly used types for convenience
pub use client::BridgeClient;
pub use config::{BridgeConfig, BRIDGE_URL_ENV};
pub use error::FeedError;
pub use poller::{init_logging, Poller, Snapshot};
