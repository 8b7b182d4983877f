//! # Burnbox
//!
//! An ephemeral, read-once, time-limited in-memory secret store: a holding
//! area for opaque payloads that must be retrievable exactly once and must
//! become unavailable after a configured time-to-live, whichever comes
//! first.
//!
//! ## Features
//!
//! - Read-once: a retrieval permanently removes the entry, whether it
//!   returns the payload or discovers the entry expired
//! - Fixed TTL classes (1 hour / 1 day / 1 week / 2 weeks), evaluated
//!   lazily at retrieval time
//! - Thread-safe storage over `DashMap`; concurrent retrievals of one key
//!   yield exactly one winner
//! - Injected [`Clock`] so expiry is deterministic under test
//! - Optional background sweep task to reclaim entries nobody retrieves
//!
//! ## Example
//!
//! ```rust
//! use burnbox::{Store, TimeToLive};
//!
//! let store = Store::new();
//! store.store("hunter2", "df81f5f2", TimeToLive::Day).unwrap();
//!
//! // First retrieval consumes the entry.
//! assert_eq!(store.retrieve("df81f5f2").as_deref(), Some("hunter2"));
//! assert_eq!(store.retrieve("df81f5f2"), None);
//! ```

mod clock;
mod config;
mod entry;
mod error;
mod store;
mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use entry::Entry;
pub use error::StoreError;
pub use store::Store;
pub use ttl::TimeToLive;
