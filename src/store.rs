use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::entry::Entry;
use crate::error::StoreError;
use crate::ttl::TimeToLive;

/// Internal shared state for the store.
struct StoreInner {
    entries: DashMap<String, Entry>,
    clock: Arc<dyn Clock>,
    /// Present only while a background sweeper is attached.
    shutdown_tx: Option<watch::Sender<bool>>,
}

/// Ephemeral, read-once, time-limited secret store.
///
/// Each secret is stored under a caller-supplied key with one of a fixed
/// set of TTL classes. A retrieval permanently removes the entry, whether
/// it succeeds or discovers the entry has expired, so a secret can be
/// observed at most once and never after its expiry instant.
///
/// Expiry is evaluated lazily against the injected [`Clock`] at retrieval
/// time. An optional background sweeper (see [`StoreConfig`]) additionally
/// reclaims expired entries nobody ever comes back for; it changes nothing
/// a retrieval could observe.
///
/// The store is `Clone`; clones share the same entries.
///
/// # Example
///
/// ```rust
/// use burnbox::{Store, TimeToLive};
///
/// let store = Store::new();
/// store.store("s3cret", "k1", TimeToLive::Hour).unwrap();
///
/// assert!(store.has("k1"));
/// assert_eq!(store.retrieve("k1").as_deref(), Some("s3cret"));
/// assert_eq!(store.retrieve("k1"), None); // read-once
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Creates a store on the system clock with no background sweeper.
    pub fn new() -> Self {
        Self::with_parts(StoreConfig::default(), Arc::new(SystemClock))
    }

    /// Creates a store on the system clock with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if a sweep interval is configured and no Tokio runtime is
    /// available to spawn the sweeper on.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemClock))
    }

    /// Creates a store on a caller-supplied clock, no background sweeper.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_parts(StoreConfig::default(), clock)
    }

    /// Creates a store from a configuration and a clock.
    ///
    /// # Panics
    ///
    /// Panics if a sweep interval is configured and no Tokio runtime is
    /// available to spawn the sweeper on.
    pub fn with_parts(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let (shutdown_tx, shutdown_rx) = match config.sweep_interval {
            Some(_) => {
                let (tx, rx) = watch::channel(false);
                (Some(tx), Some(rx))
            }
            None => (None, None),
        };

        let inner = Arc::new(StoreInner {
            entries: DashMap::new(),
            clock,
            shutdown_tx,
        });

        if let (Some(interval), Some(rx)) = (config.sweep_interval, shutdown_rx) {
            // Fail loudly here rather than with a cryptic panic from tokio::spawn.
            if tokio::runtime::Handle::try_current().is_err() {
                panic!(
                    "burnbox::Store requires a Tokio runtime when a sweep \
                     interval is configured; build the store from within a \
                     runtime or leave the sweeper disabled"
                );
            }
            // The task holds only a weak handle, so it cannot keep the
            // store alive past its last clone.
            let sweeper = Arc::downgrade(&inner);
            tokio::spawn(Self::sweep_task(sweeper, interval, rx));
        }

        Self { inner }
    }

    /// Background task that periodically removes expired entries.
    async fn sweep_task(
        inner: Weak<StoreInner>,
        interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; wait out a full interval first.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Upgrade fails once the last store handle is gone.
                    let Some(inner) = inner.upgrade() else { break };
                    Self::sweep(&inner);
                }
                changed = shutdown_rx.changed() => {
                    // Err means the sender is gone, which only happens when
                    // the store itself is gone.
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    }

    /// Removes every expired entry, returning how many were dropped.
    fn sweep(inner: &StoreInner) -> usize {
        let now = inner.clock.now();
        let mut removed = 0;
        inner.entries.retain(|_, entry| {
            if entry.is_expired(now) {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Raw presence check: true iff something is stored under `key`.
    ///
    /// Expiry is not evaluated and nothing is removed; an expired entry
    /// that has not yet been retrieved or swept still counts as present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.inner.entries.contains_key(key)
    }

    /// Stores `payload` under `key` with the given time-to-live.
    ///
    /// The creation timestamp is taken from the injected clock. The payload
    /// is opaque: the store never inspects or transforms it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyKey`] for the empty key: it is the
    /// retrieval sentinel, so a secret stored under it could never be read
    /// back.
    ///
    /// Returns [`StoreError::KeyConflict`] if the key already holds a live
    /// entry, which is left untouched; overwriting a live secret is never
    /// done silently. An occupant that has already expired could never be
    /// retrieved anyway, so it is discarded and the key reused.
    pub fn store(
        &self,
        payload: impl Into<String>,
        key: impl Into<String>,
        ttl: TimeToLive,
    ) -> Result<(), StoreError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let now = self.inner.clock.now();
        match self.inner.entries.entry(key) {
            MapEntry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(Entry::new(payload.into(), now, ttl));
                    Ok(())
                } else {
                    Err(StoreError::KeyConflict {
                        key: occupied.key().clone(),
                    })
                }
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry::new(payload.into(), now, ttl));
                Ok(())
            }
        }
    }

    /// Retrieves and permanently removes the secret stored under `key`.
    ///
    /// Returns `None` when the key is empty, unknown, already consumed, or
    /// expired — the caller cannot tell which; only the warning log keeps
    /// the distinction. Removal happens on every terminal outcome, success
    /// and discovered expiry alike, so an entry can never be observed
    /// twice.
    ///
    /// The removal is a single atomic map operation: of any number of
    /// concurrent retrievals of one key, exactly one can succeed.
    pub fn retrieve(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            warn!("tried to retrieve secret with an empty key");
            return None;
        }
        let Some((_, entry)) = self.inner.entries.remove(key) else {
            warn!(key, "tried to retrieve secret for unknown key");
            return None;
        };
        if entry.is_expired(self.inner.clock.now()) {
            warn!(
                key,
                stored_at = ?entry.stored_at(),
                ttl = entry.ttl().label(),
                "tried to retrieve secret after expiry"
            );
            return None;
        }
        Some(entry.into_payload())
    }

    /// Removes every entry whose expiry has passed, returning the count.
    ///
    /// The background sweeper runs this on its interval; it can also be
    /// called directly. Live entries are never touched.
    pub fn purge_expired(&self) -> usize {
        Self::sweep(&self.inner)
    }

    /// Number of entries currently held, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// True if no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Stops the background sweeper, if one is running.
    ///
    /// Also happens automatically when the last clone of the store drops.
    pub fn shutdown(&self) {
        if let Some(tx) = &self.inner.shutdown_tx {
            let _ = tx.send(true);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        if let Some(tx) = &self.shutdown_tx {
            let _ = tx.send(true);
        }
    }
}
