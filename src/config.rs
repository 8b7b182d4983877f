use std::time::Duration;

/// Store configuration.
///
/// By default there is no background sweep: expired entries are removed
/// lazily, when a retrieval trips over them. Setting a sweep interval
/// spawns a task that also reclaims entries nobody ever comes back for.
///
/// # Example
///
/// ```rust,no_run
/// use burnbox::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_sweep_interval(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Interval between background sweeps. `None` disables the sweeper.
    pub sweep_interval: Option<Duration>,
}

impl StoreConfig {
    /// Creates a configuration with the sweeper disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the background sweeper at the given interval.
    ///
    /// The sweeper only ever removes entries whose expiry has already
    /// passed, so it cannot make a live secret unretrievable.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }
}
