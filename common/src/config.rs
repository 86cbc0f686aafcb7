use std::time::Duration;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Config {
    /// Hides the banner line at startup.
    pub no_banner: bool,
    /// 0 prints everything, 1 drops headers and summaries, 2 only prints
    /// relayed output and errors.
    pub quiet: u8,
    pub dispatch: DispatchConfig,
}

/// Knobs of the dispatcher itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Maximum number of credential checks in flight during a sweep.
    ///
    /// Values below 1 are treated as 1.
    pub concurrency: usize,
    /// Deadline of every single capability call.
    pub call_timeout: Duration,
    /// Pause before each host of a sweep is dispatched. A random jitter of up
    /// to the same duration is added to avoid a fixed request rhythm.
    pub pacing: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            pacing: Duration::ZERO,
        }
    }
}

impl DispatchConfig {
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }
}
