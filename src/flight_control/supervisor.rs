use crate::vehicle::{ControlError, TelemetrySnapshot, TelemetrySource};
use crate::{error, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval, sleep};

/// Background poller that keeps the telemetry feed fresh.
///
/// Reads the [`TelemetrySource`] at a fixed rate and publishes every snapshot into a `watch`
/// channel. The receiving ends are the [`TelemetryFeed`](crate::vehicle::TelemetryFeed) the
/// flight core reads from.
pub struct Supervisor {
    source: Arc<dyn TelemetrySource>,
    feed: watch::Sender<TelemetrySnapshot>,
}

impl Supervisor {
    /// Constant update interval for telemetry polls in the `run()` method
    const POLL_INTERVAL: Duration = Duration::from_millis(10);
    /// Wait before the single retry of a failed poll
    const RETRY_BACKOFF: Duration = Duration::from_millis(50);

    /// Creates a new instance of `Supervisor`, seeding the feed with a first read of `source`.
    pub async fn new(
        source: Arc<dyn TelemetrySource>,
    ) -> Result<(Self, watch::Receiver<TelemetrySnapshot>), ControlError> {
        let initial = Self::observe_with_retry(source.as_ref()).await?;
        let (feed, rx) = watch::channel(initial);
        Ok((Self { source, feed }, rx))
    }

    /// Starts the supervisor loop.
    ///
    /// Returns once the source failed twice in a row or every receiver is gone. Either way the
    /// sender is dropped and readers see [`ControlError::TelemetryUnavailable`] from then on.
    pub async fn run(self) {
        let mut ticker = interval(Self::POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if self.feed.is_closed() {
                return;
            }
            match Self::observe_with_retry(self.source.as_ref()).await {
                Ok(snapshot) => {
                    self.feed.send_replace(snapshot);
                }
                Err(e) => {
                    error!("Telemetry lost after retry: {e}. Closing feed.");
                    return;
                }
            }
        }
    }

    async fn observe_with_retry(
        source: &dyn TelemetrySource,
    ) -> Result<TelemetrySnapshot, ControlError> {
        match source.observe().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) if e.is_transient() => {
                warn!("Telemetry poll failed: {e}. Retrying once.");
                sleep(Self::RETRY_BACKOFF).await;
                source.observe().await
            }
            Err(e) => Err(e),
        }
    }
}
