use super::{ControlError, TelemetryFeed, TelemetryPredicate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// One read of the live vehicle telemetry.
///
/// Vertical speed is signed, negative values mean the vehicle is descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    /// Altitude above the terrain in meters.
    surface_altitude: f64,
    /// Vertical speed in m/s.
    vertical_speed: f64,
    /// Thrust the engines currently produce in N.
    current_thrust: f64,
    /// Thrust available at full throttle under the current thrust limit in N.
    available_thrust: f64,
    /// Apoapsis altitude of the current trajectory in meters.
    apoapsis_altitude: f64,
    /// Throttle as reported back by the vehicle. Diagnostics only.
    throttle: f64,
    timestamp: DateTime<Utc>,
}

impl TelemetrySnapshot {
    pub fn new(
        surface_altitude: f64,
        vertical_speed: f64,
        current_thrust: f64,
        available_thrust: f64,
    ) -> Self {
        Self {
            surface_altitude,
            vertical_speed,
            current_thrust,
            available_thrust,
            apoapsis_altitude: surface_altitude,
            throttle: 0.0,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_apoapsis(mut self, apoapsis_altitude: f64) -> Self {
        self.apoapsis_altitude = apoapsis_altitude;
        self
    }

    #[must_use]
    pub fn with_throttle(mut self, throttle: f64) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn surface_altitude(&self) -> f64 { self.surface_altitude }
    pub fn vertical_speed(&self) -> f64 { self.vertical_speed }
    pub fn current_thrust(&self) -> f64 { self.current_thrust }
    pub fn available_thrust(&self) -> f64 { self.available_thrust }
    pub fn apoapsis_altitude(&self) -> f64 { self.apoapsis_altitude }
    pub fn throttle(&self) -> f64 { self.throttle }
    pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }
}

/// The production feed: the receiving end of the channel the
/// [`Supervisor`](crate::flight_control::Supervisor) publishes into.
///
/// Waits are push-notified, a closed channel means the supervisor gave up on the source.
#[async_trait]
impl TelemetryFeed for watch::Receiver<TelemetrySnapshot> {
    fn latest(&self) -> Result<TelemetrySnapshot, ControlError> {
        if self.has_changed().is_err() {
            return Err(ControlError::TelemetryUnavailable);
        }
        Ok(*self.borrow())
    }

    async fn wait_for(
        &self,
        predicate: TelemetryPredicate<'_>,
    ) -> Result<TelemetrySnapshot, ControlError> {
        let mut rx = self.clone();
        watch::Receiver::wait_for(&mut rx, |snapshot| predicate(snapshot))
            .await
            .map(|snapshot| *snapshot)
            .map_err(|_| ControlError::TelemetryUnavailable)
    }
}
