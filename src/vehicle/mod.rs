//! The collaborator side of the flight core: everything the guidance logic reads from or commands
//! on the vehicle goes through the traits in this module, bundled into a [`VehicleHandle`].

mod bridge_vehicle;
mod control_error;
#[cfg(test)]
pub(crate) mod mock;
mod sim_vehicle;
mod telemetry;

pub use bridge_vehicle::BridgeVehicle;
pub use control_error::ControlError;
pub use sim_vehicle::{SimParams, SimVehicle};
pub use telemetry::TelemetrySnapshot;

use crate::flight_control::FlightComputer;
use async_trait::async_trait;
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use strum_macros::Display;

/// Borrowed predicate over a telemetry snapshot, used by the blocking waits.
pub type TelemetryPredicate<'a> = &'a (dyn Fn(&TelemetrySnapshot) -> bool + Send + Sync);

/// Attitude hold modes of the stability-assist autopilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldMode {
    Prograde,
    Retrograde,
    StabilityAssist,
}

/// Raw access to the live vehicle values, polled by the
/// [`Supervisor`](crate::flight_control::Supervisor).
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn observe(&self) -> Result<TelemetrySnapshot, ControlError>;
}

/// The read view the flight core uses for telemetry.
#[async_trait]
pub trait TelemetryFeed: Send + Sync {
    /// The most recent snapshot.
    fn latest(&self) -> Result<TelemetrySnapshot, ControlError>;

    /// Blocks until `predicate` holds on the feed and returns the satisfying snapshot.
    ///
    /// The default implementation polls [`TelemetryFeed::latest`] on the control tick.
    async fn wait_for(
        &self,
        predicate: TelemetryPredicate<'_>,
    ) -> Result<TelemetrySnapshot, ControlError> {
        let mut ticker = FlightComputer::control_ticker();
        loop {
            ticker.tick().await;
            let snapshot = self.latest()?;
            if predicate(&snapshot) {
                return Ok(snapshot);
            }
        }
    }
}

#[async_trait]
pub trait AttitudeControl: Send + Sync {
    async fn engage(&self) -> Result<(), ControlError>;
    async fn disengage(&self) -> Result<(), ControlError>;
    async fn point_at(&self, pitch: f64, heading: f64) -> Result<(), ControlError>;
    async fn set_target_roll(&self, roll: f64) -> Result<(), ControlError>;
    /// Enables the stability-assist autopilot holding `mode`.
    async fn hold_mode(&self, mode: HoldMode) -> Result<(), ControlError>;
    /// Switches the stability-assist autopilot off.
    async fn release_hold(&self) -> Result<(), ControlError>;
}

/// Idempotent actuator setters.
#[async_trait]
pub trait Actuators: Send + Sync {
    async fn set_throttle(&self, throttle: f64) -> Result<(), ControlError>;
    async fn set_gear(&self, deployed: bool) -> Result<(), ControlError>;
    async fn set_airbrakes(&self, enabled: bool) -> Result<(), ControlError>;
    async fn set_rcs(&self, enabled: bool) -> Result<(), ControlError>;
    async fn set_gimbal_lock(&self, locked: bool) -> Result<(), ControlError>;
    async fn set_thrust_limit(&self, limit: f64) -> Result<(), ControlError>;
    async fn set_gimbal_limit(&self, limit: f64) -> Result<(), ControlError>;
    async fn activate_next_stage(&self) -> Result<(), ControlError>;
}

/// Display side channel. Failures are the implementation's business and never reach the core.
#[async_trait]
pub trait Hud: Send + Sync {
    async fn notify(&self, message: &str, duration: Duration);
    async fn status(&self, text: &str);
}

/// The external input that starts the flight.
#[async_trait]
pub trait LaunchTrigger: Send + Sync {
    async fn triggered(&self) -> Result<bool, ControlError>;
    async fn reset(&self) -> Result<(), ControlError>;
}

/// Everything a complete vehicle binding provides besides the telemetry feed.
pub trait Vehicle: TelemetrySource + AttitudeControl + Actuators + Hud + LaunchTrigger {}

impl<T> Vehicle for T where T: TelemetrySource + AttitudeControl + Actuators + Hud + LaunchTrigger {}

/// Bundle of the vehicle capabilities handed to the flight core.
#[derive(Clone)]
pub struct VehicleHandle {
    /// The live telemetry read view.
    telemetry: Arc<dyn TelemetryFeed>,
    /// The autopilot.
    attitude: Arc<dyn AttitudeControl>,
    /// Throttle, gear, staging and friends.
    actuators: Arc<dyn Actuators>,
    /// The on-screen display.
    hud: Arc<dyn Hud>,
    /// The launch trigger input.
    trigger: Arc<dyn LaunchTrigger>,
}

impl VehicleHandle {
    pub fn new(
        telemetry: Arc<dyn TelemetryFeed>,
        attitude: Arc<dyn AttitudeControl>,
        actuators: Arc<dyn Actuators>,
        hud: Arc<dyn Hud>,
        trigger: Arc<dyn LaunchTrigger>,
    ) -> Self {
        Self { telemetry, attitude, actuators, hud, trigger }
    }

    /// Builds a handle where a single vehicle binding serves every capability.
    pub fn from_vehicle<V>(telemetry: Arc<dyn TelemetryFeed>, vehicle: &Arc<V>) -> Self
    where V: Vehicle + 'static {
        Self::new(
            telemetry,
            Arc::clone(vehicle) as Arc<dyn AttitudeControl>,
            Arc::clone(vehicle) as Arc<dyn Actuators>,
            Arc::clone(vehicle) as Arc<dyn Hud>,
            Arc::clone(vehicle) as Arc<dyn LaunchTrigger>,
        )
    }

    pub fn telemetry(&self) -> &Arc<dyn TelemetryFeed> { &self.telemetry }
    pub fn attitude(&self) -> &Arc<dyn AttitudeControl> { &self.attitude }
    pub fn actuators(&self) -> &Arc<dyn Actuators> { &self.actuators }
    pub fn hud(&self) -> &Arc<dyn Hud> { &self.hud }
    pub fn trigger(&self) -> &Arc<dyn LaunchTrigger> { &self.trigger }
}
