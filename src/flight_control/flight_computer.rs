use crate::vehicle::{ControlError, HoldMode, TelemetrySnapshot, VehicleHandle};
use crate::{event, info};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{Interval, MissedTickBehavior, interval, sleep};

/// The actuator state the flight computer last commanded.
///
/// The vehicle is never asked for these values, the last write is trusted as current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorTargets {
    pub throttle: f64,
    pub gear_deployed: bool,
    pub airbrakes_enabled: bool,
    pub rcs_enabled: bool,
    pub gimbal_locked: bool,
    pub thrust_limit: f64,
    pub gimbal_limit: f64,
}

impl Default for ActuatorTargets {
    fn default() -> Self {
        Self {
            throttle: 0.0,
            gear_deployed: false,
            airbrakes_enabled: false,
            rcs_enabled: false,
            gimbal_locked: false,
            thrust_limit: 1.0,
            gimbal_limit: 1.0,
        }
    }
}

/// Vehicle-facing half of the flight core.
///
/// Wraps the [`VehicleHandle`] with the bookkeeping the phases rely on: clamped throttle
/// commands, the last issued [`ActuatorTargets`], operator messages and the blocking waits.
pub struct FlightComputer {
    vehicle: VehicleHandle,
    targets: RwLock<ActuatorTargets>,
}

impl FlightComputer {
    /// Fixed rate of every control loop and level-polled wait.
    pub const CONTROL_TICK: Duration = Duration::from_millis(50);
    /// Default display duration of operator messages.
    pub const MESSAGE_DURATION: Duration = Duration::from_secs(3);
    /// Time the autopilot gets after a disengage before a new hold mode is requested.
    const HOLD_SETTLE: Duration = Duration::from_secs(1);

    pub fn new(vehicle: VehicleHandle) -> Self {
        Self { vehicle, targets: RwLock::new(ActuatorTargets::default()) }
    }

    /// A ticker running at [`FlightComputer::CONTROL_TICK`]. Late ticks are delayed, not burst.
    pub fn control_ticker() -> Interval {
        let mut ticker = interval(Self::CONTROL_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    pub fn vehicle(&self) -> &VehicleHandle { &self.vehicle }

    /// Reads the latest telemetry snapshot.
    pub fn telemetry(&self) -> Result<TelemetrySnapshot, ControlError> {
        self.vehicle.telemetry().latest()
    }

    pub async fn targets(&self) -> ActuatorTargets { *self.targets.read().await }

    pub async fn throttle(&self) -> f64 { self.targets.read().await.throttle }

    /// Commands `throttle` clamped to `[0, 1]` and returns the value actually issued.
    pub async fn set_throttle(&self, throttle: f64) -> Result<f64, ControlError> {
        let clamped = if throttle.is_nan() { 0.0 } else { throttle.clamp(0.0, 1.0) };
        self.vehicle.actuators().set_throttle(clamped).await?;
        self.targets.write().await.throttle = clamped;
        Ok(clamped)
    }

    pub async fn set_gear(&self, deployed: bool) -> Result<(), ControlError> {
        self.vehicle.actuators().set_gear(deployed).await?;
        self.targets.write().await.gear_deployed = deployed;
        Ok(())
    }

    pub async fn set_airbrakes(&self, enabled: bool) -> Result<(), ControlError> {
        self.vehicle.actuators().set_airbrakes(enabled).await?;
        self.targets.write().await.airbrakes_enabled = enabled;
        Ok(())
    }

    pub async fn set_rcs(&self, enabled: bool) -> Result<(), ControlError> {
        self.vehicle.actuators().set_rcs(enabled).await?;
        self.targets.write().await.rcs_enabled = enabled;
        Ok(())
    }

    pub async fn set_gimbal_lock(&self, locked: bool) -> Result<(), ControlError> {
        self.vehicle.actuators().set_gimbal_lock(locked).await?;
        self.targets.write().await.gimbal_locked = locked;
        Ok(())
    }

    pub async fn set_thrust_limit(&self, limit: f64) -> Result<(), ControlError> {
        let clamped = limit.clamp(0.0, 1.0);
        self.vehicle.actuators().set_thrust_limit(clamped).await?;
        self.targets.write().await.thrust_limit = clamped;
        Ok(())
    }

    pub async fn set_gimbal_limit(&self, limit: f64) -> Result<(), ControlError> {
        let clamped = limit.clamp(0.0, 1.0);
        self.vehicle.actuators().set_gimbal_limit(clamped).await?;
        self.targets.write().await.gimbal_limit = clamped;
        Ok(())
    }

    pub async fn activate_next_stage(&self) -> Result<(), ControlError> {
        event!("Activating next stage");
        self.vehicle.actuators().activate_next_stage().await
    }

    /// Hands attitude over from the autopilot to the stability-assist hold `mode`.
    pub async fn switch_to_hold(&self, mode: HoldMode) -> Result<(), ControlError> {
        let attitude = self.vehicle.attitude();
        attitude.disengage().await?;
        Self::settle(Self::HOLD_SETTLE).await;
        attitude.hold_mode(mode).await
    }

    /// Shows `text` on the vehicle display and mirrors it into the log.
    pub async fn message(&self, text: &str, duration: Duration) {
        info!("{text}");
        self.vehicle.hud().notify(text, duration).await;
    }

    pub async fn status(&self, text: &str) { self.vehicle.hud().status(text).await; }

    /// Timed wait, e.g. to let the attitude settle after a mode change.
    pub async fn settle(duration: Duration) { sleep(duration).await; }

    /// Level-polled wait: checks `predicate` against the latest snapshot every control tick.
    pub async fn wait_until<F>(&self, predicate: F) -> Result<TelemetrySnapshot, ControlError>
    where F: Fn(&TelemetrySnapshot) -> bool + Send + Sync {
        let mut ticker = Self::control_ticker();
        loop {
            ticker.tick().await;
            let snapshot = self.telemetry()?;
            if predicate(&snapshot) {
                return Ok(snapshot);
            }
        }
    }

    /// Event-style wait: lets the feed notify once `predicate` holds.
    pub async fn wait_for_event<F>(&self, predicate: F) -> Result<TelemetrySnapshot, ControlError>
    where F: Fn(&TelemetrySnapshot) -> bool + Send + Sync {
        self.vehicle.telemetry().wait_for(&predicate).await
    }
}
