use super::{
    common::{
        kinematics::min_height_for_burn,
        pid::{Pid, PidGains},
    },
    flight_computer::FlightComputer,
};
use crate::vehicle::{ControlError, TelemetrySnapshot};
use strum_macros::Display;

/// Throttle decision of one suicide burn tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentCommand {
    throttle: f64,
    margin: f64,
}

impl DescentCommand {
    pub fn throttle(&self) -> f64 { self.throttle }
    /// Altitude above the required stopping distance, the next PID measurement.
    pub fn margin(&self) -> f64 { self.margin }
}

/// Why the suicide burn loop ended.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DescentExit {
    /// Surface altitude at or below the touchdown hand-off height.
    GroundImminent,
    /// Descent slowed to the point where the burn has nothing left to brake.
    DescentArrested,
}

/// Throttle control of the high-speed braking burn.
///
/// Keeps the vehicle on the stopping-distance curve of the kinematic estimate: the PID corrects
/// the throttle towards a zero altitude margin, hard overrides apply outside a ±5 m band and
/// below 3 m/s of descent.
#[derive(Debug, Clone)]
pub struct DescentController {
    pid: Pid,
}

impl DescentController {
    pub const GAINS: PidGains = PidGains::new(0.05, 0.01, 0.015);
    /// Descent speeds above this cut the engine.
    const CUTOFF_SPEED: f64 = -3.0;
    /// Half width of the band in which the PID correction is applied.
    const MARGIN_BAND: f64 = 5.0;
    const EXIT_ALTITUDE: f64 = 5.0;
    const EXIT_SPEED: f64 = -1.0;

    pub fn new() -> Self {
        Self { pid: Pid::new(Self::GAINS, 0.0, FlightComputer::CONTROL_TICK) }
    }

    /// Next PID correction for the margin measured last tick.
    pub fn correction(&mut self, margin: f64) -> f64 { self.pid.update(margin) }

    /// Throttle and altitude margin for the current `throttle`, `correction` and `telemetry`.
    pub fn command(throttle: f64, correction: f64, telemetry: &TelemetrySnapshot) -> DescentCommand {
        let mut throttle = if telemetry.vertical_speed() > Self::CUTOFF_SPEED {
            0.0
        } else {
            (throttle + correction).clamp(0.0, 1.0)
        };
        let margin = telemetry.surface_altitude() - min_height_for_burn(telemetry);
        if margin > Self::MARGIN_BAND {
            throttle = 0.0;
        } else if margin < -Self::MARGIN_BAND {
            throttle = 1.0;
        }
        DescentCommand { throttle, margin }
    }

    /// Applies `correction` to the last commanded throttle and returns the altitude margin.
    pub async fn control_descent(
        f_cont: &FlightComputer,
        correction: f64,
        telemetry: &TelemetrySnapshot,
    ) -> Result<f64, ControlError> {
        let cmd = Self::command(f_cont.throttle().await, correction, telemetry);
        f_cont.set_throttle(cmd.throttle).await?;
        Ok(cmd.margin)
    }

    /// `None` while the burn loop should keep running.
    pub fn exit_condition(telemetry: &TelemetrySnapshot) -> Option<DescentExit> {
        if telemetry.surface_altitude() <= Self::EXIT_ALTITUDE {
            Some(DescentExit::GroundImminent)
        } else if telemetry.vertical_speed() >= Self::EXIT_SPEED {
            Some(DescentExit::DescentArrested)
        } else {
            None
        }
    }
}

impl Default for DescentController {
    fn default() -> Self { Self::new() }
}
