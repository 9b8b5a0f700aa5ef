use super::{
    common::pid::{Pid, PidGains},
    flight_computer::FlightComputer,
};
use crate::vehicle::{ControlError, TelemetrySnapshot};

/// Throttle control of the final approach.
///
/// The PID runs with a zero setpoint on the vertical speed biased by [`Self::SPEED_BIAS`], which
/// makes it hold a 3 m/s sink rate. Its derivative acts on the measurement.
#[derive(Debug, Clone)]
pub struct TouchdownController {
    pid: Pid,
}

impl TouchdownController {
    pub const GAINS: PidGains = PidGains::new(0.05, 0.01, 0.015);
    pub const SPEED_BIAS: f64 = 3.0;
    /// Slower descents cut the engine.
    const IDLE_SPEED: f64 = -2.0;
    /// Faster descents run the engine at full throttle.
    const FULL_SPEED: f64 = -5.0;
    /// The controller takes over once the descent is at least this slow.
    const ARMING_SPEED: f64 = -6.0;
    const ACTIVE_ALTITUDE: f64 = 8.0;
    const ACTIVE_SPEED: f64 = -0.5;
    /// Thrust limit applied for the whole approach.
    pub const THRUST_LIMIT: f64 = 0.5;

    pub fn new() -> Self {
        let pid =
            Pid::new(Self::GAINS, 0.0, FlightComputer::CONTROL_TICK).proportional_on_measurement();
        Self { pid }
    }

    pub fn correction(&mut self, biased_speed: f64) -> f64 { self.pid.update(biased_speed) }

    /// Throttle for the last commanded `throttle` and `correction` at the current sink rate.
    pub fn command(throttle: f64, correction: f64, telemetry: &TelemetrySnapshot) -> f64 {
        let vs = telemetry.vertical_speed();
        if vs > Self::IDLE_SPEED {
            0.0
        } else if vs < Self::FULL_SPEED {
            1.0
        } else {
            (throttle + correction).clamp(0.0, 1.0)
        }
    }

    /// Issues the throttle for this tick and returns the biased vertical speed.
    pub async fn update_throttle(
        f_cont: &FlightComputer,
        correction: f64,
        telemetry: &TelemetrySnapshot,
    ) -> Result<f64, ControlError> {
        let throttle = Self::command(f_cont.throttle().await, correction, telemetry);
        f_cont.set_throttle(throttle).await?;
        Ok(telemetry.vertical_speed() + Self::SPEED_BIAS)
    }

    /// Entry guard of the touchdown phase.
    pub fn is_armed(telemetry: &TelemetrySnapshot) -> bool {
        telemetry.vertical_speed() >= Self::ARMING_SPEED
    }

    /// Whether the approach loop should keep running.
    pub fn is_active(telemetry: &TelemetrySnapshot) -> bool {
        telemetry.surface_altitude() > Self::ACTIVE_ALTITUDE
            || telemetry.vertical_speed() < Self::ACTIVE_SPEED
    }
}

impl Default for TouchdownController {
    fn default() -> Self { Self::new() }
}
