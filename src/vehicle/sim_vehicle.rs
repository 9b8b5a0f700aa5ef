use super::{
    Actuators, AttitudeControl, ControlError, HoldMode, Hud, LaunchTrigger, TelemetrySnapshot,
    TelemetrySource,
};
use crate::event;
use crate::flight_control::common::kinematics::G;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Physical parameters of the simulated vehicle.
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    /// Vehicle mass in kg, constant over the flight.
    pub mass: f64,
    /// Full-throttle thrust at a thrust limit of 1 in N.
    pub max_thrust: f64,
    /// Integration step.
    pub step: Duration,
    /// Altitude the vehicle starts at. Above zero it starts released with a lit engine.
    pub initial_altitude: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            mass: 10_000.0,
            max_thrust: 300_000.0,
            step: Duration::from_millis(10),
            initial_altitude: 0.0,
        }
    }
}

#[derive(Debug)]
struct SimState {
    altitude: f64,
    vertical_speed: f64,
    throttle: f64,
    thrust_limit: f64,
    stages: u32,
    engine_lit: bool,
    /// Launch clamps released, the vehicle moves.
    released: bool,
    autopilot_engaged: bool,
    pitch: f64,
    airborne: bool,
    touchdown_speed: Option<f64>,
    last_update: Instant,
}

/// Single-axis vertical point mass standing in for the real vehicle.
///
/// Physics advance lazily on every call, in fixed steps up to the current tokio instant.
pub struct SimVehicle {
    params: SimParams,
    state: Mutex<SimState>,
}

impl SimVehicle {
    pub fn new(params: SimParams) -> Self {
        let in_flight = params.initial_altitude > 0.0;
        let state = SimState {
            altitude: params.initial_altitude.max(0.0),
            vertical_speed: 0.0,
            throttle: 0.0,
            thrust_limit: 1.0,
            stages: 0,
            engine_lit: in_flight,
            released: in_flight,
            autopilot_engaged: false,
            pitch: 90.0,
            airborne: params.initial_altitude > 1.0,
            touchdown_speed: None,
            last_update: Instant::now(),
        };
        Self { params, state: Mutex::new(state) }
    }

    /// Impact speed of the first ground contact after lift-off.
    pub async fn touchdown_speed(&self) -> Option<f64> { self.state.lock().await.touchdown_speed }

    pub async fn stages_activated(&self) -> u32 { self.state.lock().await.stages }

    pub async fn altitude(&self) -> f64 { self.advanced().await.altitude }

    async fn advanced(&self) -> tokio::sync::MutexGuard<'_, SimState> {
        let mut state = self.state.lock().await;
        self.advance(&mut *state, Instant::now());
        state
    }

    fn thrust(&self, state: &SimState) -> f64 {
        if state.engine_lit { state.throttle * state.thrust_limit * self.params.max_thrust } else { 0.0 }
    }

    fn available_thrust(&self, state: &SimState) -> f64 {
        if state.engine_lit { state.thrust_limit * self.params.max_thrust } else { 0.0 }
    }

    fn advance(&self, state: &mut SimState, now: Instant) {
        let dt = self.params.step.as_secs_f64();
        while state.last_update + self.params.step <= now {
            state.last_update += self.params.step;
            if !state.released {
                continue;
            }
            let vertical_share =
                if state.autopilot_engaged { state.pitch.to_radians().sin() } else { 1.0 };
            let accel = self.thrust(state) * vertical_share / self.params.mass - G;
            state.vertical_speed += accel * dt;
            state.altitude += state.vertical_speed * dt;
            if state.altitude > 1.0 {
                state.airborne = true;
            }
            if state.altitude <= 0.0 {
                if state.airborne && state.touchdown_speed.is_none() {
                    state.touchdown_speed = Some(state.vertical_speed.abs());
                    event!("Sim touchdown at {:.2} m/s", state.vertical_speed.abs());
                }
                state.altitude = 0.0;
                state.vertical_speed = state.vertical_speed.max(0.0);
            }
        }
    }

    async fn apply(&self, update: impl FnOnce(&mut SimState) + Send) -> Result<(), ControlError> {
        let mut state = self.advanced().await;
        update(&mut *state);
        Ok(())
    }
}

#[async_trait]
impl TelemetrySource for SimVehicle {
    async fn observe(&self) -> Result<TelemetrySnapshot, ControlError> {
        let state = self.advanced().await;
        let apoapsis = if state.vertical_speed > 0.0 {
            state.altitude + state.vertical_speed.powi(2) / (2.0 * G)
        } else {
            state.altitude
        };
        Ok(TelemetrySnapshot::new(
            state.altitude,
            state.vertical_speed,
            self.thrust(&state),
            self.available_thrust(&state),
        )
        .with_apoapsis(apoapsis)
        .with_throttle(state.throttle))
    }
}

#[async_trait]
impl AttitudeControl for SimVehicle {
    async fn engage(&self) -> Result<(), ControlError> {
        self.apply(|s| s.autopilot_engaged = true).await
    }
    async fn disengage(&self) -> Result<(), ControlError> {
        self.apply(|s| s.autopilot_engaged = false).await
    }
    async fn point_at(&self, pitch: f64, _heading: f64) -> Result<(), ControlError> {
        self.apply(|s| s.pitch = pitch).await
    }
    async fn set_target_roll(&self, _roll: f64) -> Result<(), ControlError> { Ok(()) }
    // every hold mode points the single axis straight up or down
    async fn hold_mode(&self, mode: HoldMode) -> Result<(), ControlError> {
        event!("Sim holding {mode}");
        Ok(())
    }
    async fn release_hold(&self) -> Result<(), ControlError> { Ok(()) }
}

#[async_trait]
impl Actuators for SimVehicle {
    async fn set_throttle(&self, throttle: f64) -> Result<(), ControlError> {
        self.apply(|s| s.throttle = throttle.clamp(0.0, 1.0)).await
    }
    async fn set_gear(&self, _deployed: bool) -> Result<(), ControlError> { Ok(()) }
    async fn set_airbrakes(&self, _enabled: bool) -> Result<(), ControlError> { Ok(()) }
    async fn set_rcs(&self, _enabled: bool) -> Result<(), ControlError> { Ok(()) }
    async fn set_gimbal_lock(&self, _locked: bool) -> Result<(), ControlError> { Ok(()) }
    async fn set_thrust_limit(&self, limit: f64) -> Result<(), ControlError> {
        self.apply(|s| s.thrust_limit = limit.clamp(0.0, 1.0)).await
    }
    async fn set_gimbal_limit(&self, _limit: f64) -> Result<(), ControlError> { Ok(()) }
    async fn activate_next_stage(&self) -> Result<(), ControlError> {
        self.apply(|s| {
            s.stages += 1;
            match s.stages {
                1 => s.engine_lit = true,
                2 => s.released = true,
                _ => {}
            }
        })
        .await
    }
}

#[async_trait]
impl Hud for SimVehicle {
    async fn notify(&self, message: &str, _duration: Duration) { event!("HUD: {message}"); }
    async fn status(&self, text: &str) { event!("HUD status: {text}"); }
}

#[async_trait]
impl LaunchTrigger for SimVehicle {
    async fn triggered(&self) -> Result<bool, ControlError> { Ok(true) }
    async fn reset(&self) -> Result<(), ControlError> { Ok(()) }
}
