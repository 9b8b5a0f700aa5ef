use crate::vehicle::TelemetrySnapshot;

/// Gravitational acceleration at the vehicle in m/s².
pub const G: f64 = 9.81;

/// Stopping distance the braking burn needs at the current state.
///
/// The net acceleration is taken as `available / current - G` while the engine produces thrust
/// and as `-G` otherwise. The result is `|v/2 * v/a|`, evaluated fresh from the snapshot on every
/// call. A vehicle at rest needs no distance; a zero net acceleration never stops it.
pub fn min_height_for_burn(telemetry: &TelemetrySnapshot) -> f64 {
    let current = telemetry.current_thrust();
    let accel = if current > 0.0 { telemetry.available_thrust() / current - G } else { -G };
    let v = telemetry.vertical_speed();
    if v == 0.0 {
        return 0.0;
    }
    if accel == 0.0 {
        return f64::INFINITY;
    }
    (v / 2.0 * (v / accel)).abs()
}

/// The altitude announced to the operator as the expected burn start.
pub fn expected_burn_altitude(telemetry: &TelemetrySnapshot) -> f64 {
    (telemetry.surface_altitude() - min_height_for_burn(telemetry)) / 2.0
}
