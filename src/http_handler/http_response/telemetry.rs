use super::response_common::SerdeJSONBodyHTTPResponseType;
use crate::vehicle::TelemetrySnapshot;

/// Response type for the /telemetry endpoint.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct TelemetryResponse {
    surface_altitude: f64,
    vertical_speed: f64,
    thrust: f64,
    available_thrust: f64,
    apoapsis_altitude: f64,
    #[serde(default)]
    throttle: f64,
}

impl SerdeJSONBodyHTTPResponseType for TelemetryResponse {}

impl From<TelemetryResponse> for TelemetrySnapshot {
    fn from(value: TelemetryResponse) -> Self {
        TelemetrySnapshot::new(
            value.surface_altitude.max(0.0),
            value.vertical_speed,
            value.thrust.max(0.0),
            value.available_thrust.max(0.0),
        )
        .with_apoapsis(value.apoapsis_altitude)
        .with_throttle(value.throttle)
    }
}
