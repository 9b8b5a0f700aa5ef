use super::command_ack::CommandAckResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /control endpoint.
///
/// Only the fields that are set are sent, the bridge leaves every other actuator untouched.
#[derive(serde::Serialize, Debug, Default)]
pub(crate) struct ControlRequest {
    /// Main engine throttle in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) throttle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gear: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) airbrakes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rcs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gimbal_locked: Option<bool>,
    /// Engine thrust limit in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) thrust_limit: Option<f64>,
    /// Engine gimbal range limit in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gimbal_limit: Option<f64>,
}

impl JSONBodyHTTPRequestType for ControlRequest {
    type Body = ControlRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for ControlRequest {
    type Response = CommandAckResponse;
    fn endpoint(&self) -> &'static str { "/control" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
