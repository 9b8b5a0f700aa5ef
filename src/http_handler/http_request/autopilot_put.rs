use super::command_ack::CommandAckResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};
use crate::vehicle::HoldMode;

/// Request type for the /autopilot endpoint.
///
/// `engaged` drives the pitch/heading autopilot, `sas` and `hold` the stability-assist system.
#[derive(serde::Serialize, Debug, Default)]
pub(crate) struct AutopilotRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) engaged: Option<bool>,
    /// Target pitch in degrees above the horizon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pitch: Option<f64>,
    /// Target heading in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) heading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) roll: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hold: Option<HoldMode>,
}

impl JSONBodyHTTPRequestType for AutopilotRequest {
    type Body = AutopilotRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for AutopilotRequest {
    type Response = CommandAckResponse;
    fn endpoint(&self) -> &'static str { "/autopilot" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
