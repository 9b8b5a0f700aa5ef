use super::command_ack::CommandAckResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for re-arming the launch trigger.
#[derive(serde::Serialize, Debug)]
pub(crate) struct TriggerResetRequest {
    pub(crate) clicked: bool,
}

impl JSONBodyHTTPRequestType for TriggerResetRequest {
    type Body = TriggerResetRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for TriggerResetRequest {
    type Response = CommandAckResponse;
    fn endpoint(&self) -> &'static str { "/trigger" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
