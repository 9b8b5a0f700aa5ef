use super::command_ack::CommandAckResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /status endpoint, replacing the status line on the vehicle display.
#[derive(serde::Serialize, Debug)]
pub(crate) struct StatusRequest {
    pub(crate) text: String,
}

impl JSONBodyHTTPRequestType for StatusRequest {
    type Body = StatusRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for StatusRequest {
    type Response = CommandAckResponse;
    fn endpoint(&self) -> &'static str { "/status" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
