use super::command_ack::CommandAckResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /message endpoint, a transient on-screen message.
#[derive(serde::Serialize, Debug)]
pub(crate) struct MessageRequest {
    pub(crate) text: String,
    /// Display time in seconds.
    pub(crate) duration: f64,
}

impl JSONBodyHTTPRequestType for MessageRequest {
    type Body = MessageRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for MessageRequest {
    type Response = CommandAckResponse;
    fn endpoint(&self) -> &'static str { "/message" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
