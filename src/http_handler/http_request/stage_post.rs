use super::command_ack::CommandAckResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the /stage endpoint, activating the next stage.
#[derive(Debug)]
pub(crate) struct StageRequest {}

impl NoBodyHTTPRequestType for StageRequest {}

impl HTTPRequestType for StageRequest {
    type Response = CommandAckResponse;
    fn endpoint(&self) -> &'static str { "/stage" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
