use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use super::trigger::TriggerResponse;

/// Request type for reading the launch trigger.
#[derive(Debug)]
pub(crate) struct TriggerRequest {}

impl NoBodyHTTPRequestType for TriggerRequest {}

impl HTTPRequestType for TriggerRequest {
    type Response = TriggerResponse;
    fn endpoint(&self) -> &'static str { "/trigger" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
