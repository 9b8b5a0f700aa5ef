use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type for reading the launch trigger.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct TriggerResponse {
    clicked: bool,
}

impl SerdeJSONBodyHTTPResponseType for TriggerResponse {}

impl TriggerResponse {
    pub(crate) fn clicked(&self) -> bool { self.clicked }
}
