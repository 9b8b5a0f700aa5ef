use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type of every command endpoint.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct CommandAckResponse {
    /// Whether the bridge applied the command to the vehicle.
    accepted: bool,
}

impl SerdeJSONBodyHTTPResponseType for CommandAckResponse {}

impl CommandAckResponse {
    pub(crate) fn accepted(&self) -> bool { self.accepted }
}
