use super::http_response::{command_ack, response_common, telemetry, trigger};

pub(crate) mod autopilot_put;
pub(crate) mod control_put;
pub(crate) mod message_post;
pub(crate) mod request_common;
pub(crate) mod stage_post;
pub(crate) mod status_put;
pub(crate) mod telemetry_get;
pub(crate) mod trigger_get;
pub(crate) mod trigger_put;
