pub(crate) mod command_ack;
pub(crate) mod response_common;
pub(crate) mod telemetry;
pub(crate) mod trigger;
