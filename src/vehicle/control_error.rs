use crate::flight_control::FlightPhase;
use strum_macros::Display;

/// Failure of a collaborator call or of the phase sequencing itself.
///
/// Only the two read failures are transient. Everything else aborts the run.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ControlError {
    /// The live telemetry feed could not be read (or has been closed by the supervisor).
    #[strum(to_string = "telemetry unavailable")]
    TelemetryUnavailable,
    /// The launch trigger input could not be read.
    #[strum(to_string = "launch trigger unavailable")]
    TriggerUnavailable,
    /// The vehicle refused or failed to apply a command.
    #[strum(to_string = "actuator command {command} rejected")]
    ActuatorRejected { command: &'static str },
    /// The sequencer was asked to enter a phase that does not strictly follow the current one.
    #[strum(to_string = "illegal phase transition {from} -> {to}")]
    IllegalTransition { from: FlightPhase, to: FlightPhase },
}

impl ControlError {
    /// Whether the failure is worth a single retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, ControlError::TelemetryUnavailable | ControlError::TriggerUnavailable)
    }
}

impl std::error::Error for ControlError {}
