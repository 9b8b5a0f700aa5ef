use crate::flight_control::FlightPhase;
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::ControlError;
use async_trait::async_trait;
use std::sync::Arc;

/// One phase of the flight.
///
/// The sequencer calls `init_mode` once for the one-shot setup, then `exec_mode` for the blocking
/// wait or control loop, then `exit_mode` to learn the next phase.
#[async_trait]
pub trait FlightMode: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn phase(&self) -> FlightPhase;
    async fn init_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError>;
    async fn exec_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError>;
    async fn exit_mode(&self, context: Arc<ModeContext>) -> OpExitSignal;
}
