use super::FlightMode;
use crate::flight_control::{FlightComputer, FlightPhase};
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::ControlError;
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

/// Safe on the ground. Terminal.
pub struct LandedMode {}

impl LandedMode {
    const MODE_NAME: &'static str = "LandedMode";
    const SHUTDOWN_SETTLE: Duration = Duration::from_secs(3);

    pub fn new() -> Self { Self {} }
}

#[async_trait]
impl FlightMode for LandedMode {
    fn type_name(&self) -> &'static str { Self::MODE_NAME }

    fn phase(&self) -> FlightPhase { FlightPhase::Landed }

    async fn init_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        f_cont.message("Landed", FlightComputer::MESSAGE_DURATION).await;
        f_cont.message("Engines Off.", FlightComputer::MESSAGE_DURATION).await;
        f_cont.set_throttle(0.0).await?;
        FlightComputer::settle(Self::SHUTDOWN_SETTLE).await;
        f_cont.set_rcs(false).await
    }

    async fn exec_mode(&mut self, _context: Arc<ModeContext>) -> Result<(), ControlError> { Ok(()) }

    async fn exit_mode(&self, _context: Arc<ModeContext>) -> OpExitSignal { OpExitSignal::Terminate }
}
