use super::{BurnWaitMode, FlightMode};
use crate::flight_control::{FlightComputer, FlightPhase};
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::{ControlError, HoldMode};
use async_trait::async_trait;
use std::sync::Arc;

/// Unpowered climb from main engine cut-off to apoapsis.
pub struct CoastMode {}

impl CoastMode {
    const MODE_NAME: &'static str = "CoastMode";

    pub fn new() -> Self { Self {} }
}

#[async_trait]
impl FlightMode for CoastMode {
    fn type_name(&self) -> &'static str { Self::MODE_NAME }

    fn phase(&self) -> FlightPhase { FlightPhase::Coasting }

    async fn init_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        f_cont.message("MECO", FlightComputer::MESSAGE_DURATION).await;
        f_cont.set_throttle(0.0).await?;
        f_cont.switch_to_hold(HoldMode::Prograde).await
    }

    async fn exec_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        if f_cont.telemetry()?.surface_altitude() < context.config().target_apoapsis() {
            f_cont.wait_until(|t| t.vertical_speed() <= 0.0).await?;
        }
        Ok(())
    }

    async fn exit_mode(&self, _context: Arc<ModeContext>) -> OpExitSignal {
        OpExitSignal::Next(Box::new(BurnWaitMode::after_coast()))
    }
}
