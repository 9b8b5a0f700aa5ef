use super::{AscentMode, BurnWaitMode, FlightMode};
use crate::config::EntryPhase;
use crate::flight_control::{FlightComputer, FlightPhase};
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::ControlError;
use crate::{error, info, warn};
use async_trait::async_trait;
use std::sync::Arc;

/// On the pad (or hanging below the drop rig), waiting for the launch trigger.
pub struct PreLaunchMode {}

impl PreLaunchMode {
    const MODE_NAME: &'static str = "PreLaunchMode";

    pub fn new() -> Self { Self {} }
}

#[async_trait]
impl FlightMode for PreLaunchMode {
    fn type_name(&self) -> &'static str { Self::MODE_NAME }

    fn phase(&self) -> FlightPhase { FlightPhase::PreLaunch }

    async fn init_mode(&mut self, _context: Arc<ModeContext>) -> Result<(), ControlError> {
        info!("Waiting for launch trigger.");
        Ok(())
    }

    async fn exec_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let trigger = context.f_cont().vehicle().trigger();
        let mut ticker = FlightComputer::control_ticker();
        let mut failed_last = false;
        loop {
            ticker.tick().await;
            match trigger.triggered().await {
                Ok(true) => break,
                Ok(false) => failed_last = false,
                Err(e) if e.is_transient() && !failed_last => {
                    warn!("Trigger not readable: {e}. Retrying once.");
                    failed_last = true;
                }
                Err(e) => {
                    error!("Launch trigger lost: {e}");
                    return Err(e);
                }
            }
        }
        trigger.reset().await
    }

    async fn exit_mode(&self, context: Arc<ModeContext>) -> OpExitSignal {
        match context.config().entry_phase() {
            EntryPhase::Ascending => OpExitSignal::Next(Box::new(AscentMode::new())),
            EntryPhase::AwaitingBurn => OpExitSignal::Next(Box::new(BurnWaitMode::drop_test())),
        }
    }
}
