use super::{
    mode::{FlightMode, PreLaunchMode},
    mode_context::ModeContext,
    signal::OpExitSignal,
};
use crate::flight_control::FlightPhase;
use crate::vehicle::ControlError;
use crate::{error, phase, warn};
use std::sync::Arc;

/// Drives the flight modes from the entry mode until one terminates.
pub struct FlightSequencer;

impl FlightSequencer {
    /// The mode every regular flight starts in.
    pub fn entry_mode() -> Box<dyn FlightMode> { Box::new(PreLaunchMode::new()) }

    /// Flies `entry` and every mode it hands over to. Returns the phases in the order they were
    /// entered.
    ///
    /// Any collaborator failure aborts the run, as does a mode handing over to a phase that does
    /// not strictly follow its own.
    pub async fn run(
        context: Arc<ModeContext>,
        entry: Box<dyn FlightMode>,
    ) -> Result<Vec<FlightPhase>, ControlError> {
        let mut mode = entry;
        let mut flown = Vec::new();
        loop {
            let phase = mode.phase();
            let name = mode.type_name();
            phase!("Entering {phase} in {name}.");
            let status: &'static str = phase.into();
            context.f_cont().status(status).await;
            flown.push(phase);

            mode.init_mode(Arc::clone(&context))
                .await
                .inspect_err(|e| error!("{name} setup failed: {e}"))?;
            mode.exec_mode(Arc::clone(&context))
                .await
                .inspect_err(|e| error!("{name} aborted: {e}"))?;

            match mode.exit_mode(Arc::clone(&context)).await {
                OpExitSignal::Next(next) => {
                    Self::check_transition(phase, next.phase())
                        .inspect_err(|e| error!("{name} handed over illegally: {e}"))?;
                    mode = next;
                }
                OpExitSignal::Terminate => {
                    if !phase.is_terminal() {
                        warn!("Flight terminated in non-terminal phase {phase}.");
                    }
                    phase!("Flight complete after {} phases.", flown.len());
                    return Ok(flown);
                }
            }
        }
    }

    /// Phases only ever move forward.
    pub fn check_transition(from: FlightPhase, to: FlightPhase) -> Result<(), ControlError> {
        if to > from { Ok(()) } else { Err(ControlError::IllegalTransition { from, to }) }
    }
}
