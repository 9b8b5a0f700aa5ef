use super::{FlightMode, LandedMode};
use crate::event;
use crate::flight_control::{FlightComputer, FlightPhase, TouchdownController};
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::ControlError;
use async_trait::async_trait;
use std::sync::Arc;

/// The final low-speed approach down to the ground.
pub struct TouchdownMode {
    controller: TouchdownController,
}

impl TouchdownMode {
    const MODE_NAME: &'static str = "TouchdownMode";

    pub fn new() -> Self { Self { controller: TouchdownController::new() } }

    /// Blocks until the descent is slow enough for the approach controller.
    async fn await_arming(f_cont: &FlightComputer) -> Result<(), ControlError> {
        f_cont.wait_until(TouchdownController::is_armed).await?;
        Ok(())
    }
}

#[async_trait]
impl FlightMode for TouchdownMode {
    fn type_name(&self) -> &'static str { Self::MODE_NAME }

    fn phase(&self) -> FlightPhase { FlightPhase::TouchdownControl }

    async fn init_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        f_cont.set_gimbal_lock(false).await?;
        f_cont.set_airbrakes(false).await?;
        f_cont.message("Transitioned to Touchdown Control", FlightComputer::MESSAGE_DURATION).await;
        f_cont.set_throttle(1.0).await?;
        Ok(())
    }

    async fn exec_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = Arc::clone(context.f_cont());
        Self::await_arming(&f_cont).await?;
        f_cont.set_thrust_limit(TouchdownController::THRUST_LIMIT).await?;

        let mut measurement =
            TouchdownController::update_throttle(&f_cont, 0.0, &f_cont.telemetry()?).await?;
        let mut ticker = FlightComputer::control_ticker();
        loop {
            ticker.tick().await;
            let telemetry = f_cont.telemetry()?;
            if !TouchdownController::is_active(&telemetry) {
                return Ok(());
            }
            let correction = self.controller.correction(measurement);
            measurement = TouchdownController::update_throttle(&f_cont, correction, &telemetry).await?;
            event!(
                "Touchdown: alt {:.1} vs {:.2} correction {correction:.4}",
                telemetry.surface_altitude(),
                telemetry.vertical_speed()
            );
        }
    }

    async fn exit_mode(&self, _context: Arc<ModeContext>) -> OpExitSignal {
        OpExitSignal::Next(Box::new(LandedMode::new()))
    }
}
