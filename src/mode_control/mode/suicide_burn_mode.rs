use super::{FlightMode, TouchdownMode};
use crate::flight_control::{DescentController, DescentExit, FlightComputer, FlightPhase};
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::{ControlError, HoldMode, TelemetrySnapshot};
use crate::{event, info};
use async_trait::async_trait;
use std::sync::Arc;

/// Attitude regime inside the burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BurnAttitude {
    /// Stability assist holding retrograde.
    Retrograde,
    /// Autopilot pointing straight up.
    Upright,
}

/// The high-speed braking burn.
pub struct SuicideBurnMode {
    controller: DescentController,
    gear_deployed: bool,
    attitude: BurnAttitude,
    exit: Option<DescentExit>,
}

impl SuicideBurnMode {
    const MODE_NAME: &'static str = "SuicideBurnMode";
    /// Gear comes down and the vehicle stands up below this altitude.
    const LOW_ALTITUDE: f64 = 300.0;
    const UPRIGHT_PITCH: f64 = 90.0;

    pub fn new() -> Self {
        Self {
            controller: DescentController::new(),
            gear_deployed: false,
            attitude: BurnAttitude::Retrograde,
            exit: None,
        }
    }

    /// Which condition ended the burn, once it has ended.
    pub fn descent_exit(&self) -> Option<DescentExit> { self.exit }

    async fn low_altitude_one_shots(
        &mut self,
        context: &ModeContext,
        telemetry: &TelemetrySnapshot,
    ) -> Result<(), ControlError> {
        if telemetry.surface_altitude() >= Self::LOW_ALTITUDE {
            return Ok(());
        }
        let f_cont = context.f_cont();
        if !self.gear_deployed {
            f_cont.set_gear(true).await?;
            f_cont.message("Deploying landing gear", FlightComputer::MESSAGE_DURATION).await;
            self.gear_deployed = true;
        }
        if self.attitude == BurnAttitude::Retrograde {
            let attitude = f_cont.vehicle().attitude();
            attitude.hold_mode(HoldMode::StabilityAssist).await?;
            attitude.release_hold().await?;
            attitude.engage().await?;
            attitude.point_at(Self::UPRIGHT_PITCH, context.config().heading()).await?;
            self.attitude = BurnAttitude::Upright;
        }
        Ok(())
    }
}

#[async_trait]
impl FlightMode for SuicideBurnMode {
    fn type_name(&self) -> &'static str { Self::MODE_NAME }

    fn phase(&self) -> FlightPhase { FlightPhase::SuicideBurn }

    async fn init_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        f_cont.set_airbrakes(true).await?;
        f_cont.message("Starting Suicide Burn", FlightComputer::MESSAGE_DURATION).await;
        f_cont.set_throttle(1.0).await?;
        Ok(())
    }

    async fn exec_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = Arc::clone(context.f_cont());
        let mut margin = DescentController::control_descent(&f_cont, 1.0, &f_cont.telemetry()?).await?;
        let mut ticker = FlightComputer::control_ticker();
        loop {
            ticker.tick().await;
            let telemetry = f_cont.telemetry()?;
            if let Some(exit) = DescentController::exit_condition(&telemetry) {
                info!(
                    "Suicide burn ended ({exit}) at {:.1}m, {:.2}m/s.",
                    telemetry.surface_altitude(),
                    telemetry.vertical_speed()
                );
                self.exit = Some(exit);
                return Ok(());
            }
            self.low_altitude_one_shots(&context, &telemetry).await?;
            let correction = self.controller.correction(margin);
            margin = DescentController::control_descent(&f_cont, correction, &telemetry).await?;
            event!(
                "Descent: alt {:.1} vs {:.2} margin {margin:.2} correction {correction:.4} throttle {:.3}",
                telemetry.surface_altitude(),
                telemetry.vertical_speed(),
                f_cont.throttle().await
            );
        }
    }

    async fn exit_mode(&self, _context: Arc<ModeContext>) -> OpExitSignal {
        OpExitSignal::Next(Box::new(TouchdownMode::new()))
    }
}
