use super::{FlightMode, SuicideBurnMode};
use crate::flight_control::{
    FlightComputer, FlightPhase,
    common::kinematics::{expected_burn_altitude, min_height_for_burn},
};
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::{ControlError, HoldMode};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

/// Falling with the engine off until the stopping distance reaches the ground.
pub struct BurnWaitMode {
    /// Coming off a coast the vehicle still has to be turned around and its fairings dropped.
    from_coast: bool,
}

impl BurnWaitMode {
    const MODE_NAME: &'static str = "BurnWaitMode";
    /// Short throttle pulse while pointing retrograde.
    const SETTLE_BURN_THROTTLE: f64 = 0.1;
    const SETTLE_BURN: Duration = Duration::from_secs(5);
    const ROLL_SETTLE: Duration = Duration::from_secs(5);

    pub fn after_coast() -> Self { Self { from_coast: true } }

    /// Entry for a vehicle that is already falling.
    pub fn drop_test() -> Self { Self { from_coast: false } }

    async fn turn_around(f_cont: &FlightComputer) -> Result<(), ControlError> {
        f_cont.message("Reached Apoapsis altitude", FlightComputer::MESSAGE_DURATION).await;
        f_cont.set_rcs(true).await?;
        f_cont.switch_to_hold(HoldMode::Retrograde).await?;
        f_cont
            .message("Autopilot Disengaged. Pointing to Retrograde", FlightComputer::MESSAGE_DURATION)
            .await;
        f_cont.set_throttle(Self::SETTLE_BURN_THROTTLE).await?;
        FlightComputer::settle(Self::SETTLE_BURN).await;
        f_cont.set_throttle(0.0).await?;
        // fairings
        f_cont.activate_next_stage().await
    }
}

#[async_trait]
impl FlightMode for BurnWaitMode {
    fn type_name(&self) -> &'static str { Self::MODE_NAME }

    fn phase(&self) -> FlightPhase { FlightPhase::AwaitingBurn }

    async fn init_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        if self.from_coast {
            Self::turn_around(f_cont).await?;
        }
        let attitude = f_cont.vehicle().attitude();
        attitude.engage().await?;
        attitude.set_target_roll(0.0).await?;
        FlightComputer::settle(Self::ROLL_SETTLE).await;
        f_cont.switch_to_hold(HoldMode::Retrograde).await?;

        let expected = expected_burn_altitude(&f_cont.telemetry()?);
        let text = format!("Expecting Suicide Burn to Begin at: {expected:.2}m AGL");
        f_cont.message(&text, FlightComputer::MESSAGE_DURATION).await;
        Ok(())
    }

    async fn exec_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        context
            .f_cont()
            .wait_until(|t| min_height_for_burn(t) >= t.surface_altitude())
            .await?;
        Ok(())
    }

    async fn exit_mode(&self, _context: Arc<ModeContext>) -> OpExitSignal {
        OpExitSignal::Next(Box::new(SuicideBurnMode::new()))
    }
}
