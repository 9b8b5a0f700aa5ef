use super::{CoastMode, FlightMode};
use crate::flight_control::{FlightComputer, FlightPhase};
use crate::mode_control::{mode_context::ModeContext, signal::OpExitSignal};
use crate::vehicle::ControlError;
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

/// Powered ascent: ignition, release and the open-loop gravity turn up to the target apoapsis.
pub struct AscentMode {}

impl AscentMode {
    const MODE_NAME: &'static str = "AscentMode";
    /// Launch attitude pitch in degrees.
    const LAUNCH_PITCH: f64 = 90.0;
    const LAUNCH_GIMBAL_LIMIT: f64 = 0.5;
    /// Pitch-over program: (altitude to wait for, pitch to command).
    const TURNS: [(f64, f64); 2] = [(1_000.0, 75.0), (5_000.0, 65.0)];
    const COUNTDOWN_FROM: u32 = 10;
    /// Countdown value at which the engine is lit.
    const IGNITION_AT: u32 = 3;
    const COUNTDOWN_LEAD: Duration = Duration::from_secs(2);
    const COUNTDOWN_STEP: Duration = Duration::from_secs(1);
    const LAUNCH_MESSAGE_DURATION: Duration = Duration::from_secs(10);

    pub fn new() -> Self { Self {} }

    async fn engine_start(f_cont: &FlightComputer) -> Result<(), ControlError> {
        f_cont.message("Engine Start", FlightComputer::MESSAGE_DURATION).await;
        f_cont.activate_next_stage().await?;
        f_cont.vehicle().attitude().engage().await?;
        f_cont.set_throttle(1.0).await?;
        Ok(())
    }

    async fn countdown(f_cont: &FlightComputer) -> Result<(), ControlError> {
        f_cont.message("Initiating countdown", FlightComputer::MESSAGE_DURATION).await;
        f_cont.status("State: Countdown").await;
        FlightComputer::settle(Self::COUNTDOWN_LEAD).await;
        for shown in (1..=Self::COUNTDOWN_FROM).rev() {
            f_cont.message(&shown.to_string(), FlightComputer::MESSAGE_DURATION).await;
            FlightComputer::settle(Self::COUNTDOWN_STEP).await;
            if shown - 1 == Self::IGNITION_AT {
                Self::engine_start(f_cont).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl FlightMode for AscentMode {
    fn type_name(&self) -> &'static str { Self::MODE_NAME }

    fn phase(&self) -> FlightPhase { FlightPhase::Ascending }

    async fn init_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        let attitude = f_cont.vehicle().attitude();
        f_cont.message("Initiating launch", FlightComputer::MESSAGE_DURATION).await;
        f_cont.message("Target Pitch and Heading Engaged", FlightComputer::MESSAGE_DURATION).await;
        attitude.point_at(Self::LAUNCH_PITCH, context.config().heading()).await?;
        f_cont.set_gimbal_limit(Self::LAUNCH_GIMBAL_LIMIT).await?;
        attitude.set_target_roll(0.0).await?;
        f_cont.set_gear(false).await?;

        if context.config().countdown() {
            Self::countdown(f_cont).await?;
        } else {
            Self::engine_start(f_cont).await?;
        }

        f_cont.message("Launch", Self::LAUNCH_MESSAGE_DURATION).await;
        f_cont.status(FlightPhase::Ascending.into()).await;
        // releases the launch clamps
        f_cont.activate_next_stage().await
    }

    async fn exec_mode(&mut self, context: Arc<ModeContext>) -> Result<(), ControlError> {
        let f_cont = context.f_cont();
        let target = context.config().target_apoapsis();
        for (altitude, pitch) in Self::TURNS {
            if target > altitude {
                f_cont.wait_until(|t| t.surface_altitude() >= altitude).await?;
            }
            f_cont.vehicle().attitude().point_at(pitch, context.config().heading()).await?;
            f_cont.message("Turning", FlightComputer::MESSAGE_DURATION).await;
        }
        f_cont.wait_for_event(|t| t.apoapsis_altitude() > target).await?;
        Ok(())
    }

    async fn exit_mode(&self, _context: Arc<ModeContext>) -> OpExitSignal {
        OpExitSignal::Next(Box::new(CoastMode::new()))
    }
}
