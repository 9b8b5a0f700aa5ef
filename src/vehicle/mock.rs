//! Test doubles for the collaborator traits.

use super::{
    Actuators, AttitudeControl, ControlError, HoldMode, Hud, LaunchTrigger, TelemetryFeed,
    TelemetrySnapshot, VehicleHandle,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

/// Everything the core asked the vehicle to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Throttle(f64),
    Gear(bool),
    Airbrakes(bool),
    Rcs(bool),
    GimbalLock(bool),
    ThrustLimit(f64),
    GimbalLimit(f64),
    Stage,
    Engage,
    Disengage,
    PointAt(f64, f64),
    Roll(f64),
    Hold(HoldMode),
    ReleaseHold,
    Notify(String),
    Status(String),
    TriggerReset,
}

/// Records attitude, actuator and display commands, optionally rejecting one command kind.
pub(crate) struct RecordingVehicle {
    log: Mutex<Vec<Command>>,
    reject: Option<&'static str>,
    trigger_after: usize,
    trigger_polls: AtomicUsize,
    /// Per poll, whether the trigger read fails. Polls past the end read normally.
    trigger_failures: Mutex<VecDeque<bool>>,
}

impl RecordingVehicle {
    pub(crate) fn new() -> Arc<Self> { Self::build(None, 0, []) }

    /// A vehicle refusing every command named `command` (e.g. `"gear"`).
    pub(crate) fn rejecting(command: &'static str) -> Arc<Self> { Self::build(Some(command), 0, []) }

    /// A vehicle whose trigger reports `false` for the first `polls` reads.
    pub(crate) fn triggering_after(polls: usize) -> Arc<Self> { Self::build(None, polls, []) }

    /// Like [`RecordingVehicle::triggering_after`], with the trigger read failing on the polls
    /// marked `true` in `failures`.
    pub(crate) fn flaky_trigger(
        polls: usize,
        failures: impl IntoIterator<Item = bool>,
    ) -> Arc<Self> {
        Self::build(None, polls, failures)
    }

    fn build(
        reject: Option<&'static str>,
        trigger_after: usize,
        failures: impl IntoIterator<Item = bool>,
    ) -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(Vec::new()),
            reject,
            trigger_after,
            trigger_polls: AtomicUsize::new(0),
            trigger_failures: Mutex::new(failures.into_iter().collect()),
        })
    }

    pub(crate) fn handle(self: &Arc<Self>, feed: Arc<dyn TelemetryFeed>) -> VehicleHandle {
        VehicleHandle::new(
            feed,
            Arc::clone(self) as Arc<dyn AttitudeControl>,
            Arc::clone(self) as Arc<dyn Actuators>,
            Arc::clone(self) as Arc<dyn Hud>,
            Arc::clone(self) as Arc<dyn LaunchTrigger>,
        )
    }

    pub(crate) fn commands(&self) -> Vec<Command> { self.log.lock().unwrap().clone() }

    pub(crate) fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.log.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn notified(&self, text: &str) -> bool {
        self.count(|c| matches!(c, Command::Notify(t) if t == text)) > 0
    }

    pub(crate) fn trigger_polls(&self) -> usize { self.trigger_polls.load(Ordering::SeqCst) }

    fn record(&self, name: &'static str, command: Command) -> Result<(), ControlError> {
        if self.reject == Some(name) {
            return Err(ControlError::ActuatorRejected { command: name });
        }
        self.log.lock().unwrap().push(command);
        Ok(())
    }
}

#[async_trait]
impl AttitudeControl for RecordingVehicle {
    async fn engage(&self) -> Result<(), ControlError> {
        self.record("autopilot", Command::Engage)
    }
    async fn disengage(&self) -> Result<(), ControlError> {
        self.record("autopilot", Command::Disengage)
    }
    async fn point_at(&self, pitch: f64, heading: f64) -> Result<(), ControlError> {
        self.record("autopilot", Command::PointAt(pitch, heading))
    }
    async fn set_target_roll(&self, roll: f64) -> Result<(), ControlError> {
        self.record("autopilot", Command::Roll(roll))
    }
    async fn hold_mode(&self, mode: HoldMode) -> Result<(), ControlError> {
        self.record("autopilot", Command::Hold(mode))
    }
    async fn release_hold(&self) -> Result<(), ControlError> {
        self.record("autopilot", Command::ReleaseHold)
    }
}

#[async_trait]
impl Actuators for RecordingVehicle {
    async fn set_throttle(&self, throttle: f64) -> Result<(), ControlError> {
        self.record("throttle", Command::Throttle(throttle))
    }
    async fn set_gear(&self, deployed: bool) -> Result<(), ControlError> {
        self.record("gear", Command::Gear(deployed))
    }
    async fn set_airbrakes(&self, enabled: bool) -> Result<(), ControlError> {
        self.record("airbrakes", Command::Airbrakes(enabled))
    }
    async fn set_rcs(&self, enabled: bool) -> Result<(), ControlError> {
        self.record("rcs", Command::Rcs(enabled))
    }
    async fn set_gimbal_lock(&self, locked: bool) -> Result<(), ControlError> {
        self.record("gimbal_lock", Command::GimbalLock(locked))
    }
    async fn set_thrust_limit(&self, limit: f64) -> Result<(), ControlError> {
        self.record("thrust_limit", Command::ThrustLimit(limit))
    }
    async fn set_gimbal_limit(&self, limit: f64) -> Result<(), ControlError> {
        self.record("gimbal_limit", Command::GimbalLimit(limit))
    }
    async fn activate_next_stage(&self) -> Result<(), ControlError> {
        self.record("stage", Command::Stage)
    }
}

#[async_trait]
impl Hud for RecordingVehicle {
    async fn notify(&self, message: &str, _duration: Duration) {
        self.log.lock().unwrap().push(Command::Notify(message.to_string()));
    }
    async fn status(&self, text: &str) {
        self.log.lock().unwrap().push(Command::Status(text.to_string()));
    }
}

#[async_trait]
impl LaunchTrigger for RecordingVehicle {
    async fn triggered(&self) -> Result<bool, ControlError> {
        let polls = self.trigger_polls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.trigger_failures.lock().unwrap().pop_front().unwrap_or(false) {
            return Err(ControlError::TriggerUnavailable);
        }
        Ok(polls > self.trigger_after)
    }
    async fn reset(&self) -> Result<(), ControlError> {
        self.record("trigger", Command::TriggerReset)
    }
}

/// Hands out one scripted snapshot per read and keeps repeating the last one.
pub(crate) struct ScriptedFeed {
    script: Mutex<VecDeque<TelemetrySnapshot>>,
    reads: AtomicUsize,
}

impl ScriptedFeed {
    pub(crate) fn new(script: impl IntoIterator<Item = TelemetrySnapshot>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            reads: AtomicUsize::new(0),
        })
    }

    pub(crate) fn reads(&self) -> usize { self.reads.load(Ordering::SeqCst) }
}

#[async_trait]
impl TelemetryFeed for ScriptedFeed {
    fn latest(&self) -> Result<TelemetrySnapshot, ControlError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().ok_or(ControlError::TelemetryUnavailable)
        } else {
            script.front().copied().ok_or(ControlError::TelemetryUnavailable)
        }
    }
}
