use super::{
    FlightSequencer, ModeContext, OpExitSignal,
    mode::{
        AscentMode, BurnWaitMode, CoastMode, FlightMode, LandedMode, PreLaunchMode,
        SuicideBurnMode, TouchdownMode,
    },
};
use crate::config::FlightConfig;
use crate::flight_control::{DescentExit, FlightComputer, FlightPhase, Supervisor};
use crate::vehicle::{
    ControlError, HoldMode, SimParams, SimVehicle, TelemetryFeed, TelemetrySnapshot,
    VehicleHandle,
    mock::{Command, RecordingVehicle, ScriptedFeed},
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::sync::watch;
use tokio::time::{Instant, sleep, timeout};

const HEADING: f64 = 245.0;

fn config(vars: &[(&str, &str)]) -> FlightConfig {
    let vars: Vec<(String, String)> =
        vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    FlightConfig::from_lookup(|key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()))
}

fn context_with(
    vehicle: &Arc<RecordingVehicle>,
    feed: Arc<dyn TelemetryFeed>,
    config: FlightConfig,
) -> Arc<ModeContext> {
    let f_cont = Arc::new(FlightComputer::new(vehicle.handle(feed)));
    Arc::new(ModeContext::new(f_cont, config))
}

fn snapshot(altitude: f64, vertical_speed: f64) -> TelemetrySnapshot {
    TelemetrySnapshot::new(altitude, vertical_speed, 0.0, 300_000.0)
}

fn position(commands: &[Command], wanted: &Command) -> usize {
    commands
        .iter()
        .position(|c| c == wanted)
        .unwrap_or_else(|| panic!("{wanted:?} never issued"))
}

fn throttles_in_range(vehicle: &RecordingVehicle) -> bool {
    vehicle.count(|c| matches!(c, Command::Throttle(t) if !(0.0..=1.0).contains(t))) == 0
}

#[tokio::test(start_paused = true)]
async fn test_suicide_burn_ends_on_altitude_first() {
    // speed rises linearly from -50 towards 0 while altitude drops below 5 m long before
    let script = (0..200).map(|i| snapshot(100.0 - f64::from(i), -50.0 + 0.25 * f64::from(i)));
    let feed = ScriptedFeed::new(script);
    let vehicle = RecordingVehicle::new();
    let context = context_with(&vehicle, feed.clone(), FlightConfig::default());

    let mut mode = SuicideBurnMode::new();
    mode.init_mode(Arc::clone(&context)).await.unwrap();
    mode.exec_mode(Arc::clone(&context)).await.unwrap();

    assert_eq!(mode.descent_exit(), Some(DescentExit::GroundImminent));
    // one read before the loop, one per tick up to and including the 5 m snapshot
    assert_eq!(feed.reads(), 96);
    assert!(throttles_in_range(&vehicle));
    assert_eq!(vehicle.count(|c| *c == Command::Gear(true)), 1);
    assert_eq!(vehicle.count(|c| *c == Command::Hold(HoldMode::StabilityAssist)), 1);
    assert_eq!(vehicle.count(|c| *c == Command::PointAt(90.0, HEADING)), 1);
    assert_eq!(vehicle.count(|c| *c == Command::Notify("Deploying landing gear".into())), 1);

    let commands = vehicle.commands();
    assert_eq!(commands[0], Command::Airbrakes(true));
    let hold = position(&commands, &Command::Hold(HoldMode::StabilityAssist));
    assert_eq!(
        commands[hold..hold + 4],
        [
            Command::Hold(HoldMode::StabilityAssist),
            Command::ReleaseHold,
            Command::Engage,
            Command::PointAt(90.0, HEADING),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_suicide_burn_ends_when_arrested() {
    let script = (0..100).map(|i| snapshot(1000.0 - f64::from(i), -20.0 + 0.5 * f64::from(i)));
    let vehicle = RecordingVehicle::new();
    let context = context_with(&vehicle, ScriptedFeed::new(script), FlightConfig::default());

    let mut mode = SuicideBurnMode::new();
    mode.init_mode(Arc::clone(&context)).await.unwrap();
    mode.exec_mode(Arc::clone(&context)).await.unwrap();

    assert_eq!(mode.descent_exit(), Some(DescentExit::DescentArrested));
    assert_eq!(vehicle.count(|c| matches!(c, Command::Gear(_))), 0);
    assert_eq!(vehicle.count(|c| matches!(c, Command::Hold(_))), 0);
    assert!(throttles_in_range(&vehicle));
    let signal = mode.exit_mode(Arc::clone(&context)).await;
    assert!(matches!(signal, OpExitSignal::Next(next) if next.phase() == FlightPhase::TouchdownControl));
}

#[tokio::test(start_paused = true)]
async fn test_touchdown_waits_for_guard() {
    let (tx, rx) = watch::channel(snapshot(40.0, -6.1));
    let vehicle = RecordingVehicle::new();
    let context = context_with(&vehicle, Arc::new(rx), FlightConfig::default());

    let mut mode = TouchdownMode::new();
    mode.init_mode(Arc::clone(&context)).await.unwrap();
    assert_eq!(
        vehicle.commands(),
        vec![
            Command::GimbalLock(false),
            Command::Airbrakes(false),
            Command::Notify("Transitioned to Touchdown Control".into()),
            Command::Throttle(1.0),
        ]
    );

    let exec_context = Arc::clone(&context);
    let exec = tokio::spawn(async move {
        mode.exec_mode(exec_context).await
    });
    sleep(Duration::from_secs(3)).await;
    assert!(!exec.is_finished());
    assert_eq!(vehicle.count(|c| matches!(c, Command::ThrustLimit(_))), 0);

    tx.send_replace(snapshot(30.0, -6.0));
    sleep(Duration::from_millis(200)).await;
    assert_eq!(vehicle.count(|c| *c == Command::ThrustLimit(0.5)), 1);
    assert!(!exec.is_finished());

    tx.send_replace(snapshot(9.0, -3.0));
    sleep(Duration::from_millis(200)).await;
    assert!(!exec.is_finished());

    tx.send_replace(snapshot(0.0, 0.0));
    timeout(Duration::from_secs(1), exec).await.unwrap().unwrap().unwrap();
    assert!(throttles_in_range(&vehicle));
}

#[tokio::test(start_paused = true)]
async fn test_pre_launch_polls_trigger() {
    let vehicle = RecordingVehicle::triggering_after(5);
    let feed = ScriptedFeed::new([snapshot(0.0, 0.0)]);
    let context = context_with(&vehicle, feed, FlightConfig::default());

    let mut mode = PreLaunchMode::new();
    mode.init_mode(Arc::clone(&context)).await.unwrap();
    mode.exec_mode(Arc::clone(&context)).await.unwrap();
    assert_eq!(vehicle.trigger_polls(), 6);
    assert_eq!(vehicle.commands(), vec![Command::TriggerReset]);
    let next = mode.exit_mode(Arc::clone(&context)).await;
    assert!(matches!(next, OpExitSignal::Next(m) if m.phase() == FlightPhase::Ascending));
}

#[tokio::test(start_paused = true)]
async fn test_pre_launch_retries_single_trigger_failures() {
    let vehicle = RecordingVehicle::flaky_trigger(5, [true, false, true, false]);
    let context =
        context_with(&vehicle, ScriptedFeed::new([snapshot(0.0, 0.0)]), FlightConfig::default());
    PreLaunchMode::new().exec_mode(context).await.unwrap();
    assert_eq!(vehicle.trigger_polls(), 6);
    assert_eq!(vehicle.commands(), vec![Command::TriggerReset]);
}

#[tokio::test(start_paused = true)]
async fn test_pre_launch_aborts_on_repeated_trigger_failure() {
    let vehicle = RecordingVehicle::flaky_trigger(5, [false, true, true, false]);
    let context =
        context_with(&vehicle, ScriptedFeed::new([snapshot(0.0, 0.0)]), FlightConfig::default());
    let res = PreLaunchMode::new().exec_mode(context).await;
    assert_eq!(res, Err(ControlError::TriggerUnavailable));
    assert_eq!(vehicle.trigger_polls(), 3);
    assert!(vehicle.commands().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_pre_launch_drop_test_entry() {
    let vehicle = RecordingVehicle::new();
    let feed = ScriptedFeed::new([snapshot(0.0, 0.0)]);
    let context =
        context_with(&vehicle, feed, config(&[("LANDER_ENTRY_PHASE", "awaiting_burn")]));
    let next = PreLaunchMode::new().exit_mode(context).await;
    assert!(matches!(next, OpExitSignal::Next(m) if m.phase() == FlightPhase::AwaitingBurn));
}

#[tokio::test(start_paused = true)]
async fn test_ascent_countdown_sequence() {
    let vehicle = RecordingVehicle::new();
    let feed = ScriptedFeed::new([snapshot(0.0, 0.0)]);
    let context = context_with(&vehicle, feed, config(&[("LANDER_COUNTDOWN", "1")]));
    let start = Instant::now();
    AscentMode::new().init_mode(context).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(12));

    let commands = vehicle.commands();
    assert_eq!(
        commands[..6],
        [
            Command::Notify("Initiating launch".into()),
            Command::Notify("Target Pitch and Heading Engaged".into()),
            Command::PointAt(90.0, HEADING),
            Command::GimbalLimit(0.5),
            Command::Roll(0.0),
            Command::Gear(false),
        ]
    );
    let four = position(&commands, &Command::Notify("4".into()));
    let ignition = position(&commands, &Command::Notify("Engine Start".into()));
    let three = position(&commands, &Command::Notify("3".into()));
    assert!(four < ignition && ignition < three);
    assert_eq!(
        commands[ignition + 1..ignition + 4],
        [Command::Stage, Command::Engage, Command::Throttle(1.0)]
    );
    assert_eq!(commands.last(), Some(&Command::Stage));
    assert_eq!(vehicle.count(|c| *c == Command::Stage), 2);
    assert!(vehicle.notified("Launch"));
}

#[tokio::test(start_paused = true)]
async fn test_ascent_turn_program() {
    let script = [
        snapshot(10.0, 50.0).with_apoapsis(200.0),
        snapshot(999.0, 150.0).with_apoapsis(2000.0),
        snapshot(1001.0, 150.0).with_apoapsis(2100.0),
        snapshot(3000.0, 200.0).with_apoapsis(6000.0),
        snapshot(5000.0, 220.0).with_apoapsis(7500.0),
        snapshot(6000.0, 230.0).with_apoapsis(8000.5),
    ];
    let vehicle = RecordingVehicle::new();
    let context = context_with(
        &vehicle,
        ScriptedFeed::new(script),
        config(&[("LANDER_TARGET_APOAPSIS", "8000")]),
    );
    let mut mode = AscentMode::new();
    mode.exec_mode(Arc::clone(&context)).await.unwrap();
    assert_eq!(
        vehicle.commands(),
        vec![
            Command::PointAt(75.0, HEADING),
            Command::Notify("Turning".into()),
            Command::PointAt(65.0, HEADING),
            Command::Notify("Turning".into()),
        ]
    );
    let next = mode.exit_mode(context).await;
    assert!(matches!(next, OpExitSignal::Next(m) if m.phase() == FlightPhase::Coasting));
}

#[tokio::test(start_paused = true)]
async fn test_coast_waits_for_apoapsis() {
    let script = [snapshot(1000.0, 50.0), snapshot(1100.0, 10.0), snapshot(1150.0, -0.1)];
    let feed = ScriptedFeed::new(script);
    let vehicle = RecordingVehicle::new();
    let context = context_with(&vehicle, feed.clone(), FlightConfig::default());
    let mut mode = CoastMode::new();
    mode.init_mode(Arc::clone(&context)).await.unwrap();
    mode.exec_mode(Arc::clone(&context)).await.unwrap();
    assert_eq!(
        vehicle.commands(),
        vec![
            Command::Notify("MECO".into()),
            Command::Throttle(0.0),
            Command::Disengage,
            Command::Hold(HoldMode::Prograde),
        ]
    );
    assert_eq!(feed.reads(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_burn_wait_after_coast() {
    let script = [snapshot(2000.0, -98.1), snapshot(1500.0, -98.1), snapshot(400.0, -98.1)];
    let vehicle = RecordingVehicle::new();
    let context = context_with(&vehicle, ScriptedFeed::new(script), FlightConfig::default());
    let mut mode = BurnWaitMode::after_coast();
    let start = Instant::now();
    mode.init_mode(Arc::clone(&context)).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(12));
    mode.exec_mode(Arc::clone(&context)).await.unwrap();

    let commands = vehicle.commands();
    assert_eq!(
        commands[..9],
        [
            Command::Notify("Reached Apoapsis altitude".into()),
            Command::Rcs(true),
            Command::Disengage,
            Command::Hold(HoldMode::Retrograde),
            Command::Notify("Autopilot Disengaged. Pointing to Retrograde".into()),
            Command::Throttle(0.1),
            Command::Throttle(0.0),
            Command::Stage,
            Command::Engage,
        ]
    );
    assert_eq!(
        commands.last(),
        Some(&Command::Notify("Expecting Suicide Burn to Begin at: 754.75m AGL".into()))
    );
}

#[tokio::test(start_paused = true)]
async fn test_burn_wait_drop_test_skips_turn_around() {
    let vehicle = RecordingVehicle::new();
    let context =
        context_with(&vehicle, ScriptedFeed::new([snapshot(900.0, -20.0)]), FlightConfig::default());
    BurnWaitMode::drop_test().init_mode(context).await.unwrap();
    let commands = vehicle.commands();
    assert_eq!(commands[..2], [Command::Engage, Command::Roll(0.0)]);
    assert_eq!(vehicle.count(|c| matches!(c, Command::Rcs(_) | Command::Stage)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_landed_shutdown() {
    let vehicle = RecordingVehicle::new();
    let context =
        context_with(&vehicle, ScriptedFeed::new([snapshot(0.0, 0.0)]), FlightConfig::default());
    let mut mode = LandedMode::new();
    mode.init_mode(Arc::clone(&context)).await.unwrap();
    assert_eq!(
        vehicle.commands(),
        vec![
            Command::Notify("Landed".into()),
            Command::Notify("Engines Off.".into()),
            Command::Throttle(0.0),
            Command::Rcs(false),
        ]
    );
    assert!(matches!(mode.exit_mode(context).await, OpExitSignal::Terminate));
}

#[test]
fn test_transitions_only_move_forward() {
    assert!(FlightSequencer::check_transition(FlightPhase::PreLaunch, FlightPhase::AwaitingBurn).is_ok());
    assert_eq!(
        FlightSequencer::check_transition(FlightPhase::Coasting, FlightPhase::Ascending),
        Err(ControlError::IllegalTransition {
            from: FlightPhase::Coasting,
            to: FlightPhase::Ascending
        })
    );
    assert!(FlightSequencer::check_transition(FlightPhase::SuicideBurn, FlightPhase::SuicideBurn).is_err());
}

/// Claims to be coasting and hands back to the pad.
struct RewindingMode {}

#[async_trait]
impl FlightMode for RewindingMode {
    fn type_name(&self) -> &'static str { "RewindingMode" }
    fn phase(&self) -> FlightPhase { FlightPhase::Coasting }
    async fn init_mode(&mut self, _context: Arc<ModeContext>) -> Result<(), ControlError> { Ok(()) }
    async fn exec_mode(&mut self, _context: Arc<ModeContext>) -> Result<(), ControlError> { Ok(()) }
    async fn exit_mode(&self, _context: Arc<ModeContext>) -> OpExitSignal {
        OpExitSignal::Next(Box::new(PreLaunchMode::new()))
    }
}

#[tokio::test(start_paused = true)]
async fn test_sequencer_rejects_rewind() {
    let vehicle = RecordingVehicle::new();
    let context =
        context_with(&vehicle, ScriptedFeed::new([snapshot(0.0, 0.0)]), FlightConfig::default());
    let res = FlightSequencer::run(context, Box::new(RewindingMode {})).await;
    assert_eq!(
        res,
        Err(ControlError::IllegalTransition {
            from: FlightPhase::Coasting,
            to: FlightPhase::PreLaunch
        })
    );
    assert_eq!(vehicle.commands(), vec![Command::Status("State: Coasting to Apoapsis".into())]);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_actuator_aborts_flight() {
    let vehicle = RecordingVehicle::rejecting("gear");
    let context =
        context_with(&vehicle, ScriptedFeed::new([snapshot(0.0, 0.0)]), FlightConfig::default());
    let res = FlightSequencer::run(context, FlightSequencer::entry_mode()).await;
    assert_eq!(res, Err(ControlError::ActuatorRejected { command: "gear" }));
    assert_eq!(vehicle.count(|c| matches!(c, Command::Stage | Command::Throttle(_))), 0);
}

/// Wires a simulated vehicle the way `main` wires the real one.
async fn simulated_flight(
    params: SimParams,
    config: FlightConfig,
) -> (Arc<SimVehicle>, Result<Vec<FlightPhase>, ControlError>) {
    let sim = Arc::new(SimVehicle::new(params));
    let (supervisor, feed) = Supervisor::new(sim.clone()).await.unwrap();
    tokio::spawn(supervisor.run());
    let handle = VehicleHandle::from_vehicle(Arc::new(feed), &sim);
    let context = Arc::new(ModeContext::new(Arc::new(FlightComputer::new(handle)), config));
    let res = FlightSequencer::run(context, FlightSequencer::entry_mode()).await;
    (sim, res)
}

#[tokio::test(start_paused = true)]
async fn test_simulated_flight_lands() {
    let config = config(&[("LANDER_SIM", "1"), ("LANDER_TARGET_APOAPSIS", "3000")]);
    let (sim, res) = simulated_flight(SimParams::default(), config).await;
    assert_eq!(res.unwrap(), FlightPhase::iter().collect::<Vec<_>>());
    let touchdown = sim.touchdown_speed().await.unwrap();
    assert!(touchdown < 10.0, "touched down at {touchdown} m/s");
    assert_eq!(sim.stages_activated().await, 3);
    assert_eq!(sim.altitude().await, 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_simulated_drop_test_lands() {
    let params = SimParams { initial_altitude: 2000.0, ..SimParams::default() };
    let config = config(&[("LANDER_SIM", "1"), ("LANDER_ENTRY_PHASE", "awaiting_burn")]);
    let (sim, res) = simulated_flight(params, config).await;
    assert_eq!(
        res.unwrap(),
        vec![
            FlightPhase::PreLaunch,
            FlightPhase::AwaitingBurn,
            FlightPhase::SuicideBurn,
            FlightPhase::TouchdownControl,
            FlightPhase::Landed,
        ]
    );
    let touchdown = sim.touchdown_speed().await.unwrap();
    assert!(touchdown < 10.0, "touched down at {touchdown} m/s");
}
