#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod flight_control;
mod http_handler;
mod logger;
mod mode_control;
mod vehicle;

use crate::config::FlightConfig;
use crate::flight_control::{FlightComputer, Supervisor};
use crate::mode_control::{FlightSequencer, ModeContext};
use crate::vehicle::{BridgeVehicle, SimParams, SimVehicle, Vehicle, VehicleHandle};
use std::sync::Arc;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let config = FlightConfig::from_env();
    config.log_summary();
    let context = if config.simulated() {
        init_with(Arc::new(SimVehicle::new(SimParams::default())), config).await
    } else {
        let bridge = BridgeVehicle::new(config.bridge_url());
        init_with(Arc::new(bridge), config).await
    };

    match FlightSequencer::run(Arc::new(context), FlightSequencer::entry_mode()).await {
        Ok(phases) => info!("Flight finished after {} phases, shutting down.", phases.len()),
        Err(e) => fatal!("Flight aborted: {e}"),
    }
}

/// Starts the telemetry supervisor for `vehicle` and wires the flight computer on top of it.
async fn init_with<V: Vehicle + 'static>(vehicle: Arc<V>, config: FlightConfig) -> ModeContext {
    let (supervisor, feed) = Supervisor::new(vehicle.clone())
        .await
        .unwrap_or_else(|e| fatal!("Vehicle never delivered telemetry: {e}"));
    tokio::spawn(supervisor.run());

    let handle = VehicleHandle::from_vehicle(Arc::new(feed), &vehicle);
    let f_cont = Arc::new(FlightComputer::new(handle));
    ModeContext::new(f_cont, config)
}
