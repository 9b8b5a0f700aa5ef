pub(crate) mod common;
mod descent_controller;
mod flight_computer;
mod flight_phase;
mod supervisor;
mod touchdown_controller;

pub use descent_controller::{DescentController, DescentExit};
pub use flight_computer::FlightComputer;
pub use flight_phase::FlightPhase;
pub use supervisor::Supervisor;
pub use touchdown_controller::TouchdownController;
