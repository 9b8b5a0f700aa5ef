use crate::config::FlightConfig;
use crate::flight_control::FlightComputer;
use std::sync::Arc;

/// Shared state every flight mode runs against.
pub struct ModeContext {
    f_cont: Arc<FlightComputer>,
    config: FlightConfig,
}

impl ModeContext {
    pub fn new(f_cont: Arc<FlightComputer>, config: FlightConfig) -> Self { Self { f_cont, config } }

    pub fn f_cont(&self) -> &Arc<FlightComputer> { &self.f_cont }
    pub fn config(&self) -> &FlightConfig { &self.config }
}
