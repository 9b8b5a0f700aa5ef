//! The flight phase state machine: one [`FlightMode`](mode::FlightMode) per flight phase, driven
//! by the [`FlightSequencer`] through setup, execution and hand-over to the next phase.

pub(crate) mod mode;
mod mode_context;
mod sequencer;
mod signal;
#[cfg(test)]
mod tests;

pub(crate) use mode_context::ModeContext;
pub(crate) use sequencer::FlightSequencer;
pub(crate) use signal::OpExitSignal;
