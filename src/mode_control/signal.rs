use crate::mode_control::mode::FlightMode;

/// What the sequencer does once a mode has finished executing.
pub enum OpExitSignal {
    /// Hand over to the next phase.
    Next(Box<dyn FlightMode>),
    /// The flight is over.
    Terminate,
}
