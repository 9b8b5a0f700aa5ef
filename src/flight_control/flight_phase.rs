use strum_macros::{Display, EnumIter};

/// The phases of a flight, in the only order they may be entered.
///
/// The derived ordering is the flight order: a phase may only be followed by a strictly greater
/// one.
#[derive(Debug, Display, EnumIter, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum FlightPhase {
    PreLaunch,
    Ascending,
    Coasting,
    AwaitingBurn,
    SuicideBurn,
    TouchdownControl,
    Landed,
}

impl FlightPhase {
    pub fn is_terminal(self) -> bool { self == FlightPhase::Landed }
}

impl From<FlightPhase> for &'static str {
    /// The status line shown on the vehicle display while the phase is active.
    fn from(value: FlightPhase) -> Self {
        match value {
            FlightPhase::PreLaunch => "State: Awaiting Launch",
            FlightPhase::Ascending => "State: Launch",
            FlightPhase::Coasting => "State: Coasting to Apoapsis",
            FlightPhase::AwaitingBurn => "State: Waiting for Suicide Burn",
            FlightPhase::SuicideBurn => "State: Executing Suicide Burn",
            FlightPhase::TouchdownControl => "State: Touchdown Control",
            FlightPhase::Landed => "State: Landed",
        }
    }
}
