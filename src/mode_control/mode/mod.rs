mod ascent_mode;
mod burn_wait_mode;
mod coast_mode;
mod flight_mode;
mod landed_mode;
mod pre_launch_mode;
mod suicide_burn_mode;
mod touchdown_mode;

pub(crate) use ascent_mode::AscentMode;
pub(crate) use burn_wait_mode::BurnWaitMode;
pub(crate) use coast_mode::CoastMode;
pub(crate) use flight_mode::FlightMode;
pub(crate) use landed_mode::LandedMode;
pub(crate) use pre_launch_mode::PreLaunchMode;
pub(crate) use suicide_burn_mode::SuicideBurnMode;
pub(crate) use touchdown_mode::TouchdownMode;
