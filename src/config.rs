use crate::{info, warn};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Phase the flight continues with once the launch trigger fires.
#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum EntryPhase {
    /// Full flight from the pad.
    Ascending,
    /// Drop test: the vehicle is already falling, skip straight to the burn wait.
    AwaitingBurn,
}

/// Run configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightConfig {
    bridge_url: String,
    simulated: bool,
    target_apoapsis: f64,
    heading: f64,
    countdown: bool,
    entry_phase: EntryPhase,
}

impl FlightConfig {
    const DEFAULT_BRIDGE_URL: &'static str = "http://localhost:8085";
    const DEFAULT_TARGET_APOAPSIS: f64 = 85_000.0;
    const DEFAULT_HEADING: f64 = 245.0;
    /// Targets below this reach the cut-off close to or before the 5000m pitch-over.
    const LOW_APOAPSIS_WARNING: f64 = 6_000.0;

    /// Reads the configuration from the `LANDER_*` environment variables.
    pub fn from_env() -> Self { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Builds the configuration from `lookup`, falling back to the defaults for missing or
    /// unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bridge_url =
            lookup("LANDER_BRIDGE_URL").unwrap_or_else(|| Self::DEFAULT_BRIDGE_URL.to_string());
        let simulated = lookup("LANDER_SIM").is_some_and(|v| Self::parse_flag(&v));
        let countdown = lookup("LANDER_COUNTDOWN").is_some_and(|v| Self::parse_flag(&v));
        let mut target_apoapsis =
            Self::parse_or(&lookup, "LANDER_TARGET_APOAPSIS", Self::DEFAULT_TARGET_APOAPSIS);
        if !target_apoapsis.is_finite() || target_apoapsis <= 0.0 {
            warn!("Target apoapsis {target_apoapsis} unusable, using default.");
            target_apoapsis = Self::DEFAULT_TARGET_APOAPSIS;
        }
        if target_apoapsis < Self::LOW_APOAPSIS_WARNING {
            warn!(
                "Target apoapsis {target_apoapsis}m is close to the 5000m pitch-over, its wait may \
                 be skipped."
            );
        }
        let mut heading = Self::parse_or(&lookup, "LANDER_HEADING", Self::DEFAULT_HEADING);
        if !heading.is_finite() {
            warn!("Heading {heading} unusable, using default.");
            heading = Self::DEFAULT_HEADING;
        }
        let entry_phase = Self::parse_or(&lookup, "LANDER_ENTRY_PHASE", EntryPhase::Ascending);
        Self { bridge_url, simulated, target_apoapsis, heading, countdown, entry_phase }
    }

    fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
        match lookup(key) {
            None => default,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid value '{raw}' for {key}.");
                default
            }),
        }
    }

    fn parse_flag(raw: &str) -> bool {
        !matches!(raw.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no" | "off")
    }

    pub fn log_summary(&self) {
        let vehicle = if self.simulated { "simulated vehicle" } else { self.bridge_url.as_str() };
        info!(
            "Flying {vehicle}: apoapsis {}m, heading {}, countdown {}, entry {}.",
            self.target_apoapsis, self.heading, self.countdown, self.entry_phase
        );
    }

    pub fn bridge_url(&self) -> &str { &self.bridge_url }
    pub fn simulated(&self) -> bool { self.simulated }
    pub fn target_apoapsis(&self) -> f64 { self.target_apoapsis }
    pub fn heading(&self) -> f64 { self.heading }
    pub fn countdown(&self) -> bool { self.countdown }
    pub fn entry_phase(&self) -> EntryPhase { self.entry_phase }
}

impl Default for FlightConfig {
    fn default() -> Self { Self::from_lookup(|_| None) }
}
