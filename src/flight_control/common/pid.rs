use std::time::Duration;

/// Proportional, integral and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    kp: f64,
    ki: f64,
    kd: f64,
}

impl PidGains {
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self { Self { kp, ki, kd } }
}

/// Source of the derivative term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeMode {
    /// `error - last_error`
    OnError,
    /// `-(measurement - last_measurement)`, immune to setpoint kicks.
    OnMeasurement,
}

/// A discrete PID controller sampled at a fixed interval.
///
/// Every instance is owned by exactly one control phase and starts from a clean state, so two
/// fresh instances fed the same measurements produce the same corrections.
#[derive(Debug, Clone)]
pub struct Pid {
    gains: PidGains,
    setpoint: f64,
    /// Sample interval in seconds, used for the integral.
    sample_dt: f64,
    integral: f64,
    last_error: Option<f64>,
    last_measurement: Option<f64>,
    output_limits: Option<(f64, f64)>,
    mode: DerivativeMode,
}

impl Pid {
    pub fn new(gains: PidGains, setpoint: f64, sample_interval: Duration) -> Self {
        Self {
            gains,
            setpoint,
            sample_dt: sample_interval.as_secs_f64(),
            integral: 0.0,
            last_error: None,
            last_measurement: None,
            output_limits: None,
            mode: DerivativeMode::OnError,
        }
    }

    /// Clamps the output (and the integral term) to `[lower, upper]`.
    #[must_use]
    pub fn with_output_limits(mut self, lower: f64, upper: f64) -> Self {
        let (lo, hi) = if lower <= upper { (lower, upper) } else { (upper, lower) };
        self.output_limits = Some((lo, hi));
        self
    }

    /// Switches the derivative term to the negative measurement delta.
    #[must_use]
    pub fn proportional_on_measurement(mut self) -> Self {
        self.mode = DerivativeMode::OnMeasurement;
        self
    }

    /// Feeds one measurement and returns the correction for this sample.
    pub fn update(&mut self, measurement: f64) -> f64 {
        let error = self.setpoint - measurement;
        self.integral += error * self.sample_dt;

        let mut i_term = self.gains.ki * self.integral;
        if let Some((lo, hi)) = self.output_limits {
            let clamped = i_term.clamp(lo, hi);
            if clamped != i_term && self.gains.ki != 0.0 {
                // anti-windup: keep the accumulator consistent with the clamped term
                self.integral = clamped / self.gains.ki;
            }
            i_term = clamped;
        }

        let derivative = match self.mode {
            DerivativeMode::OnError => self.last_error.map_or(0.0, |last| error - last),
            DerivativeMode::OnMeasurement => {
                self.last_measurement.map_or(0.0, |last| -(measurement - last))
            }
        };
        self.last_error = Some(error);
        self.last_measurement = Some(measurement);

        let output = self.gains.kp * error + i_term + self.gains.kd * derivative;
        match self.output_limits {
            Some((lo, hi)) => output.clamp(lo, hi),
            None => output,
        }
    }
}
