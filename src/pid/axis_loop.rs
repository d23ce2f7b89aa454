use serde::{Deserialize, Serialize};

use crate::axis::{wrap_angle, Axis};
use crate::error::ControlError;

/// Proportional, integral and derivative gains for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        PidGains { kp, ki, kd }
    }

    pub fn proportional(kp: f64) -> Self {
        PidGains { kp, ..Default::default() }
    }

    fn validate(&self, axis: Axis) -> Result<(), ControlError> {
        if self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite() {
            Ok(())
        } else {
            Err(ControlError::InvalidConfiguration(format!(
                "non-finite gains on {} axis: {:?}",
                axis, self
            )))
        }
    }
}

/// Closed interval used for output saturation and integral clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub fn new(min: f64, max: f64) -> Self {
        Limits { min, max }
    }

    pub fn symmetric(bound: f64) -> Self {
        Limits { min: -bound, max: bound }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn validate(&self, what: &str, axis: Axis) -> Result<(), ControlError> {
        // NaN fails both comparisons, so this also rejects it
        if !(self.min.is_finite() && self.max.is_finite() && self.min <= self.max) {
            return Err(ControlError::InvalidConfiguration(format!(
                "{} limits on {} axis must be finite with min <= max, got [{}, {}]",
                what, axis, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// What happens to the integral accumulator while the output is saturated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntiWindup {
    /// Integrate unconditionally; only `integral_limits` bound the accumulator.
    Off,
    /// Drop a tick's integration when the output is saturated and that
    /// integration pushes further into the saturated direction.
    #[default]
    Conditional,
}

/// Tuning for a single axis loop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub gains: PidGains,
    pub output_limits: Option<Limits>,
    pub integral_limits: Option<Limits>,
    /// Constant bias added to the command before saturation.
    pub offset: f64,
    /// Wrap the error into [-π, π) before use.
    pub angle_wrap: bool,
}

impl LoopConfig {
    pub fn with_gains(gains: PidGains) -> Self {
        LoopConfig { gains, ..Default::default() }
    }

    pub fn output_limits(mut self, limits: Limits) -> Self {
        self.output_limits = Some(limits);
        self
    }

    pub fn integral_limits(mut self, limits: Limits) -> Self {
        self.integral_limits = Some(limits);
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn angle_wrap(mut self, wrap: bool) -> Self {
        self.angle_wrap = wrap;
        self
    }

    pub fn validate(&self, axis: Axis) -> Result<(), ControlError> {
        self.gains.validate(axis)?;
        if !self.offset.is_finite() {
            return Err(ControlError::InvalidConfiguration(format!(
                "non-finite offset on {} axis",
                axis
            )));
        }
        if let Some(limits) = &self.output_limits {
            limits.validate("output", axis)?;
        }
        if let Some(limits) = &self.integral_limits {
            limits.validate("integral", axis)?;
        }
        Ok(())
    }
}

/// Runtime state of one axis: tuning plus the integral / previous-error pair.
#[derive(Debug, Clone)]
pub(crate) struct AxisLoop {
    axis: Axis,
    config: LoopConfig,
    integral: f64,
    prev_error: f64,
}

impl AxisLoop {
    pub(crate) fn new(axis: Axis, config: LoopConfig) -> Self {
        AxisLoop {
            axis,
            config,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    pub(crate) fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub(crate) fn set_gains(&mut self, gains: PidGains) {
        self.config.gains = gains;
    }

    pub(crate) fn integral(&self) -> f64 {
        self.integral
    }

    /// Error seen on the most recent tick.
    pub(crate) fn last_error(&self) -> f64 {
        self.prev_error
    }

    pub(crate) fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }

    /// Compute one control tick without touching state. Inputs are assumed
    /// validated: finite values and `dt >= 0`. A zero `dt` freezes the
    /// integral and zeroes the derivative.
    ///
    /// Finite inputs can still overflow (huge errors, a tiny `dt`); that is
    /// reported as `NumericOverflow` so nothing non-finite is ever stored.
    pub(crate) fn plan(&self, set_point: f64, process_point: f64, dt: f64, policy: AntiWindup) -> Result<AxisTick, ControlError> {
        let cfg = &self.config;

        let mut error = set_point - process_point;
        if cfg.angle_wrap && error.is_finite() {
            error = wrap_angle(error);
        }

        let (candidate, derivative) = if dt > 0.0 {
            let mut integral = self.integral + error * dt;
            if let Some(limits) = &cfg.integral_limits {
                integral = limits.clamp(integral);
            }
            (integral, (error - self.prev_error) / dt)
        } else {
            (self.integral, 0.0)
        };

        let unclamped = cfg.gains.kp * error
            + cfg.gains.ki * candidate
            + cfg.gains.kd * derivative
            + cfg.offset;

        if ![error, candidate, derivative, unclamped].iter().all(|v| v.is_finite()) {
            return Err(ControlError::NumericOverflow { axis: self.axis });
        }

        let output = match &cfg.output_limits {
            Some(limits) => limits.clamp(unclamped),
            None => unclamped,
        };

        //contribution of this tick's integration to the output
        let push = cfg.gains.ki * (candidate - self.integral);
        let winding_up = output != unclamped && push != 0.0 && (push > 0.0) == (unclamped > output);

        if winding_up {
            log::trace!(
                "[pid] {} saturated: {:.4} -> {:.4}",
                self.axis, unclamped, output
            );
        }

        let integral = if winding_up && policy == AntiWindup::Conditional {
            self.integral
        } else {
            candidate
        };

        Ok(AxisTick { error, integral, output })
    }

    pub(crate) fn commit(&mut self, tick: &AxisTick) {
        self.integral = tick.integral;
        self.prev_error = tick.error;
    }
}

/// Result of a planned tick, written back only once all axes succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct AxisTick {
    pub(crate) error: f64,
    pub(crate) integral: f64,
    pub(crate) output: f64,
}
