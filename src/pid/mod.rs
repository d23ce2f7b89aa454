/**
 * Six-axis PID engine
 *
 * Six independent loops, one per axis, stepped together once per control
 * tick. Inputs are validated in full before any loop state is touched, so a
 * rejected call leaves integrals and previous errors exactly as they were.
 */

mod axis_loop;

pub use axis_loop::{AntiWindup, Limits, LoopConfig, PidGains};

use crate::axis::{Axis, Vector6, AXIS_COUNT};
use crate::error::ControlError;
use axis_loop::{AxisLoop, AxisTick};

#[derive(Debug, Clone)]
pub struct PidEngine {
    loops: [AxisLoop; AXIS_COUNT],
    anti_windup: AntiWindup,
}

impl PidEngine {
    pub fn new(configs: [LoopConfig; AXIS_COUNT], anti_windup: AntiWindup) -> Result<Self, ControlError> {
        for axis in Axis::ALL {
            configs[axis.index()].validate(axis)?;
        }

        let loops = Axis::ALL.map(|axis| AxisLoop::new(axis, configs[axis.index()]));
        log::debug!("[pid] engine ready, anti-windup {:?}", anti_windup);

        Ok(PidEngine { loops, anti_windup })
    }

    /// Compute per-axis efforts for one tick of `dt` seconds.
    ///
    /// Fails with `InvalidTimeDelta` for negative or non-finite `dt`, with
    /// `NonFiniteInput` for NaN/∞ entries and with `NumericOverflow` when a
    /// term overflows. All six axes are computed before any is written back,
    /// so state is untouched on failure.
    pub fn update(&mut self, set_points: &Vector6, process_points: &Vector6, dt: f64) -> Result<Vector6, ControlError> {
        check_time_delta(dt)?;
        check_finite("set-point", set_points)?;
        check_finite("process", process_points)?;

        let mut ticks = [AxisTick::default(); AXIS_COUNT];
        for (i, axis_loop) in self.loops.iter().enumerate() {
            ticks[i] = axis_loop.plan(set_points[i], process_points[i], dt, self.anti_windup)?;
        }

        let mut efforts = Vector6::zeros();
        for (i, axis_loop) in self.loops.iter_mut().enumerate() {
            axis_loop.commit(&ticks[i]);
            efforts[i] = ticks[i].output;
        }
        Ok(efforts)
    }

    /// Same as [`PidEngine::update`] for callers holding plain slices, such
    /// as the C and Python bindings. Slices must have exactly six entries.
    pub fn update_slices(&mut self, set_points: &[f64], process_points: &[f64], dt: f64) -> Result<Vector6, ControlError> {
        let set_points = to_vector("set-point", set_points)?;
        let process_points = to_vector("process", process_points)?;
        self.update(&set_points, &process_points, dt)
    }

    /// Zero every integral accumulator and previous error.
    pub fn reset(&mut self) {
        for axis_loop in self.loops.iter_mut() {
            axis_loop.reset();
        }
    }

    /// Per-axis error from the most recent tick.
    pub fn errors(&self) -> Vector6 {
        Vector6::from_fn(|i, _| self.loops[i].last_error())
    }

    pub fn integrals(&self) -> Vector6 {
        Vector6::from_fn(|i, _| self.loops[i].integral())
    }

    pub fn loop_config(&self, axis: Axis) -> &LoopConfig {
        self.loops[axis.index()].config()
    }

    pub fn anti_windup(&self) -> AntiWindup {
        self.anti_windup
    }

    /// Retune one axis in place. Accumulated state is kept.
    pub fn set_gains(&mut self, axis: Axis, gains: PidGains) -> Result<(), ControlError> {
        LoopConfig::with_gains(gains).validate(axis)?;
        self.loops[axis.index()].set_gains(gains);
        Ok(())
    }
}

fn check_time_delta(dt: f64) -> Result<(), ControlError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidTimeDelta(dt))
    }
}

fn check_finite(which: &'static str, values: &Vector6) -> Result<(), ControlError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ControlError::NonFiniteInput {
            which,
            axis: Axis::ALL[i],
        }),
        None => Ok(()),
    }
}

pub(crate) fn to_vector(which: &'static str, values: &[f64]) -> Result<Vector6, ControlError> {
    if values.len() != AXIS_COUNT {
        return Err(ControlError::InvalidInputSize {
            which,
            len: values.len(),
        });
    }
    Ok(Vector6::from_column_slice(values))
}
