/**
 * AUV Controller
 *
 * Allocation layer for a specific vehicle:
 * 1. Runs the six-axis PID engine on set-point / process-point vectors
 * 2. Maps the resulting efforts through the thrust mixer
 * 3. Returns one command per thruster
 *
 * Owned by exactly one scheduler; there is no internal locking.
 */

use crate::axis::{Axis, Vector6};
use crate::config::VehicleConfig;
use crate::error::ControlError;
use crate::pid::{PidEngine, PidGains};
use super::thrust_mixer::ThrustMixer;

#[derive(Debug, Clone)]
pub struct VehicleController {
    name: String,
    engine: PidEngine,
    mixer: ThrustMixer,
    last_efforts: Vector6,
}

impl VehicleController {
    pub fn new(config: &VehicleConfig) -> Result<Self, ControlError> {
        let engine = PidEngine::new(config.axes.to_array(), config.anti_windup)?;
        let mixer = ThrustMixer::from_rows(config.allocation, config.thrust_limit)?;

        log::debug!(
            "[auv] controller '{}' configured, thrust limit {:?}",
            config.name, config.thrust_limit
        );

        Ok(Self::from_parts(config.name.clone(), engine, mixer))
    }

    pub fn from_parts(name: String, engine: PidEngine, mixer: ThrustMixer) -> Self {
        Self {
            name,
            engine,
            mixer,
            last_efforts: Vector6::zeros(),
        }
    }

    /// Controller for the Pico mini-AUV with its field tuning.
    pub fn pico() -> Result<Self, ControlError> {
        Self::new(&VehicleConfig::pico())
    }

    /// Run one tick of `dt` seconds and return the thruster commands.
    pub fn update(&mut self, set_points: &Vector6, process_points: &Vector6, dt: f64) -> Result<Vector6, ControlError> {
        let efforts = self.engine.update(set_points, process_points, dt)?;
        self.last_efforts = efforts;
        Ok(self.mixer.mix(&efforts))
    }

    pub fn update_slices(&mut self, set_points: &[f64], process_points: &[f64], dt: f64) -> Result<Vector6, ControlError> {
        let efforts = self.engine.update_slices(set_points, process_points, dt)?;
        self.last_efforts = efforts;
        Ok(self.mixer.mix(&efforts))
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_efforts = Vector6::zeros();
    }

    /// Per-axis tracking error from the last tick.
    pub fn last_errors(&self) -> Vector6 {
        self.engine.errors()
    }

    /// Per-axis effort from the last tick, before allocation.
    pub fn last_efforts(&self) -> Vector6 {
        self.last_efforts
    }

    pub fn set_gains(&mut self, axis: Axis, gains: PidGains) -> Result<(), ControlError> {
        self.engine.set_gains(axis, gains)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &PidEngine {
        &self.engine
    }

    pub fn mixer(&self) -> &ThrustMixer {
        &self.mixer
    }
}
