/**
 * AUV Controller Module
 *
 * Vehicle-specific layer on top of the generic six-axis PID engine:
 * - Thrust mixing through a fixed allocation matrix
 * - Per-vehicle loop tuning (see `config`)
 */

pub mod controller;
pub mod thrust_mixer;

pub use controller::VehicleController;
pub use thrust_mixer::ThrustMixer;
