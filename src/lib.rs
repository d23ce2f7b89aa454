pub mod axis;
pub mod error;
pub mod pid;
pub mod auv;
pub mod config;
pub mod ffi;

#[cfg(feature = "python")]
pub mod python;

pub use axis::{Axis, Matrix6, Vector6, wrap_angle};
pub use error::ControlError;
pub use pid::{AntiWindup, Limits, LoopConfig, PidEngine, PidGains};
pub use auv::{ThrustMixer, VehicleController};
pub use config::{AxesConfig, VehicleConfig};
