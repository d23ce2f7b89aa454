/**
 * Axis ordering and shared numeric types
 *
 * Every vector that crosses the controller boundary is index-aligned to
 * [surge, sway, heave, roll, pitch, yaw]. Thruster command vectors use the
 * same length but index physical thrusters instead of axes.
 */

use std::f64::consts::{PI, TAU};
use std::fmt;

/// Generalized effort / state vector, one entry per axis (or per thruster).
pub type Vector6 = nalgebra::Vector6<f64>;

/// Allocation matrix: rows are thrusters, columns are axes.
pub type Matrix6 = nalgebra::Matrix6<f64>;

pub const AXIS_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Surge,
    Sway,
    Heave,
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    /// All axes in vector index order.
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Surge,
        Axis::Sway,
        Axis::Heave,
        Axis::Roll,
        Axis::Pitch,
        Axis::Yaw,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Surge => "surge",
            Axis::Sway => "sway",
            Axis::Heave => "heave",
            Axis::Roll => "roll",
            Axis::Pitch => "pitch",
            Axis::Yaw => "yaw",
        }
    }

    pub fn is_rotational(self) -> bool {
        matches!(self, Axis::Roll | Axis::Pitch | Axis::Yaw)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap an angle in radians into [-π, π).
pub fn wrap_angle(rad: f64) -> f64 {
    (rad + PI).rem_euclid(TAU) - PI
}
