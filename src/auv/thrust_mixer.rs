/**
 * Thrust Mixer
 *
 * Maps a 6-DoF effort vector (surge, sway, heave, roll, pitch, yaw) onto
 * the six thrusters through a fixed allocation matrix.
 *
 * Commands are NOT clamped unless a thrust limit is configured; otherwise
 * range limiting is left to the actuator driver.
 */

use crate::axis::{Matrix6, Vector6};
use crate::error::ControlError;

/// Smallest-to-largest singular value ratio below which a DoF counts as lost.
const RANK_RTOL: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct ThrustMixer {
    /// Contribution of each DoF to each thruster [6 thrusters x 6 DoFs]
    mix_matrix: Matrix6,
    /// Optional symmetric bound on every thruster command
    thrust_limit: Option<f64>,
}

impl ThrustMixer {
    pub fn new(mix_matrix: Matrix6, thrust_limit: Option<f64>) -> Result<Self, ControlError> {
        if let Some((row, col)) = find_non_finite(&mix_matrix) {
            return Err(ControlError::InvalidConfiguration(format!(
                "allocation matrix entry ({}, {}) is not finite",
                row, col
            )));
        }
        if let Some(limit) = thrust_limit {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(ControlError::InvalidConfiguration(format!(
                    "thrust limit must be finite and positive, got {}",
                    limit
                )));
            }
        }

        let mixer = ThrustMixer { mix_matrix, thrust_limit };
        if !mixer.is_full_rank() {
            log::warn!("[mixer] allocation matrix is rank deficient, some DoFs cannot be actuated");
        }
        Ok(mixer)
    }

    /// Build from row-major rows: one row per thruster, columns in axis order.
    pub fn from_rows(rows: [[f64; 6]; 6], thrust_limit: Option<f64>) -> Result<Self, ControlError> {
        Self::new(Matrix6::from_fn(|r, c| rows[r][c]), thrust_limit)
    }

    /// Identity allocation: thruster i is driven by axis i.
    pub fn identity() -> Self {
        ThrustMixer {
            mix_matrix: Matrix6::identity(),
            thrust_limit: None,
        }
    }

    /// Mix a 6-DoF effort vector into individual thruster commands
    pub fn mix(&self, effort: &Vector6) -> Vector6 {
        let output = self.mix_matrix * effort;
        match self.thrust_limit {
            Some(limit) => output.map(|t| t.clamp(-limit, limit)),
            None => output,
        }
    }

    pub fn matrix(&self) -> &Matrix6 {
        &self.mix_matrix
    }

    pub fn thrust_limit(&self) -> Option<f64> {
        self.thrust_limit
    }

    /// True when every DoF can be produced independently.
    pub fn is_full_rank(&self) -> bool {
        //relative to the largest singular value so scaling the matrix doesn't matter
        let singular = self.mix_matrix.svd(false, false).singular_values;
        let largest = singular.max();
        largest > 0.0 && singular.min() > largest * RANK_RTOL
    }
}

fn find_non_finite(matrix: &Matrix6) -> Option<(usize, usize)> {
    for r in 0..6 {
        for c in 0..6 {
            if !matrix[(r, c)].is_finite() {
                return Some((r, c));
            }
        }
    }
    None
}
