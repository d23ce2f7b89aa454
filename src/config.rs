/**
 * Vehicle Configuration
 *
 * Per-axis loop tuning plus the thruster allocation. The controller only
 * consumes these values; JSON loading is a convenience for hosts that keep
 * calibration on disk.
 */

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, AXIS_COUNT};
use crate::error::ControlError;
use crate::pid::{AntiWindup, Limits, LoopConfig, PidGains};

/// Loop tuning keyed by axis name.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub surge: LoopConfig,
    pub sway: LoopConfig,
    pub heave: LoopConfig,
    pub roll: LoopConfig,
    pub pitch: LoopConfig,
    pub yaw: LoopConfig,
}

impl AxesConfig {
    pub fn get(&self, axis: Axis) -> &LoopConfig {
        match axis {
            Axis::Surge => &self.surge,
            Axis::Sway => &self.sway,
            Axis::Heave => &self.heave,
            Axis::Roll => &self.roll,
            Axis::Pitch => &self.pitch,
            Axis::Yaw => &self.yaw,
        }
    }

    /// Same gains on every axis, no limits.
    pub fn uniform(gains: PidGains) -> Self {
        let config = LoopConfig::with_gains(gains);
        AxesConfig {
            surge: config,
            sway: config,
            heave: config,
            roll: config,
            pitch: config,
            yaw: config,
        }
    }

    /// Loop configs in axis index order.
    pub fn to_array(&self) -> [LoopConfig; AXIS_COUNT] {
        Axis::ALL.map(|axis| *self.get(axis))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub name: String,
    pub axes: AxesConfig,
    pub anti_windup: AntiWindup,
    /// Row-major allocation: one row per thruster, columns in axis order.
    pub allocation: [[f64; 6]; 6],
    pub thrust_limit: Option<f64>,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        let mut allocation = [[0.0; 6]; 6];
        for (i, row) in allocation.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        VehicleConfig {
            name: "identity".to_string(),
            axes: AxesConfig::default(),
            anti_windup: AntiWindup::default(),
            allocation,
            thrust_limit: None,
        }
    }
}

impl VehicleConfig {
    /// Pico mini-AUV: four vertical thrusters on the corners handle heave,
    /// roll and pitch; two angled horizontal thrusters handle surge and yaw.
    /// The vehicle has no sway authority.
    pub fn pico() -> Self {
        let mut axes = AxesConfig::default();
        axes.heave = LoopConfig::with_gains(PidGains::new(3.0, 0.0, 5.0))
            .offset(-15.0)
            .output_limits(Limits::new(-18.0, -8.0));
        axes.roll = LoopConfig::with_gains(PidGains::new(1.0, 0.0, 0.1)).angle_wrap(true);
        axes.pitch = LoopConfig::with_gains(PidGains::new(1.0, 0.0, 0.1)).angle_wrap(true);
        axes.yaw = LoopConfig::default().angle_wrap(true);

        VehicleConfig {
            name: "pico".to_string(),
            axes,
            anti_windup: AntiWindup::Conditional,
            //  surge sway heave roll pitch yaw
            allocation: [
                [0.0, 0.0, 1.0, 1.0, 1.0, 0.0],
                [1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0, -1.0, 0.0],
                [0.0, 0.0, 1.0, -1.0, -1.0, 0.0],
                [1.0, 0.0, 0.0, 0.0, 0.0, -1.0],
                [0.0, 0.0, 1.0, -1.0, 1.0, 0.0],
            ],
            thrust_limit: Some(100.0),
        }
    }

    /// Vectored layout: four horizontal thrusters at 45° and two verticals.
    pub fn vectored() -> Self {
        VehicleConfig {
            name: "vectored".to_string(),
            axes: AxesConfig::default(),
            anti_windup: AntiWindup::Conditional,
            //  surge sway heave roll pitch yaw
            //  FL/FR/RL/RR horizontals at 45 deg, then port/starboard verticals
            allocation: [
                [1.0, -1.0, 0.0, 0.0, 0.0, -1.0],
                [1.0, 1.0, 0.0, 0.0, 0.0, 1.0],
                [-1.0, -1.0, 0.0, 0.0, 0.0, 1.0],
                [-1.0, 1.0, 0.0, 0.0, 0.0, -1.0],
                [0.0, 0.0, 1.0, -1.0, 1.0, 0.0],
                [0.0, 0.0, 1.0, 1.0, 1.0, 0.0],
            ],
            thrust_limit: Some(100.0),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ControlError> {
        serde_json::from_str(json).map_err(|e| ControlError::ConfigLoad(e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ControlError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ControlError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ControlError> {
        serde_json::to_string_pretty(self).map_err(|e| ControlError::ConfigLoad(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "name": "bench",
            "axes": { "heave": { "gains": { "kp": 2.0 }, "offset": -1.5 } },
            "anti_windup": "off"
        }"#;
        let cfg = VehicleConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.name, "bench");
        assert_eq!(cfg.anti_windup, AntiWindup::Off);
        assert_eq!(cfg.axes.heave.gains, PidGains::proportional(2.0));
        assert_eq!(cfg.axes.heave.offset, -1.5);
        assert_eq!(cfg.axes.surge, LoopConfig::default());
        assert_eq!(cfg.allocation, VehicleConfig::default().allocation);
        assert_eq!(cfg.thrust_limit, None);
    }

    #[test]
    fn test_limits_and_allocation_from_json() {
        let json = r#"{
            "axes": { "roll": { "output_limits": { "min": -2.0, "max": 2.0 }, "angle_wrap": true } },
            "allocation": [[1,0,0,0,0,0],[0,1,0,0,0,0],[0,0,1,0,0,0],
                           [0,0,0,1,0,0],[0,0,0,0,1,0],[0,0,0,0,0,-1]],
            "thrust_limit": 40.0
        }"#;
        let cfg = VehicleConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.axes.roll.output_limits, Some(Limits::symmetric(2.0)));
        assert!(cfg.axes.roll.angle_wrap);
        assert_eq!(cfg.allocation[5][5], -1.0);
        assert_eq!(cfg.thrust_limit, Some(40.0));
    }

    #[test]
    fn test_bad_json_is_config_load_error() {
        assert!(matches!(
            VehicleConfig::from_json_str("{ \"allocation\": [[1, 2]] }"),
            Err(ControlError::ConfigLoad(_))
        ));
        assert!(matches!(
            VehicleConfig::from_path("/nonexistent/pico.json"),
            Err(ControlError::ConfigLoad(_))
        ));
    }

    #[test]
    fn test_from_path_roundtrips_pico() {
        let pico = VehicleConfig::pico();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(pico.to_json_pretty().unwrap().as_bytes()).unwrap();

        let loaded = VehicleConfig::from_path(file.path()).unwrap();
        assert_eq!(loaded, pico);
    }

    #[test]
    fn test_axes_array_order() {
        let mut axes = AxesConfig::default();
        axes.pitch.offset = 7.0;
        let array = axes.to_array();
        assert_eq!(array[Axis::Pitch.index()].offset, 7.0);
        assert_eq!(array[Axis::Roll.index()].offset, 0.0);
    }
}
