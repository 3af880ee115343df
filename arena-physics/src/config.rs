// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Tunable simulation constants
//!
//! Every constant the force model and the world loop read lives in
//! [`PhysicsConfig`]. The defaults reproduce the reference tuning; a config
//! can be adjusted with `with_*` builders, loaded from JSON, or overlaid from
//! environment variables.

use crate::units::{
    AngularMomentum, KilogramMetersPerSecond, KilogramsPerCubicMeter, Meters,
    MetersPerSecondSquared, PerSecondPerRadian, RadiansPerSecond, Scalar, Seconds,
};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`PhysicsConfig::min_spin_threshold`] (rad/s)
pub const ENV_MIN_SPIN: &str = "ARENA_PHYSICS_MIN_SPIN";
/// Environment variable overriding [`PhysicsConfig::collision_epsilon`] (s)
pub const ENV_COLLISION_EPSILON: &str = "ARENA_PHYSICS_COLLISION_EPSILON";
/// Environment variable overriding [`PhysicsConfig::air_density`] (kg/m³)
pub const ENV_AIR_DENSITY: &str = "ARENA_PHYSICS_AIR_DENSITY";
/// Environment variable overriding [`PhysicsConfig::gravity`] (m/s²)
pub const ENV_GRAVITY: &str = "ARENA_PHYSICS_GRAVITY";

/// Constants of the force model and the match rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Magnitude of gravitational acceleration, pointing along -y
    pub gravity: MetersPerSecondSquared,
    /// Density of the air used for drag
    pub air_density: KilogramsPerCubicMeter,
    /// Fraction of the frictional acceleration that moves the blade
    pub frictional_efficiency: Scalar,
    /// Weight of the classic `g * mu * cos(theta)` friction term
    pub frictional_acceleration_constant: Scalar,
    /// Weight of the spin-dependent `w * r * mu` friction term
    pub frictional_velocity_constant: PerSecondPerRadian,
    /// Spin rate below which a blade is out of spin
    pub min_spin_threshold: RadiansPerSecond,
    /// Cooldown between two impacts involving the same blade
    pub collision_epsilon: Seconds,
    /// Height of the contact point above the surface beyond which a blade is airborne
    pub airborne_tolerance: Meters,
    /// Scale of the spin drained by a same-spin impact
    pub recoil_angular_constant: AngularMomentum,
    /// Scale of the recoil push of a same-spin impact
    pub recoil_linear_constant: KilogramMetersPerSecond,
    /// Combined spin rate above which the recoil push starts to grow
    pub recoil_boost_onset: RadiansPerSecond,
    /// Combined spin rate at which the recoil push reaches twice its base value
    pub recoil_boost_saturation: RadiansPerSecond,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: MetersPerSecondSquared::new(9.81),
            air_density: KilogramsPerCubicMeter::new(0.8),
            frictional_efficiency: Scalar::new(0.5),
            frictional_acceleration_constant: Scalar::new(0.2),
            frictional_velocity_constant: PerSecondPerRadian::new(1.5),
            min_spin_threshold: RadiansPerSecond::new(30.0),
            collision_epsilon: Seconds::new(0.05),
            airborne_tolerance: Meters::new(0.005),
            recoil_angular_constant: AngularMomentum::new(1.5e-5),
            recoil_linear_constant: KilogramMetersPerSecond::new(2.5e-4),
            recoil_boost_onset: RadiansPerSecond::new(30.0),
            recoil_boost_saturation: RadiansPerSecond::new(1500.0),
        }
    }
}

impl PhysicsConfig {
    /// Set the gravitational acceleration magnitude
    pub fn with_gravity(mut self, gravity: MetersPerSecondSquared) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the air density
    pub fn with_air_density(mut self, air_density: KilogramsPerCubicMeter) -> Self {
        self.air_density = air_density;
        self
    }

    /// Set the friction model weights
    pub fn with_friction(
        mut self,
        efficiency: Scalar,
        acceleration_constant: Scalar,
        velocity_constant: PerSecondPerRadian,
    ) -> Self {
        self.frictional_efficiency = efficiency;
        self.frictional_acceleration_constant = acceleration_constant;
        self.frictional_velocity_constant = velocity_constant;
        self
    }

    /// Set the out-of-spin threshold
    pub fn with_min_spin_threshold(mut self, threshold: RadiansPerSecond) -> Self {
        self.min_spin_threshold = threshold;
        self
    }

    /// Set the impact cooldown
    pub fn with_collision_epsilon(mut self, epsilon: Seconds) -> Self {
        self.collision_epsilon = epsilon;
        self
    }

    /// Set the airborne tolerance
    pub fn with_airborne_tolerance(mut self, tolerance: Meters) -> Self {
        self.airborne_tolerance = tolerance;
        self
    }

    /// Set the scales of the same-spin recoil model
    pub fn with_recoil_constants(
        mut self,
        angular: AngularMomentum,
        linear: KilogramMetersPerSecond,
    ) -> Self {
        self.recoil_angular_constant = angular;
        self.recoil_linear_constant = linear;
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error describing the first value that is out of range.
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("gravity", self.gravity.value()),
            ("air density", self.air_density.value()),
            ("frictional efficiency", self.frictional_efficiency.value()),
            ("frictional acceleration constant", self.frictional_acceleration_constant.value()),
            ("frictional velocity constant", self.frictional_velocity_constant.value()),
            ("minimum spin threshold", self.min_spin_threshold.value()),
            ("collision epsilon", self.collision_epsilon.value()),
            ("airborne tolerance", self.airborne_tolerance.value()),
            ("recoil angular constant", self.recoil_angular_constant.value()),
            ("recoil linear constant", self.recoil_linear_constant.value()),
            ("recoil boost onset", self.recoil_boost_onset.value()),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(format!("Invalid {}: {}. Must be non-negative and finite.", name, value));
            }
        }

        if self.frictional_efficiency.value() > 1.0 {
            return Err(format!(
                "Invalid frictional efficiency: {}. Must not exceed 1.",
                self.frictional_efficiency
            ));
        }

        if !(self.recoil_boost_saturation > self.recoil_boost_onset)
            || !self.recoil_boost_saturation.is_finite()
        {
            return Err(format!(
                "Invalid recoil boost range: saturation {} must be finite and above onset {}.",
                self.recoil_boost_saturation, self.recoil_boost_onset
            ));
        }

        Ok(())
    }

    /// Defaults overlaid with the `ARENA_PHYSICS_*` environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values looked up by environment variable name
    ///
    /// Unset variables keep the current value. A value that does not parse as
    /// a number, or that makes the config invalid, is an error.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| -> Result<Option<f64>, String> {
            match lookup(key) {
                None => Ok(None),
                Some(raw) => raw
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|e| format!("Invalid value {:?} for {}: {}", raw, key, e)),
            }
        };

        if let Some(value) = parse(ENV_MIN_SPIN)? {
            self.min_spin_threshold = RadiansPerSecond::new(value);
        }
        if let Some(value) = parse(ENV_COLLISION_EPSILON)? {
            self.collision_epsilon = Seconds::new(value);
        }
        if let Some(value) = parse(ENV_AIR_DENSITY)? {
            self.air_density = KilogramsPerCubicMeter::new(value);
        }
        if let Some(value) = parse(ENV_GRAVITY)? {
            self.gravity = MetersPerSecondSquared::new(value);
        }

        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_spin_threshold, RadiansPerSecond::new(30.0));
        assert_eq!(config.collision_epsilon, Seconds::new(0.05));
        assert_eq!(config.airborne_tolerance, Meters::new(0.005));
    }

    #[test]
    fn test_builders() {
        let config = PhysicsConfig::default()
            .with_gravity(MetersPerSecondSquared::new(1.62))
            .with_air_density(KilogramsPerCubicMeter::new(0.0))
            .with_min_spin_threshold(RadiansPerSecond::new(50.0))
            .with_collision_epsilon(Seconds::new(0.1))
            .with_airborne_tolerance(Meters::new(0.01));

        assert_eq!(config.gravity.value(), 1.62);
        assert_eq!(config.air_density.value(), 0.0);
        assert_eq!(config.min_spin_threshold.value(), 50.0);
        assert_eq!(config.collision_epsilon.value(), 0.1);
        assert_eq!(config.airborne_tolerance.value(), 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = PhysicsConfig::default().with_gravity(MetersPerSecondSquared::new(-9.81));
        assert!(config.validate().is_err());

        let config = PhysicsConfig::default().with_collision_epsilon(Seconds::new(f64::NAN));
        assert!(config.validate().is_err());

        let config = PhysicsConfig::default().with_friction(
            Scalar::new(1.5),
            Scalar::new(0.2),
            PerSecondPerRadian::new(1.5),
        );
        assert!(config.validate().is_err());

        let config = PhysicsConfig {
            recoil_boost_saturation: RadiansPerSecond::new(10.0),
            ..PhysicsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlay_from_lookup() {
        let config = PhysicsConfig::default()
            .overlay(lookup_from(&[
                (ENV_MIN_SPIN, "45"),
                (ENV_COLLISION_EPSILON, " 0.02 "),
                (ENV_GRAVITY, "9.8"),
            ]))
            .unwrap();

        assert_eq!(config.min_spin_threshold.value(), 45.0);
        assert_eq!(config.collision_epsilon.value(), 0.02);
        assert_eq!(config.gravity.value(), 9.8);
        assert_eq!(config.air_density, PhysicsConfig::default().air_density);
    }

    #[test]
    fn test_overlay_rejects_unparsable_and_invalid_values() {
        let err = PhysicsConfig::default()
            .overlay(lookup_from(&[(ENV_AIR_DENSITY, "thick")]))
            .unwrap_err();
        assert!(err.contains(ENV_AIR_DENSITY), "Error should name the variable: {}", err);

        assert!(PhysicsConfig::default()
            .overlay(lookup_from(&[(ENV_MIN_SPIN, "-5")]))
            .is_err());
    }

    #[test]
    fn test_json_with_partial_fields() {
        let config: PhysicsConfig = serde_json::from_str(r#"{"min_spin_threshold": 20.0}"#).unwrap();
        assert_eq!(config.min_spin_threshold.value(), 20.0);
        assert_eq!(config.gravity, PhysicsConfig::default().gravity);
    }
}
