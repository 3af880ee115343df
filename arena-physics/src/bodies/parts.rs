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
//! Blade parts: layer (top), disc (middle) and driver (bottom tip)
//!
//! Parts are plain data. A [`BladeBody`](super::BladeBody) derives its mass,
//! moment of inertia and drag terms from the three parts it is built from.

use super::recoil::RecoilDistribution;
use crate::units::{
    KilogramSquareMeters, Kilograms, Meters, MetersToTheFifth, Scalar, SquareMeters,
};
use serde::{Deserialize, Serialize};
use typenum::P4;

/// Drag coefficient of a short cylinder seen side-on
const CYLINDER_DRAG_COEFFICIENT: f64 = 0.9;

/// Physical properties shared by all blade parts
pub trait BladePart {
    /// Outer radius
    fn radius(&self) -> Meters;

    /// Vertical extent
    fn height(&self) -> Meters;

    /// Mass
    fn mass(&self) -> Kilograms;

    /// Moment of inertia about the spin axis
    fn moment_of_inertia(&self) -> KilogramSquareMeters;

    /// Dimensionless rotational drag coefficient
    fn rotational_drag_coefficient(&self) -> Scalar;

    /// Drag coefficient times frontal area
    fn linear_drag_area(&self) -> SquareMeters {
        CYLINDER_DRAG_COEFFICIENT * 2.0 * (self.height() * self.radius())
    }

    /// Rotational drag coefficient times `height * radius^4`
    fn angular_drag_term(&self) -> MetersToTheFifth {
        let radius_pow4 = self.radius().powi::<P4>();
        self.rotational_drag_coefficient().value() * (self.height() * radius_pow4)
    }

    /// Check that the shared properties are physically meaningful
    fn validate_common(&self, part: &str) -> Result<(), String> {
        let positive = [
            ("radius", self.radius().value()),
            ("height", self.height().value()),
            ("mass", self.mass().value()),
            ("moment of inertia", self.moment_of_inertia().value()),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(format!("{} {} must be positive and finite, got {}", part, name, value));
            }
        }

        let drag = self.rotational_drag_coefficient().value();
        if !(drag >= 0.0 && drag.is_finite()) {
            return Err(format!(
                "{} rotational drag coefficient must be non-negative and finite, got {}",
                part, drag
            ));
        }
        Ok(())
    }
}

/// Mass distribution of a part, used when a moment of inertia is not given
pub trait PartShape {
    /// Ratio of the moment of inertia to `mass * radius^2`
    const INERTIA_FACTOR: f64;

    /// Moment of inertia of a part of this shape with the given mass and radius
    fn inertia_for(mass: Kilograms, radius: Meters) -> KilogramSquareMeters {
        Self::INERTIA_FACTOR * (mass * radius * radius)
    }
}

/// Top section of a blade, the part that touches other blades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LayerFile")]
pub struct Layer {
    /// Outer radius, used for blade-blade contact
    pub radius: Meters,
    /// Vertical extent, used for blade-blade contact
    pub height: Meters,
    /// Mass
    pub mass: Kilograms,
    /// Moment of inertia about the spin axis
    pub moment_of_inertia: KilogramSquareMeters,
    /// Fraction of relative speed kept after a collision
    pub coefficient_of_restitution: Scalar,
    /// Rotational drag coefficient
    pub rotational_drag_coefficient: Scalar,
    /// Recoil strength distribution sampled on every collision
    pub recoil: RecoilDistribution,
}

impl Layer {
    /// Validate the layer parameters
    pub fn validate(&self) -> Result<(), String> {
        self.validate_common("Layer")?;
        let cor = self.coefficient_of_restitution.value();
        if !(0.0..=1.0).contains(&cor) {
            return Err(format!("Layer coefficient of restitution must be in [0, 1], got {}", cor));
        }
        Ok(())
    }
}

impl Default for Layer {
    fn default() -> Self {
        let radius = Meters::new(0.025);
        let mass = Kilograms::new(0.022);
        Layer {
            radius,
            height: Meters::new(0.01),
            mass,
            moment_of_inertia: Layer::inertia_for(mass, radius),
            coefficient_of_restitution: Scalar::new(0.8),
            rotational_drag_coefficient: Scalar::new(0.7 * 0.005),
            recoil: RecoilDistribution::new(1.0, 0.1),
        }
    }
}

impl PartShape for Layer {
    const INERTIA_FACTOR: f64 = 0.5;
}

impl BladePart for Layer {
    fn radius(&self) -> Meters {
        self.radius
    }

    fn height(&self) -> Meters {
        self.height
    }

    fn mass(&self) -> Kilograms {
        self.mass
    }

    fn moment_of_inertia(&self) -> KilogramSquareMeters {
        self.moment_of_inertia
    }

    fn rotational_drag_coefficient(&self) -> Scalar {
        self.rotational_drag_coefficient
    }
}

/// Middle section of a blade, mostly contributing weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DiscFile")]
pub struct Disc {
    /// Outer radius
    pub radius: Meters,
    /// Vertical extent
    pub height: Meters,
    /// Mass
    pub mass: Kilograms,
    /// Moment of inertia about the spin axis
    pub moment_of_inertia: KilogramSquareMeters,
    /// Rotational drag coefficient
    pub rotational_drag_coefficient: Scalar,
}

impl Disc {
    /// Validate the disc parameters
    pub fn validate(&self) -> Result<(), String> {
        self.validate_common("Disc")
    }
}

impl Default for Disc {
    fn default() -> Self {
        let radius = Meters::new(0.018);
        let mass = Kilograms::new(0.027);
        Disc {
            radius,
            height: Meters::new(0.01),
            mass,
            moment_of_inertia: Disc::inertia_for(mass, radius),
            rotational_drag_coefficient: Scalar::new(0.1 * 0.005),
        }
    }
}

impl PartShape for Disc {
    const INERTIA_FACTOR: f64 = 0.7;
}

impl BladePart for Disc {
    fn radius(&self) -> Meters {
        self.radius
    }

    fn height(&self) -> Meters {
        self.height
    }

    fn mass(&self) -> Kilograms {
        self.mass
    }

    fn moment_of_inertia(&self) -> KilogramSquareMeters {
        self.moment_of_inertia
    }

    fn rotational_drag_coefficient(&self) -> Scalar {
        self.rotational_drag_coefficient
    }
}

/// Bottom tip of a blade, the part that touches the stadium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DriverFile")]
pub struct Driver {
    /// Radius of the contact tip
    pub radius: Meters,
    /// Radius where the driver meets the disc
    pub upper_radius: Meters,
    /// Vertical extent
    pub height: Meters,
    /// Mass
    pub mass: Kilograms,
    /// Moment of inertia about the spin axis
    pub moment_of_inertia: KilogramSquareMeters,
    /// Rotational drag coefficient
    pub rotational_drag_coefficient: Scalar,
    /// Friction coefficient of the tip against the stadium
    pub coefficient_of_friction: Scalar,
}

impl Driver {
    /// Validate the driver parameters
    pub fn validate(&self) -> Result<(), String> {
        self.validate_common("Driver")?;
        if self.upper_radius < self.radius {
            return Err(format!(
                "Driver upper radius {} must not be smaller than tip radius {}",
                self.upper_radius, self.radius
            ));
        }
        let cof = self.coefficient_of_friction.value();
        if !(cof >= 0.0 && cof.is_finite()) {
            return Err(format!(
                "Driver coefficient of friction must be non-negative and finite, got {}",
                cof
            ));
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        let radius = Meters::new(0.002);
        let mass = Kilograms::new(0.005);
        Driver {
            radius,
            upper_radius: Meters::new(0.012),
            height: Meters::new(0.015),
            mass,
            moment_of_inertia: Driver::inertia_for(mass, radius),
            rotational_drag_coefficient: Scalar::new(0.1 * 0.005),
            coefficient_of_friction: Scalar::new(0.22),
        }
    }
}

// Tapered tip
impl PartShape for Driver {
    const INERTIA_FACTOR: f64 = 0.375;
}

impl BladePart for Driver {
    fn radius(&self) -> Meters {
        self.radius
    }

    fn height(&self) -> Meters {
        self.height
    }

    fn mass(&self) -> Kilograms {
        self.mass
    }

    fn moment_of_inertia(&self) -> KilogramSquareMeters {
        self.moment_of_inertia
    }

    fn rotational_drag_coefficient(&self) -> Scalar {
        self.rotational_drag_coefficient
    }

    // The tip is a single narrow cylinder rather than a two-sided profile
    fn linear_drag_area(&self) -> SquareMeters {
        CYLINDER_DRAG_COEFFICIENT * (self.height * self.radius)
    }
}

// Part files may leave out any field. A missing moment of inertia is derived
// from the mass and radius actually used, so overriding either keeps it
// consistent.

#[derive(Deserialize)]
#[serde(default)]
struct LayerFile {
    radius: Meters,
    height: Meters,
    mass: Kilograms,
    moment_of_inertia: Option<KilogramSquareMeters>,
    coefficient_of_restitution: Scalar,
    rotational_drag_coefficient: Scalar,
    recoil: RecoilDistribution,
}

impl Default for LayerFile {
    fn default() -> Self {
        let layer = Layer::default();
        LayerFile {
            radius: layer.radius,
            height: layer.height,
            mass: layer.mass,
            moment_of_inertia: None,
            coefficient_of_restitution: layer.coefficient_of_restitution,
            rotational_drag_coefficient: layer.rotational_drag_coefficient,
            recoil: layer.recoil,
        }
    }
}

impl From<LayerFile> for Layer {
    fn from(file: LayerFile) -> Self {
        Layer {
            radius: file.radius,
            height: file.height,
            mass: file.mass,
            moment_of_inertia: file
                .moment_of_inertia
                .unwrap_or_else(|| Layer::inertia_for(file.mass, file.radius)),
            coefficient_of_restitution: file.coefficient_of_restitution,
            rotational_drag_coefficient: file.rotational_drag_coefficient,
            recoil: file.recoil,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct DiscFile {
    radius: Meters,
    height: Meters,
    mass: Kilograms,
    moment_of_inertia: Option<KilogramSquareMeters>,
    rotational_drag_coefficient: Scalar,
}

impl Default for DiscFile {
    fn default() -> Self {
        let disc = Disc::default();
        DiscFile {
            radius: disc.radius,
            height: disc.height,
            mass: disc.mass,
            moment_of_inertia: None,
            rotational_drag_coefficient: disc.rotational_drag_coefficient,
        }
    }
}

impl From<DiscFile> for Disc {
    fn from(file: DiscFile) -> Self {
        Disc {
            radius: file.radius,
            height: file.height,
            mass: file.mass,
            moment_of_inertia: file
                .moment_of_inertia
                .unwrap_or_else(|| Disc::inertia_for(file.mass, file.radius)),
            rotational_drag_coefficient: file.rotational_drag_coefficient,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct DriverFile {
    radius: Meters,
    upper_radius: Meters,
    height: Meters,
    mass: Kilograms,
    moment_of_inertia: Option<KilogramSquareMeters>,
    rotational_drag_coefficient: Scalar,
    coefficient_of_friction: Scalar,
}

impl Default for DriverFile {
    fn default() -> Self {
        let driver = Driver::default();
        DriverFile {
            radius: driver.radius,
            upper_radius: driver.upper_radius,
            height: driver.height,
            mass: driver.mass,
            moment_of_inertia: None,
            rotational_drag_coefficient: driver.rotational_drag_coefficient,
            coefficient_of_friction: driver.coefficient_of_friction,
        }
    }
}

impl From<DriverFile> for Driver {
    fn from(file: DriverFile) -> Self {
        Driver {
            radius: file.radius,
            upper_radius: file.upper_radius,
            height: file.height,
            mass: file.mass,
            moment_of_inertia: file
                .moment_of_inertia
                .unwrap_or_else(|| Driver::inertia_for(file.mass, file.radius)),
            rotational_drag_coefficient: file.rotational_drag_coefficient,
            coefficient_of_friction: file.coefficient_of_friction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parts_are_valid() {
        assert!(Layer::default().validate().is_ok());
        assert!(Disc::default().validate().is_ok());
        assert!(Driver::default().validate().is_ok());
    }

    #[test]
    fn test_default_inertia() {
        let layer = Layer::default();
        assert!((layer.moment_of_inertia.value() - 0.5 * 0.022 * 0.025 * 0.025).abs() < 1e-15);

        let disc = Disc::default();
        assert!((disc.moment_of_inertia.value() - 0.7 * 0.027 * 0.018 * 0.018).abs() < 1e-15);
    }

    #[test]
    fn test_drag_terms() {
        let layer = Layer::default();
        let expected_area = 0.9 * 2.0 * 0.01 * 0.025;
        assert!((layer.linear_drag_area().value() - expected_area).abs() < 1e-15);

        let expected_angular = 0.0035 * 0.01 * 0.025_f64.powi(4);
        assert!((layer.angular_drag_term().value() - expected_angular).abs() < 1e-20);

        let driver = Driver::default();
        let expected_driver_area = 0.9 * 0.015 * 0.002;
        assert!((driver.linear_drag_area().value() - expected_driver_area).abs() < 1e-15);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut layer = Layer::default();
        layer.mass = Kilograms::new(0.0);
        assert!(layer.validate().is_err());

        let mut layer = Layer::default();
        layer.coefficient_of_restitution = Scalar::new(1.5);
        assert!(layer.validate().is_err());

        let mut driver = Driver::default();
        driver.upper_radius = Meters::new(0.001);
        assert!(driver.validate().is_err());

        let mut disc = Disc::default();
        disc.radius = Meters::new(f64::NAN);
        assert!(disc.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let layer: Layer = serde_json::from_str(r#"{"radius": 0.03, "mass": 0.025}"#).unwrap();
        assert_eq!(layer.radius, Meters::new(0.03));
        assert_eq!(layer.mass, Kilograms::new(0.025));
        assert_eq!(layer.height, Layer::default().height);
        assert_eq!(layer.recoil, RecoilDistribution::new(1.0, 0.1));
    }

    #[test]
    fn test_missing_inertia_follows_mass_and_radius() {
        let layer: Layer = serde_json::from_str(r#"{"radius": 0.03, "mass": 0.025}"#).unwrap();
        assert!((layer.moment_of_inertia.value() - 0.5 * 0.025 * 0.03 * 0.03).abs() < 1e-15);

        let disc: Disc = serde_json::from_str(r#"{"mass": 0.054}"#).unwrap();
        let expected = 2.0 * Disc::default().moment_of_inertia.value();
        assert!((disc.moment_of_inertia.value() - expected).abs() < 1e-15);

        let driver: Driver = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(driver, Driver::default());

        // An explicit value is kept as given
        let layer: Layer = serde_json::from_str(r#"{"mass": 0.03, "moment_of_inertia": 1e-5}"#).unwrap();
        assert_eq!(layer.moment_of_inertia.value(), 1e-5);
    }
}
