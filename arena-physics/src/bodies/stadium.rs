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
//! Paraboloid stadium surface
//!
//! The surface height at horizontal offset `r` from the center is
//! `curvature / radius * r^2` above the center's y coordinate. The stadium
//! is immutable while a step runs and may only be reconfigured between
//! matches.

use crate::units::{LengthVector, Meters, PerMeter, Scalar, UnitVector};
use serde::{Deserialize, Serialize};

/// Construction parameters of a [`StadiumBody`]
///
/// Also the serialized form of a stadium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StadiumParams {
    /// Position of the bowl's lowest point
    pub center: LengthVector,
    /// Horizontal radius of the rim
    pub radius: Meters,
    /// Slope factor, 0 is flat and 1 is roughly 45 degrees at the rim
    pub curvature: Scalar,
    /// Friction coefficient of the surface
    pub coefficient_of_friction: Scalar,
}

impl Default for StadiumParams {
    fn default() -> Self {
        StadiumParams {
            center: LengthVector::zero(),
            radius: Meters::new(1.2),
            curvature: Scalar::new(0.10),
            coefficient_of_friction: Scalar::new(0.35),
        }
    }
}

impl StadiumParams {
    /// Check that the parameters describe a usable stadium
    pub fn validate(&self) -> Result<(), String> {
        let radius = self.radius.value();
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(format!("Stadium radius must be positive and finite, got {}", radius));
        }
        if !self.center.is_finite() {
            return Err(format!("Stadium center must be finite, got {}", self.center));
        }
        if !self.curvature.is_finite() {
            return Err(format!("Stadium curvature must be finite, got {}", self.curvature));
        }
        let cof = self.coefficient_of_friction.value();
        if !(cof >= 0.0 && cof.is_finite()) {
            return Err(format!(
                "Stadium coefficient of friction must be non-negative and finite, got {}",
                cof
            ));
        }
        Ok(())
    }
}

/// A bowl-shaped arena
///
/// # Examples
///
/// ```
/// use arena_physics::bodies::StadiumBody;
/// use arena_physics::units::{LengthVector, Meters, Scalar};
///
/// let stadium = StadiumBody::new(
///     LengthVector::zero(),
///     Meters::new(1.0),
///     Scalar::new(0.5),
///     Scalar::new(0.3),
/// );
/// assert!(stadium.is_inside(Meters::new(1.0), Meters::new(0.0)));
/// assert_eq!(stadium.surface_y(Meters::new(1.0), Meters::new(0.0)), Meters::new(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StadiumParams", into = "StadiumParams")]
pub struct StadiumBody {
    center: LengthVector,
    radius: Meters,
    curvature: Scalar,
    scaled_curvature: PerMeter,
    coefficient_of_friction: Scalar,
}

impl StadiumBody {
    /// Create a stadium
    ///
    /// # Panics
    ///
    /// Panics if the radius is not positive and finite, or any other
    /// parameter is not finite. For fallible construction, use `try_new`.
    pub fn new(center: LengthVector, radius: Meters, curvature: Scalar, coefficient_of_friction: Scalar) -> Self {
        let params = StadiumParams {
            center,
            radius,
            curvature,
            coefficient_of_friction,
        };
        match Self::try_from(params) {
            Ok(stadium) => stadium,
            Err(message) => panic!("{}", message),
        }
    }

    /// Try to create a stadium from parameters
    pub fn try_new(params: StadiumParams) -> Result<Self, String> {
        params.validate()?;
        Ok(StadiumBody {
            center: params.center,
            radius: params.radius,
            curvature: params.curvature,
            scaled_curvature: params.curvature / params.radius,
            coefficient_of_friction: params.coefficient_of_friction,
        })
    }

    /// Replace all parameters; only valid between matches
    ///
    /// On error the stadium is left unchanged.
    pub fn reconfigure(&mut self, params: StadiumParams) -> Result<(), String> {
        *self = Self::try_new(params)?;
        Ok(())
    }

    /// Current parameters
    pub fn params(&self) -> StadiumParams {
        StadiumParams {
            center: self.center,
            radius: self.radius,
            curvature: self.curvature,
            coefficient_of_friction: self.coefficient_of_friction,
        }
    }

    /// Position of the bowl's lowest point
    pub fn center(&self) -> LengthVector {
        self.center
    }

    /// Rim radius
    pub fn radius(&self) -> Meters {
        self.radius
    }

    /// Slope factor
    pub fn curvature(&self) -> Scalar {
        self.curvature
    }

    /// Curvature divided by radius
    pub fn scaled_curvature(&self) -> PerMeter {
        self.scaled_curvature
    }

    /// Friction coefficient
    pub fn coefficient_of_friction(&self) -> Scalar {
        self.coefficient_of_friction
    }

    /// True if `(x, z)` lies within the rim (boundary included)
    pub fn is_inside(&self, x: Meters, z: Meters) -> bool {
        let dx = x - self.center.x();
        let dz = z - self.center.z();
        dx * dx + dz * dz <= self.radius * self.radius
    }

    /// Surface height above the vertex at horizontal distance `r` from the center
    pub fn local_y(&self, r: Meters) -> Meters {
        self.scaled_curvature * (r * r)
    }

    /// World-space surface height at `(x, z)`
    pub fn surface_y(&self, x: Meters, z: Meters) -> Meters {
        let dx = x - self.center.x();
        let dz = z - self.center.z();
        self.scaled_curvature * (dx * dx + dz * dz) + self.center.y()
    }

    /// Unit surface normal at `(x, z)`, always pointing up
    pub fn surface_normal(&self, x: Meters, z: Meters) -> UnitVector {
        let dx = x - self.center.x();
        let dz = z - self.center.z();
        let slope_x = -2.0 * (self.scaled_curvature * dx);
        let slope_z = -2.0 * (self.scaled_curvature * dz);
        UnitVector::new(slope_x.value(), 1.0, slope_z.value())
            .normalize()
            .unwrap_or_else(UnitVector::unit_y)
    }
}

impl Default for StadiumBody {
    fn default() -> Self {
        let params = StadiumParams::default();
        StadiumBody {
            center: params.center,
            radius: params.radius,
            curvature: params.curvature,
            scaled_curvature: params.curvature / params.radius,
            coefficient_of_friction: params.coefficient_of_friction,
        }
    }
}

impl TryFrom<StadiumParams> for StadiumBody {
    type Error = String;

    fn try_from(params: StadiumParams) -> Result<Self, Self::Error> {
        StadiumBody::try_new(params)
    }
}

impl From<StadiumBody> for StadiumParams {
    fn from(stadium: StadiumBody) -> Self {
        stadium.params()
    }
}
