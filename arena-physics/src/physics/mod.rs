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
//! Force model of the arena
//!
//! [`Physics`] evaluates the forces acting on blades and queues them on the
//! blades' accumulators. It holds only constants, so the same instance can
//! be used for every blade and stadium of a step.
//!
//! # Forces
//!
//! - **Air resistance**: quadratic drag on both linear and angular velocity
//! - **Gravity**: only while the blade is airborne
//! - **Friction**: converts spin into linear motion at the driver tip and
//!   drains spin in return
//! - **Slope**: pulls a tilted blade down the bowl toward the center
//! - **Impact**: blade-blade collision, see [`Physics::accumulate_impact`]
//!
//! Every term that needs a direction skips itself for the frame when that
//! direction is undefined (a blade at rest, a blade without spin), so no
//! term ever produces NaN.

mod impact;

pub use impact::{ImpactReport, SpinRelation};

use crate::bodies::{BladeBody, StadiumBody};
use crate::config::PhysicsConfig;
use crate::units::{
    AccelerationVector, KilogramsPerCubicMeter, Meters, MetersPerSecond, MetersPerSecondSquared,
    RadiansPerSecondSquared, Scalar, UnitVector, RADIAN,
};

/// Linear acceleration below which friction falls back to a minimal push
const MIN_FRICTION_ACCELERATION: f64 = 0.001;

/// Evaluates forces using the constants of a [`PhysicsConfig`]
#[derive(Debug, Clone, Default)]
pub struct Physics {
    config: PhysicsConfig,
}

impl Physics {
    /// Create a force model with the given constants
    pub fn new(config: PhysicsConfig) -> Self {
        Physics { config }
    }

    /// Constants in use
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Gravitational acceleration as a vector along -y
    pub fn gravity_vector(&self) -> AccelerationVector {
        AccelerationVector::from_quantities(
            MetersPerSecondSquared::zero(),
            -self.config.gravity,
            MetersPerSecondSquared::zero(),
        )
    }

    /// Average of the stadium's and the driver's friction coefficients
    pub fn combined_friction(blade: &BladeBody, stadium: &StadiumBody) -> Scalar {
        (stadium.coefficient_of_friction() + blade.driver_cof()) / 2.0
    }

    /// Queue quadratic air drag on linear and angular velocity
    ///
    /// The linear term is `-rho * drag_term * |v|^2 / m` along the direction
    /// of travel, the angular term `-rho * angular_drag_term * |w|^2 / I`
    /// along the spin axis. Each term is skipped while its velocity is zero.
    pub fn accumulate_air_resistance(&self, blade: &mut BladeBody, air_density: KilogramsPerCubicMeter) {
        if let Some(direction) = blade.velocity().normalize() {
            let drag_constant = air_density * blade.linear_drag_term();
            let magnitude: MetersPerSecondSquared =
                drag_constant * blade.velocity().length_squared() / blade.mass();
            blade.accumulate_acceleration(-direction * magnitude);
        }

        if let Some(axis) = blade.angular_velocity().normalize() {
            let drag_constant = air_density * blade.angular_drag_term();
            let spin_frequency = blade.spin_rate() / RADIAN;
            let magnitude: RadiansPerSecondSquared = drag_constant * (spin_frequency * spin_frequency)
                / blade.moment_of_inertia()
                * RADIAN;
            blade.accumulate_angular_acceleration(-axis * magnitude);
        }
    }

    /// Queue gravity
    pub fn accumulate_gravity(&self, blade: &mut BladeBody) {
        blade.accumulate_acceleration(self.gravity_vector());
    }

    /// Queue the friction between the driver tip and the stadium surface
    ///
    /// The linear part acts along `spin_axis x surface_normal` with magnitude
    /// `ca * g * mu * cos(theta) + cv * |w| * r * mu * sign(cos(theta))`,
    /// where `theta` is the angle between spin axis and surface normal. When
    /// the result is negligible a minimal push along +x is used instead, so a
    /// perfectly upright blade still drifts. The angular part drains spin by
    /// `|a| * m * r / I`. Skipped when the blade does not spin.
    pub fn accumulate_friction(&self, blade: &mut BladeBody, stadium: &StadiumBody) {
        let Some(spin_axis) = blade.angular_velocity().normalize() else {
            log::debug!("Skipping friction on a blade without spin");
            return;
        };

        let bottom = blade.bottom_position();
        let stadium_normal = stadium.surface_normal(bottom.x(), bottom.z());
        let combined_cof = Self::combined_friction(blade, stadium);

        let direction = spin_axis.cross(stadium_normal);
        let alignment = spin_axis.dot(stadium_normal);
        let alignment_sign: f64 = if alignment.value() > 0.0 { 1.0 } else { -1.0 };

        let traditional: MetersPerSecondSquared =
            self.config.frictional_acceleration_constant * (self.config.gravity * combined_cof * alignment);
        let spin_dependent: MetersPerSecondSquared = self.config.frictional_velocity_constant
            * blade.spin_rate()
            * blade.driver_radius()
            * combined_cof
            * alignment_sign;

        let mut linear = direction * (traditional + spin_dependent);
        if linear.length().value() < MIN_FRICTION_ACCELERATION {
            linear = AccelerationVector::new(MIN_FRICTION_ACCELERATION, 0.0, 0.0);
        }

        let spin_loss = linear.length() * blade.mass() * blade.driver_radius() / blade.moment_of_inertia();
        let angular = -spin_axis * (spin_loss * RADIAN);

        blade.accumulate_acceleration(linear * self.config.frictional_efficiency);
        blade.accumulate_angular_acceleration(angular);
    }

    /// Queue the pull down the bowl on a blade tilted against the surface
    ///
    /// Magnitude `g * sin(angle between normals) * mu`, directed horizontally
    /// from the contact point toward the stadium center. Skipped when the
    /// normals are parallel or when the contact point sits on the stadium's
    /// vertical axis.
    pub fn accumulate_slope(&self, blade: &mut BladeBody, stadium: &StadiumBody) {
        let bottom = blade.bottom_position();
        let blade_normal = blade.normal();
        let stadium_normal = stadium.surface_normal(bottom.x(), bottom.z());

        let sin_angle = stadium_normal.cross(blade_normal).length();
        if sin_angle.value() <= f64::EPSILON {
            return;
        }

        let Some(toward_center) = (stadium.center() - bottom).horizontal().normalize() else {
            return;
        };

        let combined_cof = Self::combined_friction(blade, stadium);
        let magnitude: MetersPerSecondSquared = self.config.gravity * sin_angle * combined_cof;
        blade.accumulate_acceleration(toward_center * magnitude);
    }

    /// Push a blade whose contact point sank below the surface back onto it
    ///
    /// Zeroes the vertical velocity when a correction is applied. Returns the
    /// correction depth, or `None` when the blade was not clipping.
    pub fn prevent_stadium_clipping(&self, blade: &mut BladeBody, stadium: &StadiumBody) -> Option<Meters> {
        let bottom = blade.bottom_position();
        let surface_y = stadium.surface_y(bottom.x(), bottom.z());
        if surface_y > bottom.y() {
            let depth = surface_y - bottom.y();
            blade.shift_vertical(depth);
            blade.set_vertical_velocity(MetersPerSecond::zero());
            Some(depth)
        } else {
            None
        }
    }
}

/// Horizontal unit axis from `from` to `to`, or +x when they share a vertical line
pub(crate) fn separation_axis(from: &BladeBody, to: &BladeBody) -> UnitVector {
    match (to.center() - from.center()).horizontal().normalize() {
        Some(axis) => axis,
        None => {
            log::debug!("Coincident blade centers, separating along +x");
            UnitVector::unit_x()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{AngularVelocityVector, LengthVector, VelocityVector};

    fn blade_at(center: LengthVector, velocity: VelocityVector, spin: AngularVelocityVector) -> BladeBody {
        BladeBody::default().with_launch(center, velocity, spin)
    }

    #[test]
    fn test_air_resistance_opposes_motion() {
        let physics = Physics::default();
        let velocities = [
            VelocityVector::new(1.0, 0.0, 0.0),
            VelocityVector::new(-0.3, 0.2, 0.7),
            VelocityVector::new(0.0, -2.0, 0.1),
        ];
        let spins = [
            AngularVelocityVector::new(0.0, -450.0, 0.0),
            AngularVelocityVector::new(10.0, 300.0, -5.0),
            AngularVelocityVector::new(0.0, 31.0, 0.0),
        ];

        for (velocity, spin) in velocities.into_iter().zip(spins) {
            let mut blade = blade_at(LengthVector::zero(), velocity, spin);
            physics.accumulate_air_resistance(&mut blade, KilogramsPerCubicMeter::new(0.8));
            assert!(blade.accumulated_acceleration().dot(velocity).value() <= 0.0);
            assert!(blade.accumulated_angular_acceleration().dot(spin).value() <= 0.0);
            assert!(blade.accumulated_acceleration().length().value() > 0.0);
        }
    }

    #[test]
    fn test_air_resistance_magnitude() {
        let physics = Physics::default();
        let mut blade = blade_at(
            LengthVector::zero(),
            VelocityVector::new(2.0, 0.0, 0.0),
            AngularVelocityVector::zero(),
        );
        physics.accumulate_air_resistance(&mut blade, KilogramsPerCubicMeter::new(0.8));
        let expected = 0.8 * blade.linear_drag_term().value() * 4.0 / blade.mass().value();
        let actual = blade.accumulated_acceleration();
        assert!((actual.x().value() + expected).abs() < 1e-12);
        assert_eq!(blade.accumulated_angular_acceleration(), Default::default());
    }

    #[test]
    fn test_air_resistance_at_rest_is_finite() {
        let physics = Physics::default();
        let mut blade = BladeBody::default();
        physics.accumulate_air_resistance(&mut blade, KilogramsPerCubicMeter::new(0.8));
        assert!(blade.accumulated_acceleration().is_finite());
        assert_eq!(blade.accumulated_acceleration(), AccelerationVector::zero());
    }

    #[test]
    fn test_gravity_vector() {
        let physics = Physics::default();
        let mut blade = BladeBody::default();
        physics.accumulate_gravity(&mut blade);
        assert_eq!(blade.accumulated_acceleration(), AccelerationVector::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_friction_on_upright_blade_uses_minimal_push() {
        let physics = Physics::default();
        let stadium = StadiumBody::default();
        let mut blade = blade_at(
            LengthVector::new(0.0, 0.025, 0.0),
            VelocityVector::zero(),
            AngularVelocityVector::new(0.0, -450.0, 0.0),
        );
        physics.accumulate_friction(&mut blade, &stadium);

        let linear = blade.accumulated_acceleration();
        assert!((linear.x().value() - 0.001 * 0.5).abs() < 1e-15);

        // Spin drains along the spin axis
        let angular = blade.accumulated_angular_acceleration();
        assert!(angular.y().value() > 0.0);
        assert!(angular.dot(blade.angular_velocity()).value() < 0.0);
    }

    #[test]
    fn test_friction_on_slope_moves_blade_sideways() {
        let physics = Physics::default();
        let stadium = StadiumBody::default();
        let mut blade = blade_at(
            LengthVector::new(0.5, 0.1, 0.0),
            VelocityVector::zero(),
            AngularVelocityVector::new(0.0, -450.0, 0.0),
        );
        physics.accumulate_friction(&mut blade, &stadium);

        let linear = blade.accumulated_acceleration();
        // Surface tilts about z at x = 0.5, so friction acts along z
        assert!(linear.z().value().abs() > 0.001);
        assert!(linear.x().value().abs() < 1e-12);
        assert!(linear.is_finite());
        assert!(blade.accumulated_angular_acceleration().dot(blade.angular_velocity()).value() < 0.0);
    }

    #[test]
    fn test_friction_without_spin_is_skipped() {
        let physics = Physics::default();
        let mut blade = BladeBody::default();
        physics.accumulate_friction(&mut blade, &StadiumBody::default());
        assert_eq!(blade.accumulated_acceleration(), AccelerationVector::zero());
    }

    #[test]
    fn test_slope_points_toward_center() {
        let physics = Physics::default();
        let stadium = StadiumBody::default();
        let mut blade = blade_at(
            LengthVector::new(0.6, 0.1, 0.0),
            VelocityVector::zero(),
            AngularVelocityVector::new(0.0, -450.0, 0.0),
        );
        physics.accumulate_slope(&mut blade, &stadium);

        let a = blade.accumulated_acceleration();
        assert!(a.x().value() < 0.0);
        assert_eq!(a.y().value(), 0.0);

        let bottom = blade.bottom_position();
        let normal = stadium.surface_normal(bottom.x(), bottom.z());
        let sin_angle = normal.cross(UnitVector::unit_y()).length().value();
        let expected = 9.81 * sin_angle * (0.35 + 0.22) / 2.0;
        assert!((a.length().value() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_slope_skipped_when_aligned_or_centered() {
        let physics = Physics::default();
        let stadium = StadiumBody::default();

        let mut centered = blade_at(
            LengthVector::new(0.0, 0.025, 0.0),
            VelocityVector::zero(),
            AngularVelocityVector::new(0.0, -450.0, 0.0),
        );
        physics.accumulate_slope(&mut centered, &stadium);
        assert_eq!(centered.accumulated_acceleration(), AccelerationVector::zero());
    }

    #[test]
    fn test_clipping_correction() {
        let physics = Physics::default();
        let stadium = StadiumBody::default();
        let mut blade = blade_at(
            LengthVector::new(0.0, 0.0, 0.0),
            VelocityVector::new(0.1, -0.5, 0.0),
            AngularVelocityVector::new(0.0, -450.0, 0.0),
        );

        let depth = physics.prevent_stadium_clipping(&mut blade, &stadium).unwrap();
        assert!((depth.value() - 0.025).abs() < 1e-12);
        assert!(blade.bottom_position().y().value().abs() < 1e-12);
        assert_eq!(blade.velocity(), VelocityVector::new(0.1, 0.0, 0.0));

        // Resting exactly on the surface needs no correction
        assert!(physics.prevent_stadium_clipping(&mut blade, &stadium).is_none());
        assert_eq!(blade.velocity(), VelocityVector::new(0.1, 0.0, 0.0));
    }
}
