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
//! Rigid body of a spinning blade
//!
//! A blade is assembled from a [`Layer`], a [`Disc`] and a [`Driver`]. Its
//! live state is a center position, a linear velocity and an angular velocity
//! whose y sign encodes the spin direction (negative y spins clockwise when
//! seen from above).
//!
//! Forces never touch the live velocities directly. They are added to four
//! per-frame accumulators which [`BladeBody::apply_accumulated_changes`]
//! folds into the live state once per step, so forces acting in the same
//! frame do not depend on evaluation order. Blade-blade impacts are the one
//! exception and overwrite the velocity with [`BladeBody::set_velocity`].

use super::parts::{BladePart, Disc, Driver, Layer};
use crate::units::{
    AccelerationVector, AngularAccelerationVector, AngularMomentum, AngularVelocityVector,
    Joules, KilogramMetersPerSecond, KilogramSquareMeters, Kilograms, LengthVector, Meters,
    MetersPerSecond, MetersToTheFifth, Quantity, RadiansPerSecond, Scalar, Seconds,
    SquareMeters, UnitVector, VelocityVector, RADIAN,
};
use rand::Rng;
use std::sync::Arc;

/// Axis-aligned box enclosing a blade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: LengthVector,
    /// Maximum corner
    pub max: LengthVector,
}

impl BoundingBox {
    /// Check whether two boxes overlap (touching counts as overlapping)
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let [ax0, ay0, az0] = self.min.as_array();
        let [ax1, ay1, az1] = self.max.as_array();
        let [bx0, by0, bz0] = other.min.as_array();
        let [bx1, by1, bz1] = other.max.as_array();
        ax0 <= bx1 && bx0 <= ax1 && ay0 <= by1 && by0 <= ay1 && az0 <= bz1 && bz0 <= az1
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct LaunchState {
    center: LengthVector,
    velocity: VelocityVector,
    angular_velocity: AngularVelocityVector,
}

/// A blade assembled from three parts, with its live physical state
#[derive(Debug, Clone)]
pub struct BladeBody {
    layer: Arc<Layer>,
    disc: Arc<Disc>,
    driver: Arc<Driver>,

    mass: Kilograms,
    moment_of_inertia: KilogramSquareMeters,
    linear_drag_term: SquareMeters,
    angular_drag_term: MetersToTheFifth,

    center: LengthVector,
    velocity: VelocityVector,
    angular_velocity: AngularVelocityVector,
    launch: LaunchState,

    accumulated_velocity: VelocityVector,
    accumulated_angular_velocity: AngularVelocityVector,
    accumulated_acceleration: AccelerationVector,
    accumulated_angular_acceleration: AngularAccelerationVector,

    prev_collision: Option<Seconds>,
}

impl BladeBody {
    /// Assemble a blade at rest at the origin
    ///
    /// Parts may be shared between blades; pass an `Arc` to share, or a part
    /// value to give the blade its own copy.
    pub fn from_parts(
        layer: impl Into<Arc<Layer>>,
        disc: impl Into<Arc<Disc>>,
        driver: impl Into<Arc<Driver>>,
    ) -> Self {
        let mut blade = BladeBody {
            layer: layer.into(),
            disc: disc.into(),
            driver: driver.into(),
            mass: Kilograms::zero(),
            moment_of_inertia: KilogramSquareMeters::zero(),
            linear_drag_term: SquareMeters::zero(),
            angular_drag_term: MetersToTheFifth::zero(),
            center: LengthVector::zero(),
            velocity: VelocityVector::zero(),
            angular_velocity: AngularVelocityVector::zero(),
            launch: LaunchState::default(),
            accumulated_velocity: VelocityVector::zero(),
            accumulated_angular_velocity: AngularVelocityVector::zero(),
            accumulated_acceleration: AccelerationVector::zero(),
            accumulated_angular_acceleration: AngularAccelerationVector::zero(),
            prev_collision: None,
        };
        blade.recompute_totals();
        blade
    }

    /// Builder form of [`set_initial_launch`](Self::set_initial_launch)
    pub fn with_launch(
        mut self,
        center: LengthVector,
        velocity: VelocityVector,
        angular_velocity: AngularVelocityVector,
    ) -> Self {
        self.set_initial_launch(center, velocity, angular_velocity);
        self
    }

    /// Replace all three parts, keeping the live state
    pub fn reconfigure(
        &mut self,
        layer: impl Into<Arc<Layer>>,
        disc: impl Into<Arc<Disc>>,
        driver: impl Into<Arc<Driver>>,
    ) {
        self.layer = layer.into();
        self.disc = disc.into();
        self.driver = driver.into();
        self.recompute_totals();
    }

    fn recompute_totals(&mut self) {
        let parts: [&dyn BladePart; 3] = [&*self.layer, &*self.disc, &*self.driver];

        self.mass = parts.iter().map(|p| p.mass()).sum();
        self.moment_of_inertia = parts.iter().map(|p| p.moment_of_inertia()).sum();
        self.linear_drag_term = 0.5 * parts.iter().map(|p| p.linear_drag_area()).sum::<SquareMeters>();
        self.angular_drag_term =
            0.5 * parts.iter().map(|p| p.angular_drag_term()).sum::<MetersToTheFifth>();
    }

    /// Set the live state and remember it for [`reset_physics`](Self::reset_physics)
    pub fn set_initial_launch(
        &mut self,
        center: LengthVector,
        velocity: VelocityVector,
        angular_velocity: AngularVelocityVector,
    ) {
        self.center = center;
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
        self.launch = LaunchState {
            center,
            velocity,
            angular_velocity,
        };
    }

    /// Restore the launch state and clear accumulators and collision cooldown
    pub fn reset_physics(&mut self) {
        self.center = self.launch.center;
        self.velocity = self.launch.velocity;
        self.angular_velocity = self.launch.angular_velocity;
        self.clear_accumulators();
        self.prev_collision = None;
    }

    fn clear_accumulators(&mut self) {
        self.accumulated_velocity = VelocityVector::zero();
        self.accumulated_angular_velocity = AngularVelocityVector::zero();
        self.accumulated_acceleration = AccelerationVector::zero();
        self.accumulated_angular_acceleration = AngularAccelerationVector::zero();
    }

    /// Top part
    pub fn layer(&self) -> &Arc<Layer> {
        &self.layer
    }

    /// Middle part
    pub fn disc(&self) -> &Arc<Disc> {
        &self.disc
    }

    /// Bottom part
    pub fn driver(&self) -> &Arc<Driver> {
        &self.driver
    }

    /// Total mass of the three parts
    pub fn mass(&self) -> Kilograms {
        self.mass
    }

    /// Total moment of inertia of the three parts
    pub fn moment_of_inertia(&self) -> KilogramSquareMeters {
        self.moment_of_inertia
    }

    /// Half the summed drag areas of the parts
    pub fn linear_drag_term(&self) -> SquareMeters {
        self.linear_drag_term
    }

    /// Half the summed angular drag terms of the parts
    pub fn angular_drag_term(&self) -> MetersToTheFifth {
        self.angular_drag_term
    }

    /// Layer radius, used for blade-blade contact
    pub fn layer_radius(&self) -> Meters {
        self.layer.radius
    }

    /// Layer height, used for blade-blade contact
    pub fn layer_height(&self) -> Meters {
        self.layer.height
    }

    /// Layer coefficient of restitution
    pub fn layer_cor(&self) -> Scalar {
        self.layer.coefficient_of_restitution
    }

    /// Driver tip radius
    pub fn driver_radius(&self) -> Meters {
        self.driver.radius
    }

    /// Driver friction coefficient
    pub fn driver_cof(&self) -> Scalar {
        self.driver.coefficient_of_friction
    }

    /// Center position
    pub fn center(&self) -> LengthVector {
        self.center
    }

    /// Linear velocity
    pub fn velocity(&self) -> VelocityVector {
        self.velocity
    }

    /// Angular velocity
    pub fn angular_velocity(&self) -> AngularVelocityVector {
        self.angular_velocity
    }

    /// Magnitude of the angular velocity
    pub fn spin_rate(&self) -> RadiansPerSecond {
        self.angular_velocity.length()
    }

    /// True when the angular velocity points down (clockwise seen from above)
    pub fn is_spinning_clockwise(&self) -> bool {
        self.angular_velocity.y().value() < 0.0
    }

    /// Simulation time of the last blade-blade impact, if any
    pub fn prev_collision(&self) -> Option<Seconds> {
        self.prev_collision
    }

    /// Record the simulation time of a blade-blade impact
    pub fn set_prev_collision(&mut self, time: Seconds) {
        self.prev_collision = Some(time);
    }

    /// Pending velocity change
    pub fn accumulated_velocity(&self) -> VelocityVector {
        self.accumulated_velocity
    }

    /// Pending angular velocity change
    pub fn accumulated_angular_velocity(&self) -> AngularVelocityVector {
        self.accumulated_angular_velocity
    }

    /// Pending acceleration
    pub fn accumulated_acceleration(&self) -> AccelerationVector {
        self.accumulated_acceleration
    }

    /// Pending angular acceleration
    pub fn accumulated_angular_acceleration(&self) -> AngularAccelerationVector {
        self.accumulated_angular_acceleration
    }

    /// Spin axis as a unit vector with non-negative y
    ///
    /// Falls back to straight up when the blade is not spinning.
    pub fn normal(&self) -> UnitVector {
        match self.angular_velocity.normalize() {
            Some(axis) if axis.y().value() < 0.0 => -axis,
            Some(axis) => axis,
            None => UnitVector::unit_y(),
        }
    }

    /// Contact point at the driver tip
    ///
    /// The center displaced along the downward spin axis by the disc and
    /// driver heights.
    pub fn bottom_position(&self) -> LengthVector {
        let unit_down = -self.normal();
        self.center + unit_down * (self.disc.height + self.driver.height)
    }

    /// Translational plus rotational kinetic energy
    pub fn kinetic_energy(&self) -> Joules {
        let spin_frequency = self.spin_rate() / RADIAN;
        let translational = 0.5 * (self.mass * self.velocity.length_squared());
        let rotational = 0.5 * (self.moment_of_inertia * (spin_frequency * spin_frequency));
        translational + rotational
    }

    /// Box spanning the layer radius horizontally and from the driver tip to
    /// the layer top vertically
    pub fn bounding_box(&self) -> BoundingBox {
        let radius = self.layer.radius.value();
        let above = self.layer.height.value();
        let below = (self.disc.height + self.driver.height).value();
        BoundingBox {
            min: self.center - LengthVector::new(radius, below, radius),
            max: self.center + LengthVector::new(radius, above, radius),
        }
    }

    /// Queue an instantaneous velocity change
    pub fn accumulate_velocity(&mut self, delta: VelocityVector) {
        self.accumulated_velocity += delta;
    }

    /// Queue an instantaneous angular velocity change
    pub fn accumulate_angular_velocity(&mut self, delta: AngularVelocityVector) {
        self.accumulated_angular_velocity += delta;
    }

    /// Queue an acceleration for this frame
    pub fn accumulate_acceleration(&mut self, acceleration: AccelerationVector) {
        self.accumulated_acceleration += acceleration;
    }

    /// Queue an angular acceleration for this frame
    pub fn accumulate_angular_acceleration(&mut self, acceleration: AngularAccelerationVector) {
        self.accumulated_angular_acceleration += acceleration;
    }

    /// Queue a linear impulse along the current direction of travel
    ///
    /// A positive magnitude speeds the blade up, a negative one slows it down.
    /// A blade at rest has no direction of travel, so the impulse goes along +x.
    pub fn accumulate_impulse_magnitude(&mut self, magnitude: KilogramMetersPerSecond) {
        let speed_change: MetersPerSecond = magnitude / self.mass;
        let direction = match self.velocity.normalize() {
            Some(direction) => direction,
            None => {
                log::debug!("Blade at rest, applying impulse of {} along +x", magnitude);
                UnitVector::unit_x()
            }
        };
        self.accumulate_velocity(direction * speed_change);
    }

    /// Queue an angular impulse along the current spin axis
    ///
    /// A negative magnitude drains spin. Ignored when the blade is not
    /// spinning, since there is no axis to apply it along.
    pub fn accumulate_angular_impulse_magnitude(&mut self, magnitude: AngularMomentum) {
        let Some(axis) = self.angular_velocity.normalize() else {
            log::debug!("Blade not spinning, ignoring angular impulse of {}", magnitude);
            return;
        };
        let spin_change: RadiansPerSecond = magnitude / self.moment_of_inertia;
        self.accumulate_angular_velocity(axis * spin_change);
    }

    /// Fold all accumulators into the live velocities and clear them
    pub fn apply_accumulated_changes(&mut self, dt: Seconds) {
        self.velocity += self.accumulated_velocity + self.accumulated_acceleration * dt;
        self.angular_velocity +=
            self.accumulated_angular_velocity + self.accumulated_angular_acceleration * dt;
        self.clear_accumulators();
    }

    /// Advance the center by the current velocity
    ///
    /// Call after [`apply_accumulated_changes`](Self::apply_accumulated_changes).
    pub fn update(&mut self, dt: Seconds) {
        self.center += self.velocity * dt;
    }

    /// Move the center within the horizontal plane
    pub fn shift_horizontal(&mut self, dx: Meters, dz: Meters) {
        self.center += LengthVector::from_quantities(dx, Meters::zero(), dz);
    }

    /// Move the center vertically
    pub fn shift_vertical(&mut self, dy: Meters) {
        self.center += LengthVector::from_quantities(Meters::zero(), dy, Meters::zero());
    }

    /// Overwrite the live velocity, bypassing the accumulators
    pub fn set_velocity(&mut self, velocity: VelocityVector) {
        self.velocity = velocity;
    }

    /// Overwrite the vertical component of the live velocity
    pub fn set_vertical_velocity(&mut self, vy: MetersPerSecond) {
        self.velocity = self.velocity.with_y(vy);
    }

    /// Draw one recoil sample from the layer's distribution
    pub fn sample_recoil<R: Rng + ?Sized>(&self, rng: &mut R) -> Scalar {
        Scalar::new(self.layer.recoil.sample(rng))
    }

    /// Horizontal overlap depth of two blades' layers, if they touch
    ///
    /// The layers must overlap vertically (the top of the lower layer reaches
    /// the higher blade's center) and horizontally (the planar distance between
    /// centers is strictly less than the sum of the layer radii).
    pub fn distance_overlap(a: &BladeBody, b: &BladeBody) -> Option<Meters> {
        let (lower, higher) = if a.center.y() < b.center.y() {
            (a, b)
        } else {
            (b, a)
        };
        if lower.center.y() + lower.layer_height() < higher.center.y() {
            return None;
        }

        let planar_offset = (a.center - b.center).horizontal();
        let squared_distance = planar_offset.length_squared();
        let radii_sum = a.layer_radius() + b.layer_radius();
        if radii_sum * radii_sum - squared_distance <= Quantity::zero() {
            return None;
        }
        Some(radii_sum - squared_distance.sqrt())
    }
}

impl Default for BladeBody {
    fn default() -> Self {
        BladeBody::from_parts(Layer::default(), Disc::default(), Driver::default())
    }
}
