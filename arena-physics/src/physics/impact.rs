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
//! Blade-blade impact resolution

use super::{separation_axis, Physics};
use crate::bodies::BladeBody;
use crate::units::{
    AngularMomentum, KilogramMetersPerSecond, Kilograms, LengthVector, Meters, MetersPerSecond,
    RadiansPerSecond, Scalar, VelocityVector,
};
use rand::Rng;
use std::fmt;

/// Relative spin direction of two colliding blades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinRelation {
    /// Both blades spin the same way; the recoil model applies
    Same,
    /// The blades spin in opposite directions; only the elastic impulse
    /// is applied since no recoil model exists for this case
    Opposite,
    /// The second blade has stopped spinning and acts as an immovable
    /// obstacle; only the first blade bounces off it
    Stopped,
}

impl fmt::Display for SpinRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinRelation::Same => write!(f, "same-spin"),
            SpinRelation::Opposite => write!(f, "opposite-spin"),
            SpinRelation::Stopped => write!(f, "stopped-obstacle"),
        }
    }
}

/// What [`Physics::accumulate_impact`] did to a pair of blades
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactReport {
    /// Displacement applied to the first blade to resolve penetration
    pub displacement_a: LengthVector,
    /// Displacement applied to the second blade, the negation of
    /// `displacement_a` unless the second blade is an obstacle
    pub displacement_b: LengthVector,
    /// Magnitude of the elastic impulse along the separation axis
    pub impulse: KilogramMetersPerSecond,
    /// Velocity assigned to the first blade by the elastic impulse
    pub velocity_a: VelocityVector,
    /// Velocity assigned to the second blade by the elastic impulse, zero
    /// for an obstacle
    pub velocity_b: VelocityVector,
    /// Sum of both blades' recoil samples
    pub recoil_sample: Scalar,
    /// Spin drained from each blade (zero for opposite spins)
    pub angular_recoil: AngularMomentum,
    /// Recoil push given to each blade (zero for opposite spins)
    pub linear_recoil: KilogramMetersPerSecond,
    /// Whether the blades spun the same way
    pub spin_relation: SpinRelation,
}

impl Physics {
    /// Resolve a collision between two overlapping blades
    ///
    /// 1. Both centers move apart horizontally by half of `contact_distance`.
    /// 2. An elastic impulse `J = cor * |v_rel . n| * m_a * m_b / (m_a + m_b)`
    ///    along the separation axis `n` *replaces* both velocities:
    ///    `v_a = -J / m_a * n` and `v_b = J / m_b * n`. This bypasses the
    ///    accumulators because the change is instantaneous, and the blades
    ///    always leave moving apart with zero net momentum.
    /// 3. Each blade draws a recoil sample. For same-spin collisions the
    ///    combined sample `R`, relative normal speed `v` and combined spin `w`
    ///    give a spin drain `ka * R * sqrt(v) * sqrt(w)` and a recoil push
    ///    `kl * R * sqrt(v) * sqrt(w) * boost(w)`, both queued on the
    ///    accumulators. `boost` ramps from 1 at the configured onset spin to 2
    ///    at the saturation spin.
    ///
    /// Opposite-spin collisions only get steps 1 and 2 and are reported as
    /// [`SpinRelation::Opposite`].
    pub fn accumulate_impact<R: Rng + ?Sized>(
        &self,
        a: &mut BladeBody,
        b: &mut BladeBody,
        contact_distance: Meters,
        rng: &mut R,
    ) -> ImpactReport {
        let axis = separation_axis(a, b);

        let displacement_b: LengthVector = axis * (0.5 * contact_distance);
        let displacement_a = -displacement_b;
        a.shift_horizontal(displacement_a.x(), displacement_a.z());
        b.shift_horizontal(displacement_b.x(), displacement_b.z());

        let relative_speed: MetersPerSecond = (b.velocity() - a.velocity()).proj(axis);
        let average_cor = (a.layer_cor() + b.layer_cor()) / 2.0;
        let reduced_mass: Kilograms = a.mass() * b.mass() / (a.mass() + b.mass());
        let impulse: KilogramMetersPerSecond = average_cor * relative_speed.abs() * reduced_mass;

        let velocity_a: VelocityVector = -axis * (impulse / a.mass());
        let velocity_b: VelocityVector = axis * (impulse / b.mass());
        a.set_velocity(velocity_a);
        b.set_velocity(velocity_b);

        let recoil_sample = a.sample_recoil(rng) + b.sample_recoil(rng);

        let same_spin = a.is_spinning_clockwise() == b.is_spinning_clockwise();
        let (spin_relation, angular_recoil, linear_recoil) = if same_spin {
            let combined_spin = a.spin_rate() + b.spin_rate();
            let (angular, linear) = self.recoil_impulses(recoil_sample, relative_speed.abs(), combined_spin);

            a.accumulate_angular_impulse_magnitude(-angular);
            b.accumulate_angular_impulse_magnitude(-angular);
            a.accumulate_impulse_magnitude(linear);
            b.accumulate_impulse_magnitude(linear);

            (SpinRelation::Same, angular, linear)
        } else {
            log::warn!("Opposite-spin collision has no recoil model, applied elastic impulse only");
            (
                SpinRelation::Opposite,
                AngularMomentum::zero(),
                KilogramMetersPerSecond::zero(),
            )
        };

        log::debug!(
            "Impact: {} impulse {}, spin drain {}, recoil push {}",
            spin_relation,
            impulse,
            angular_recoil,
            linear_recoil
        );

        ImpactReport {
            displacement_a,
            displacement_b,
            impulse,
            velocity_a,
            velocity_b,
            recoil_sample,
            angular_recoil,
            linear_recoil,
            spin_relation,
        }
    }

    /// Bounce a moving blade off a blade that has stopped spinning
    ///
    /// The obstacle is treated as infinitely heavy: it keeps its position
    /// and the moving blade is pushed out by the whole `contact_distance`.
    /// The moving blade leaves along the separation axis with
    /// `cor * |v . n|`, the limit of [`Physics::accumulate_impact`] as the
    /// obstacle mass grows. No recoil is drawn.
    pub fn accumulate_obstacle_impact(
        &self,
        blade: &mut BladeBody,
        obstacle: &BladeBody,
        contact_distance: Meters,
    ) -> ImpactReport {
        let axis = separation_axis(blade, obstacle);

        let displacement_a: LengthVector = -axis * contact_distance;
        blade.shift_horizontal(displacement_a.x(), displacement_a.z());

        let approach_speed: MetersPerSecond = blade.velocity().proj(axis);
        let bounce_speed = blade.layer_cor() * approach_speed.abs();
        let velocity_a: VelocityVector = -axis * bounce_speed;
        blade.set_velocity(velocity_a);
        let impulse: KilogramMetersPerSecond = blade.mass() * bounce_speed;

        log::debug!("Impact with stopped blade: impulse {}", impulse);

        ImpactReport {
            displacement_a,
            displacement_b: LengthVector::zero(),
            impulse,
            velocity_a,
            velocity_b: VelocityVector::zero(),
            recoil_sample: Scalar::zero(),
            angular_recoil: AngularMomentum::zero(),
            linear_recoil: KilogramMetersPerSecond::zero(),
            spin_relation: SpinRelation::Stopped,
        }
    }

    /// Spin drain and recoil push of a same-spin collision
    pub fn recoil_impulses(
        &self,
        recoil_sample: Scalar,
        normal_speed: MetersPerSecond,
        combined_spin: RadiansPerSecond,
    ) -> (AngularMomentum, KilogramMetersPerSecond) {
        let config = self.config();
        let speed_factor = (normal_speed / MetersPerSecond::new(1.0)).sqrt();
        let spin_factor = (combined_spin / RadiansPerSecond::new(1.0)).sqrt();
        let strength = recoil_sample * speed_factor * spin_factor;

        let ramp = (combined_spin - config.recoil_boost_onset)
            / (config.recoil_boost_saturation - config.recoil_boost_onset);
        let boost = 1.0 + ramp.value().clamp(0.0, 1.0);

        let angular: AngularMomentum = config.recoil_angular_constant * strength;
        let linear: KilogramMetersPerSecond = config.recoil_linear_constant * strength * boost;
        (angular, linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::AngularVelocityVector;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn blade(center: LengthVector, velocity: VelocityVector, spin_y: f64) -> BladeBody {
        BladeBody::default().with_launch(center, velocity, AngularVelocityVector::new(0.0, spin_y, 0.0))
    }

    fn approaching_pair(spin_a: f64, spin_b: f64) -> (BladeBody, BladeBody) {
        (
            blade(LengthVector::new(0.0, 1.0, 0.02), VelocityVector::new(0.0, 0.0, -0.1), spin_a),
            blade(LengthVector::new(0.0, 1.0, -0.02), VelocityVector::new(0.0, 0.0, 0.1), spin_b),
        )
    }

    #[test]
    fn test_displacements_are_symmetric() {
        let physics = Physics::default();
        let (mut a, mut b) = approaching_pair(-450.0, -450.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = physics.accumulate_impact(&mut a, &mut b, Meters::new(0.01), &mut rng);
        assert_eq!(report.displacement_a, -report.displacement_b);
        assert!((report.displacement_b.length().value() - 0.005).abs() < 1e-12);
        assert!((a.center().z().value() - 0.025).abs() < 1e-12);
        assert!((b.center().z().value() + 0.025).abs() < 1e-12);
        assert_eq!(a.center().y(), Meters::new(1.0));
    }

    #[test]
    fn test_elastic_impulse_conserves_momentum_and_separates() {
        let physics = Physics::default();
        let heavy_disc = crate::bodies::Disc {
            mass: Kilograms::new(0.045),
            ..Default::default()
        };
        let mut a = BladeBody::from_parts(
            crate::bodies::Layer::default(),
            heavy_disc,
            crate::bodies::Driver::default(),
        )
        .with_launch(
            LengthVector::new(0.01, 1.0, 0.015),
            VelocityVector::new(0.05, 0.0, -0.2),
            AngularVelocityVector::new(0.0, 300.0, 0.0),
        );
        let mut b = blade(LengthVector::new(-0.01, 1.0, -0.015), VelocityVector::new(0.0, 0.0, 0.3), -200.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let report = physics.accumulate_impact(&mut a, &mut b, Meters::new(0.02), &mut rng);

        let momentum = a.mass() * report.velocity_a + b.mass() * report.velocity_b;
        assert!(momentum.length().value() < 1e-15, "Net momentum {}", momentum);

        // Velocities are assigned, not accumulated
        assert_eq!(a.velocity(), report.velocity_a);
        assert_eq!(b.velocity(), report.velocity_b);

        // The blades move apart along the center-to-center axis
        let axis = (b.center() - a.center()).horizontal().normalize().unwrap();
        assert!((b.velocity() - a.velocity()).proj(axis).value() > 0.0);
        assert_eq!(report.spin_relation, SpinRelation::Opposite);
        assert_eq!(a.accumulated_velocity(), VelocityVector::zero());
    }

    #[test]
    fn test_impulse_magnitude() {
        let physics = Physics::default();
        let (mut a, mut b) = approaching_pair(-450.0, -450.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let report = physics.accumulate_impact(&mut a, &mut b, Meters::new(0.01), &mut rng);
        // Equal masses: J = cor * |v_rel| * m / 2
        let expected = 0.8 * 0.2 * 0.054 / 2.0;
        assert!((report.impulse.value() - expected).abs() < 1e-12);
        assert!((a.velocity().z().value() - 0.08).abs() < 1e-12);
        assert!((b.velocity().z().value() + 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_same_spin_recoil_drains_spin_and_pushes_apart() {
        let physics = Physics::default();
        let (mut a, mut b) = approaching_pair(-450.0, -450.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let report = physics.accumulate_impact(&mut a, &mut b, Meters::new(0.01), &mut rng);
        assert_eq!(report.spin_relation, SpinRelation::Same);
        assert!(report.recoil_sample.value() > 0.0);
        assert!(report.angular_recoil.value() > 0.0);
        assert!(report.linear_recoil.value() > 0.0);

        let spin_before = a.spin_rate();
        let speed_before = a.velocity().length();
        a.apply_accumulated_changes(crate::units::Seconds::new(0.0));
        b.apply_accumulated_changes(crate::units::Seconds::new(0.0));
        assert!(a.spin_rate() < spin_before);
        assert!(a.velocity().length() > speed_before);
        assert!(a.velocity().z().value() > 0.0);
        assert!(b.velocity().z().value() < 0.0);
    }

    #[test]
    fn test_opposite_spin_has_no_recoil() {
        let physics = Physics::default();
        let (mut a, mut b) = approaching_pair(-450.0, 450.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let report = physics.accumulate_impact(&mut a, &mut b, Meters::new(0.01), &mut rng);
        assert_eq!(report.spin_relation, SpinRelation::Opposite);
        assert_eq!(report.angular_recoil, AngularMomentum::zero());
        assert_eq!(a.accumulated_angular_velocity(), AngularVelocityVector::zero());
        assert_eq!(b.accumulated_velocity(), VelocityVector::zero());
    }

    #[test]
    fn test_head_on_at_rest_stays_finite() {
        let physics = Physics::default();
        let mut a = blade(LengthVector::new(0.0, 1.0, 0.0), VelocityVector::zero(), -450.0);
        let mut b = blade(LengthVector::new(0.0, 1.0, 0.0), VelocityVector::zero(), -450.0);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let report = physics.accumulate_impact(&mut a, &mut b, Meters::new(0.05), &mut rng);
        assert_eq!(report.impulse.value(), 0.0);
        assert!(a.center().is_finite() && b.center().is_finite());
        assert!((b.center().x() - a.center().x()).value() > 0.0);

        a.apply_accumulated_changes(crate::units::Seconds::new(0.016));
        b.apply_accumulated_changes(crate::units::Seconds::new(0.016));
        assert!(a.velocity().is_finite() && a.angular_velocity().is_finite());
        assert!(b.velocity().is_finite() && b.angular_velocity().is_finite());
    }

    #[test]
    fn test_obstacle_bounce_leaves_obstacle_in_place() {
        let physics = Physics::default();
        let mut moving = blade(LengthVector::new(0.0, 1.0, 0.04), VelocityVector::new(0.0, 0.0, -0.5), -450.0);
        let stopped = blade(LengthVector::new(0.0, 1.0, 0.0), VelocityVector::zero(), -10.0);

        let report = physics.accumulate_obstacle_impact(&mut moving, &stopped, Meters::new(0.01));
        assert_eq!(report.spin_relation, SpinRelation::Stopped);
        assert_eq!(report.displacement_b, LengthVector::zero());
        assert!((moving.center().z().value() - 0.05).abs() < 1e-12);
        assert!((moving.velocity().z().value() - 0.8 * 0.5).abs() < 1e-12);
        assert_eq!(moving.velocity(), report.velocity_a);
        assert!((report.impulse.value() - 0.054 * 0.4).abs() < 1e-12);
        assert_eq!(moving.accumulated_angular_velocity(), AngularVelocityVector::zero());
    }

    #[test]
    fn test_recoil_boost() {
        let physics = Physics::default();
        let sample = Scalar::new(2.0);
        let speed = MetersPerSecond::new(0.25);

        let (angular_low, linear_low) = physics.recoil_impulses(sample, speed, RadiansPerSecond::new(25.0));
        let (_, linear_high) = physics.recoil_impulses(sample, speed, RadiansPerSecond::new(1600.0));

        let strength_low = 2.0 * 0.5 * 5.0;
        assert!((angular_low.value() - 1.5e-5 * strength_low).abs() < 1e-15);
        assert!((linear_low.value() - 2.5e-4 * strength_low).abs() < 1e-15);

        let strength_high = 2.0 * 0.5 * 40.0;
        assert!((linear_high.value() - 2.5e-4 * strength_high * 2.0).abs() < 1e-12);
    }
}
