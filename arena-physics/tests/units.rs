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
//! Dimensional analysis across the public API

use arena_physics::bodies::BladeBody;
use arena_physics::units::{
    centimeters, grams, AngularMomentum, AngularVelocityVector, Joules, KilogramMetersPerSecond,
    Kilograms, LengthVector, Meters, MetersPerSecond, Newtons, RadiansPerSecond, Seconds,
    VelocityVector, RADIAN,
};

#[test]
fn test_derived_units_compose() {
    let mass = grams(54.0);
    let speed = MetersPerSecond::new(2.0);
    let momentum: KilogramMetersPerSecond = mass * speed;
    let force: Newtons = momentum / Seconds::new(0.5);
    let energy: Joules = force * centimeters(10.0);

    assert!((momentum.value() - 0.108).abs() < 1e-12);
    assert!((force.value() - 0.216).abs() < 1e-12);
    assert!((energy.value() - 0.0216).abs() < 1e-12);
    assert_eq!(format!("{}", Newtons::new(1.5)), "1.5 kg·m·s^-2");
}

#[test]
fn test_blade_energy_and_spin_units() {
    let blade = BladeBody::default().with_launch(
        LengthVector::zero(),
        VelocityVector::new(0.3, 0.0, 0.4),
        AngularVelocityVector::new(0.0, -200.0, 0.0),
    );
    let spin: RadiansPerSecond = blade.spin_rate();
    let angular_momentum: AngularMomentum = blade.moment_of_inertia() * spin;
    assert!((angular_momentum.value() - blade.moment_of_inertia().value() * 200.0).abs() < 1e-15);

    // Energy needs the angle stripped off the spin rate
    let frequency = spin / RADIAN;
    let rotational: Joules = 0.5 * (blade.moment_of_inertia() * (frequency * frequency));
    let translational: Joules = 0.5 * (blade.mass() * blade.velocity().length_squared());
    let total = blade.kinetic_energy();
    assert!((total - rotational - translational).abs().value() < 1e-15);
    assert!((blade.velocity().length() - MetersPerSecond::new(0.5)).abs().value() < 1e-15);
}

#[test]
fn test_length_vector_geometry() {
    let a = LengthVector::new(0.1, 0.5, 0.0);
    let b = LengthVector::new(0.4, -0.2, 0.4);
    let planar: Meters = (b - a).horizontal().length();
    assert!((planar.value() - 0.5).abs() < 1e-12);
    assert_eq!((b - a).horizontal().y(), Meters::zero());

    let mass_sum: Kilograms = [grams(22.0), grams(27.0), grams(5.0)].into_iter().sum();
    assert!((mass_sum.value() - 0.054).abs() < 1e-12);
}
