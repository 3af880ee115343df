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
//! Integration tests for blade-blade contact and the force model

use arena_physics::bodies::{BladeBody, StadiumBody};
use arena_physics::config::PhysicsConfig;
use arena_physics::physics::{Physics, SpinRelation};
use arena_physics::presets;
use arena_physics::units::{
    AngularVelocityVector, KilogramsPerCubicMeter, LengthVector, Meters, Seconds, VelocityVector,
};
use arena_physics::world::{BladeEvent, BladeStatus, PhysicsWorld};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn launched(body: BladeBody, center: LengthVector, velocity: VelocityVector, spin_y: f64) -> BladeBody {
    body.with_launch(center, velocity, AngularVelocityVector::new(0.0, spin_y, 0.0))
}

fn heavy() -> BladeBody {
    presets::blades()
        .into_iter()
        .find(|preset| preset.name == "Heavy")
        .unwrap()
        .build()
}

#[test]
fn test_impact_conserves_momentum_for_unequal_masses() {
    let physics = Physics::default();
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let mut a = launched(
        BladeBody::default(),
        LengthVector::new(0.0, 0.1, 0.0),
        VelocityVector::new(0.4, 0.0, 0.1),
        -400.0,
    );
    let mut b = launched(
        heavy(),
        LengthVector::new(0.045, 0.1, 0.01),
        VelocityVector::new(-0.2, 0.0, 0.0),
        -600.0,
    );
    assert!(a.mass() != b.mass());

    let overlap = BladeBody::distance_overlap(&a, &b).unwrap();
    let report = physics.accumulate_impact(&mut a, &mut b, overlap, &mut rng);

    assert_eq!(report.displacement_a, -report.displacement_b);
    let momentum = report.velocity_a * a.mass() + report.velocity_b * b.mass();
    assert!(momentum.length().value() < 1e-12, "Net momentum {}", momentum);

    // Separated and moving apart
    assert!(BladeBody::distance_overlap(&a, &b).map_or(true, |depth| depth.value() < 1e-12));
    let closing = (b.velocity() - a.velocity()).dot(b.center() - a.center());
    assert!(closing.value() > 0.0);
    assert_eq!(report.spin_relation, SpinRelation::Same);
}

#[test]
fn test_impact_is_reproducible_with_same_seed() {
    let run = |seed| {
        let physics = Physics::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut a = launched(BladeBody::default(), LengthVector::new(0.0, 0.1, 0.0), VelocityVector::new(0.3, 0.0, 0.0), -450.0);
        let mut b = launched(BladeBody::default(), LengthVector::new(0.04, 0.1, 0.0), VelocityVector::zero(), -450.0);
        physics.accumulate_impact(&mut a, &mut b, Meters::new(0.01), &mut rng)
    };
    assert_eq!(run(3), run(3));
    assert_ne!(run(3).recoil_sample, run(4).recoil_sample);
}

#[test]
fn test_touching_layers_do_not_overlap() {
    let a = launched(BladeBody::default(), LengthVector::new(0.0, 0.1, 0.0), VelocityVector::zero(), -450.0);
    let b = launched(BladeBody::default(), LengthVector::new(0.05, 0.1, 0.0), VelocityVector::zero(), -450.0);
    assert_eq!(BladeBody::distance_overlap(&a, &b), None);

    let c = launched(BladeBody::default(), LengthVector::new(0.049, 0.1, 0.0), VelocityVector::zero(), -450.0);
    let depth = BladeBody::distance_overlap(&a, &c).unwrap();
    assert!((depth.value() - 0.001).abs() < 1e-12);
}

#[test]
fn test_opposite_spin_collision_is_flagged() {
    let mut world = PhysicsWorld::with_seed(PhysicsConfig::default(), 8);
    world.add_stadium(StadiumBody::default());
    let a = world.add_blade(
        "Clockwise",
        launched(BladeBody::default(), LengthVector::new(0.0, 0.2, 0.0), VelocityVector::zero(), -450.0),
    );
    let b = world.add_blade(
        "Counter",
        launched(BladeBody::default(), LengthVector::new(0.04, 0.2, 0.0), VelocityVector::zero(), 450.0),
    );

    let report = world.update(Seconds::new(0.001));
    assert_eq!(report.collision_count(), 1);
    assert!(report
        .events
        .iter()
        .any(|event| *event == BladeEvent::OppositeSpinUnsupported { a, b }));
    let BladeEvent::Collision { report: impact, .. } = &report.events[0] else {
        panic!("Expected a collision first, got {:?}", report.events);
    };
    assert_eq!(impact.angular_recoil.value(), 0.0);
    assert_eq!(impact.linear_recoil.value(), 0.0);
}

#[test]
fn test_out_of_spin_blade_is_an_immovable_obstacle() {
    let mut world = PhysicsWorld::with_seed(PhysicsConfig::default(), 9);
    world.add_stadium(StadiumBody::default());
    let attacker = world.add_blade(
        "Attacker",
        launched(BladeBody::default(), LengthVector::new(0.2, 0.2, 0.0), VelocityVector::new(-0.5, 0.0, 0.0), -450.0),
    );
    let stopped = world.add_blade(
        "Stopped",
        launched(BladeBody::default(), LengthVector::new(0.16, 0.2, 0.0), VelocityVector::zero(), -10.0),
    );
    let bystander = world.add_blade(
        "Bystander",
        launched(BladeBody::default(), LengthVector::new(-0.5, 0.2, 0.0), VelocityVector::zero(), -450.0),
    );
    let stopped_center = world.blade(stopped).unwrap().center();

    let report = world.update(Seconds::new(0.001));
    assert_eq!(world.blade_status(stopped), Some(BladeStatus::OutOfSpin));
    assert_eq!(world.blade_status(attacker), Some(BladeStatus::Active));
    assert_eq!(world.blade_status(bystander), Some(BladeStatus::Active));
    assert_eq!(report.collision_count(), 1);

    let impact = report
        .events
        .iter()
        .find_map(|event| match event {
            BladeEvent::Collision { a, b, report } if *a == attacker && *b == stopped => Some(*report),
            _ => None,
        })
        .expect("attacker hits the stopped blade");
    assert_eq!(impact.spin_relation, SpinRelation::Stopped);
    assert!(!report
        .events
        .iter()
        .any(|event| matches!(event, BladeEvent::OppositeSpinUnsupported { .. })));

    // The attacker bounces back, the stopped blade does not move
    assert_eq!(world.blade(stopped).unwrap().center(), stopped_center);
    assert!(world.blade(attacker).unwrap().velocity().x().value() > 0.0);
    assert!(world.blade(attacker).unwrap().center().x() > Meters::new(0.2));

    world.update(Seconds::new(0.001));
    assert_eq!(world.blade(stopped).unwrap().center(), stopped_center);
}

#[test]
fn test_collision_cooldown_skips_repeat_contact() {
    let config = PhysicsConfig::default().with_collision_epsilon(Seconds::new(0.05));
    let mut world = PhysicsWorld::with_seed(config, 8);
    world.add_stadium(StadiumBody::default());
    let a = world.add_blade(
        "A",
        launched(BladeBody::default(), LengthVector::new(0.0, 0.2, 0.0), VelocityVector::zero(), -450.0),
    );
    let b = world.add_blade(
        "B",
        launched(BladeBody::default(), LengthVector::new(0.03, 0.2, 0.0), VelocityVector::zero(), -450.0),
    );

    assert_eq!(world.update(Seconds::new(0.001)).collision_count(), 1);
    assert_eq!(world.blade(a).unwrap().prev_collision(), Some(world.time()));

    // Push them back together inside the cooldown window
    let dx = world.blade(a).unwrap().center().x() - world.blade(b).unwrap().center().x() + Meters::new(0.03);
    world.blade_mut(b).unwrap().shift_horizontal(dx, Meters::zero());
    assert!(BladeBody::distance_overlap(world.blade(a).unwrap(), world.blade(b).unwrap()).is_some());
    assert_eq!(world.update(Seconds::new(0.001)).collision_count(), 0);
}

#[test]
fn test_air_drag_always_decelerates() {
    let physics = Physics::default();
    let velocities = [
        VelocityVector::new(1.0, 0.0, 0.0),
        VelocityVector::new(-0.3, 0.2, 0.7),
        VelocityVector::new(0.0, -2.0, 0.0),
    ];
    for velocity in velocities {
        let mut blade = launched(BladeBody::default(), LengthVector::zero(), velocity, 300.0);
        physics.accumulate_air_resistance(&mut blade, KilogramsPerCubicMeter::new(1.2));
        assert!(blade.accumulated_acceleration().dot(velocity).value() <= 0.0);
        assert!(blade
            .accumulated_angular_acceleration()
            .dot(blade.angular_velocity())
            .value()
            <= 0.0);
    }

    let mut still = BladeBody::default();
    physics.accumulate_air_resistance(&mut still, KilogramsPerCubicMeter::new(1.2));
    assert!(still.accumulated_acceleration().is_finite());
    assert_eq!(still.accumulated_acceleration().length().value(), 0.0);
}

#[test]
fn test_applying_empty_accumulators_changes_nothing() {
    let mut blade = launched(
        BladeBody::default(),
        LengthVector::new(0.1, 0.2, 0.3),
        VelocityVector::new(0.4, -0.1, 0.2),
        -450.0,
    );
    let velocity = blade.velocity();
    let spin = blade.angular_velocity();
    blade.apply_accumulated_changes(Seconds::new(0.01));
    assert_eq!(blade.velocity(), velocity);
    assert_eq!(blade.angular_velocity(), spin);
}
