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
//! Two preset blades battling in the standard stadium
//!
//! Prints every collision and terminal event, then the winner. Pass a seed as
//! the first argument to replay a match; `ARENA_PHYSICS_*` environment
//! variables override the physics constants.

use arena_physics::bodies::StadiumBody;
use arena_physics::config::PhysicsConfig;
use arena_physics::presets;
use arena_physics::units::{AngularVelocityVector, LengthVector, Seconds, VelocityVector};
use arena_physics::world::{BladeEvent, PhysicsWorld};

fn main() {
    println!("Arena Physics - Match Demo");
    println!("==========================\n");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let config = match PhysicsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring environment overrides: {}", e);
            PhysicsConfig::default()
        }
    };

    let mut world = PhysicsWorld::with_seed(config, seed);
    world.add_stadium(StadiumBody::default());

    let catalogue = presets::blades();
    let launches = [
        (&catalogue[0], LengthVector::new(0.0, 0.1, 0.3), VelocityVector::new(0.05, 0.0, -0.4)),
        (&catalogue[4], LengthVector::new(0.0, 0.1, -0.3), VelocityVector::new(-0.05, 0.0, 0.4)),
    ];
    for (preset, center, velocity) in launches {
        let blade = preset
            .build()
            .with_launch(center, velocity, AngularVelocityVector::new(0.0, -500.0, 0.0));
        println!("Launching {} ({:.3} kg) from {}", preset.name, blade.mass().value(), center);
        world.add_blade(preset.name.clone(), blade);
    }
    println!("Seed: {}\n", seed);

    let dt = Seconds::new(0.005);
    let max_steps = 20_000;
    for _ in 0..max_steps {
        let report = world.update(dt);
        for event in &report.events {
            match event {
                BladeEvent::Collision { a, b, report: impact } => println!(
                    "[{:7.3}] {} hit {} (impulse {:.5})",
                    report.time.value(),
                    world.blade_name(*a).unwrap_or("?"),
                    world.blade_name(*b).unwrap_or("?"),
                    impact.impulse.value()
                ),
                other => println!("[{:7.3}] {}", report.time.value(), other),
            }
        }

        if report.outcome.is_finished() {
            match report.outcome.winner().and_then(|id| world.blade_name(id)) {
                Some(name) => println!("\n{} wins after {:.2} s", name, report.time.value()),
                None => println!("\nDraw after {:.2} s", report.time.value()),
            }
            return;
        }
    }

    println!("\nNo winner after {} steps", max_steps);
    for id in world.blade_ids() {
        if let (Some(name), Some(blade)) = (world.blade_name(id), world.blade(id)) {
            println!("  {}: spin {:.1} rad/s", name, blade.spin_rate().value());
        }
    }
}
