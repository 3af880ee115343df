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
//! # Arena Physics
//!
//! Physics core for spinning-top battles: blades assembled from parts spin
//! inside paraboloid stadiums, collide, recoil and eventually run out of spin
//! or leave the arena.
//!
//! ## Features
//!
//! - **Dimensional Analysis**: every quantity carries its unit in the type, so
//!   adding a length to a mass does not compile
//! - **Part-Based Blades**: layer, disc and driver combine into mass, inertia
//!   and drag; parts can be shared between blades
//! - **Accumulate Then Integrate**: all forces of a step are queued before any
//!   blade moves, so results do not depend on insertion order
//! - **Seeded Recoil**: collision recoil is drawn from a lognormal
//!   distribution with an injectable random generator
//! - **Presets**: a built-in part catalogue plus JSON preset files
//!
//! ## Example
//!
//! ```rust
//! use arena_physics::bodies::{BladeBody, StadiumBody};
//! use arena_physics::config::PhysicsConfig;
//! use arena_physics::units::{AngularVelocityVector, LengthVector, Seconds, VelocityVector};
//! use arena_physics::world::PhysicsWorld;
//!
//! let mut world = PhysicsWorld::with_seed(PhysicsConfig::default(), 42);
//! world.add_stadium(StadiumBody::default());
//!
//! let spin = AngularVelocityVector::new(0.0, -450.0, 0.0);
//! world.add_blade(
//!     "Pegasus",
//!     BladeBody::default().with_launch(LengthVector::new(0.0, 0.05, 0.3), VelocityVector::new(0.0, 0.0, -0.1), spin),
//! );
//! world.add_blade(
//!     "L-Drago",
//!     BladeBody::default().with_launch(LengthVector::new(0.0, 0.05, -0.3), VelocityVector::new(0.0, 0.0, 0.1), spin),
//! );
//!
//! for _ in 0..100 {
//!     let report = world.update(Seconds::new(0.01));
//!     if report.outcome.is_finished() {
//!         break;
//!     }
//! }
//! ```

#![warn(missing_docs)]

/// Blades, their parts, and stadiums
pub mod bodies;

/// Tunable physical constants
pub mod config;

/// Force and collision model
pub mod physics;

/// Built-in and file-based presets
pub mod presets;

/// Compile-time dimensional analysis
pub mod units;

/// The simulated arena
pub mod world;

pub use bodies::{BladeBody, StadiumBody};
pub use config::PhysicsConfig;
pub use physics::Physics;
pub use world::{BladeEvent, BladeId, BladeStatus, MatchOutcome, PhysicsWorld, StadiumId, StepReport};
