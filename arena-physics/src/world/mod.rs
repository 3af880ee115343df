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
//! The simulated arena
//!
//! A [`PhysicsWorld`] owns blades, stadiums, the force model and the random
//! generator used for collision recoil. Each call to
//! [`update`](PhysicsWorld::update) runs one step in three phases:
//!
//! 1. **Forces**: every active blade is classified against the stadiums.
//!    A blade whose spin fell below the threshold becomes
//!    [`BladeStatus::OutOfSpin`]; one whose contact point is outside every
//!    stadium becomes [`BladeStatus::OutOfBounds`]. Otherwise air drag is
//!    queued, plus gravity when airborne or friction and slope when touching
//!    the supporting stadium.
//! 2. **Collisions**: every pair of active blades that overlap and are not in
//!    their impact cooldown is resolved. Out-of-spin blades stay in the
//!    stadium as immovable obstacles that active blades bounce off;
//!    out-of-bounds blades no longer collide.
//! 3. **Integration**: every active blade applies its accumulated changes,
//!    moves, and is pushed back out of any stadium it sank into.
//!
//! All forces of a step are queued before any blade integrates, so the
//! result does not depend on the order blades were added. A blade reaching a
//! terminal state never stops the step for the other blades; it is frozen
//! in place until [`reset_match`](PhysicsWorld::reset_match).
//!
//! # Examples
//!
//! ```
//! use arena_physics::bodies::{BladeBody, StadiumBody};
//! use arena_physics::config::PhysicsConfig;
//! use arena_physics::units::{AngularVelocityVector, LengthVector, Seconds, VelocityVector};
//! use arena_physics::world::PhysicsWorld;
//!
//! let mut world = PhysicsWorld::with_seed(PhysicsConfig::default(), 7);
//! world.add_stadium(StadiumBody::default());
//! let blade = BladeBody::default().with_launch(
//!     LengthVector::new(0.2, 0.05, 0.0),
//!     VelocityVector::zero(),
//!     AngularVelocityVector::new(0.0, -400.0, 0.0),
//! );
//! let id = world.add_blade("Pegasus", blade);
//!
//! let report = world.update(Seconds::new(0.01));
//! assert!(report.events.is_empty());
//! assert!(!report.outcome.is_finished());
//! assert!(world.blade(id).is_some());
//! ```

mod events;
mod handles;
mod storage;

pub use events::{BladeEvent, BladeStatus, MatchOutcome, StepReport};
pub use handles::{BladeId, StadiumId};

use crate::bodies::{BladeBody, StadiumBody};
use crate::config::PhysicsConfig;
use crate::physics::{Physics, SpinRelation};
use crate::units::{LengthVector, Meters, Seconds};
use handles::Handle;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;
use storage::Slots;

#[derive(Debug, Clone)]
struct BladeEntry {
    name: String,
    body: BladeBody,
    status: BladeStatus,
}

/// Blades, stadiums and the force model of one arena
#[derive(Debug, Clone)]
pub struct PhysicsWorld<R: Rng = ChaCha8Rng> {
    physics: Physics,
    blades: Slots<BladeEntry>,
    stadiums: Slots<StadiumBody>,
    time: Seconds,
    rng: R,
}

impl PhysicsWorld<ChaCha8Rng> {
    /// Create an empty world whose recoil generator is seeded from the OS
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`PhysicsConfig::validate`].
    pub fn new(config: PhysicsConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Create an empty world with a deterministic recoil generator
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`PhysicsConfig::validate`].
    pub fn with_seed(config: PhysicsConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PhysicsWorld<R> {
    /// Create an empty world drawing recoil samples from `rng`
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`PhysicsConfig::validate`].
    pub fn with_rng(config: PhysicsConfig, rng: R) -> Self {
        if let Err(message) = config.validate() {
            panic!("Invalid physics config: {}", message);
        }
        PhysicsWorld {
            physics: Physics::new(config),
            blades: Slots::new(),
            stadiums: Slots::new(),
            time: Seconds::zero(),
            rng,
        }
    }

    /// Constants in use
    pub fn config(&self) -> &PhysicsConfig {
        self.physics.config()
    }

    /// Force model in use
    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    /// Simulation time since the match started
    pub fn time(&self) -> Seconds {
        self.time
    }

    /// Register a blade; it starts active
    pub fn add_blade(&mut self, name: impl Into<String>, body: BladeBody) -> BladeId {
        let name = name.into();
        log::debug!("Adding blade {}", name);
        BladeId(self.blades.insert(BladeEntry {
            name,
            body,
            status: BladeStatus::Active,
        }))
    }

    /// Register a stadium
    pub fn add_stadium(&mut self, stadium: StadiumBody) -> StadiumId {
        StadiumId(self.stadiums.insert(stadium))
    }

    /// Remove a blade, returning its body; `None` for stale handles
    pub fn remove_blade(&mut self, id: BladeId) -> Option<BladeBody> {
        self.blades.remove(id.0).map(|entry| entry.body)
    }

    /// Remove a stadium; `None` for stale handles
    pub fn remove_stadium(&mut self, id: StadiumId) -> Option<StadiumBody> {
        self.stadiums.remove(id.0)
    }

    /// Blade body
    pub fn blade(&self, id: BladeId) -> Option<&BladeBody> {
        self.blades.get(id.0).map(|entry| &entry.body)
    }

    /// Mutable blade body, for setup between matches
    pub fn blade_mut(&mut self, id: BladeId) -> Option<&mut BladeBody> {
        self.blades.get_mut(id.0).map(|entry| &mut entry.body)
    }

    /// Blade name
    pub fn blade_name(&self, id: BladeId) -> Option<&str> {
        self.blades.get(id.0).map(|entry| entry.name.as_str())
    }

    /// Blade status
    pub fn blade_status(&self, id: BladeId) -> Option<BladeStatus> {
        self.blades.get(id.0).map(|entry| entry.status)
    }

    /// Stadium body
    pub fn stadium(&self, id: StadiumId) -> Option<&StadiumBody> {
        self.stadiums.get(id.0)
    }

    /// Mutable stadium body, for reconfiguration between matches
    pub fn stadium_mut(&mut self, id: StadiumId) -> Option<&mut StadiumBody> {
        self.stadiums.get_mut(id.0)
    }

    /// Handles of all blades in simulation order
    pub fn blade_ids(&self) -> impl Iterator<Item = BladeId> + '_ {
        self.blades.iter().map(|(handle, _)| BladeId(handle))
    }

    /// Handles of all stadiums
    pub fn stadium_ids(&self) -> impl Iterator<Item = StadiumId> + '_ {
        self.stadiums.iter().map(|(handle, _)| StadiumId(handle))
    }

    /// Number of blades
    pub fn blade_count(&self) -> usize {
        self.blades.len()
    }

    /// Number of stadiums
    pub fn stadium_count(&self) -> usize {
        self.stadiums.len()
    }

    /// Number of blades still active
    pub fn active_blade_count(&self) -> usize {
        self.blades
            .values()
            .filter(|entry| entry.status == BladeStatus::Active)
            .count()
    }

    /// Current match state
    ///
    /// The match is finished once fewer than `min(2, blade_count)` blades are
    /// active: a lone blade plays until it stops, two or more play until at
    /// most one is left.
    pub fn outcome(&self) -> MatchOutcome {
        let survivors: Vec<BladeId> = self
            .blades
            .iter()
            .filter(|(_, entry)| entry.status == BladeStatus::Active)
            .map(|(handle, _)| BladeId(handle))
            .collect();
        if survivors.len() < self.blades.len().min(2) {
            MatchOutcome::Finished { survivors }
        } else {
            MatchOutcome::Ongoing
        }
    }

    /// Restore every blade to its launch state, reactivate it, and restart the clock
    pub fn reset_match(&mut self) {
        for (_, entry) in self.blades.iter_mut() {
            entry.body.reset_physics();
            entry.status = BladeStatus::Active;
        }
        self.time = Seconds::zero();
        log::info!("Match reset with {} blades", self.blades.len());
    }

    /// Advance the simulation by `dt`
    ///
    /// A zero `dt` still classifies blades and resolves collisions but moves
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is negative or not finite.
    pub fn update(&mut self, dt: Seconds) -> StepReport {
        assert!(
            dt.value() >= 0.0 && dt.is_finite(),
            "Invalid timestep: {}. Must be non-negative and finite.",
            dt
        );

        self.time += dt;
        let mut events = Vec::new();

        self.accumulate_forces(&mut events);
        self.resolve_collisions(&mut events);
        self.integrate(dt);

        StepReport {
            time: self.time,
            events,
            outcome: self.outcome(),
        }
    }

    fn accumulate_forces(&mut self, events: &mut Vec<BladeEvent>) {
        let physics = &self.physics;
        let stadiums = &self.stadiums;
        let raised = self
            .blades
            .map_mut(|handle, entry| blade_forces(physics, stadiums, handle, entry));
        events.extend(raised.into_iter().flatten());
    }

    fn resolve_collisions(&mut self, events: &mut Vec<BladeEvent>) {
        let epsilon = self.physics.config().collision_epsilon;
        // Out-of-spin blades stay in the stadium as obstacles
        let collidable: Vec<_> = self
            .blades
            .iter()
            .filter(|(_, entry)| entry.status != BladeStatus::OutOfBounds)
            .map(|(handle, entry)| (handle, entry.status == BladeStatus::Active))
            .collect();

        for (i, &(first, first_active)) in collidable.iter().enumerate() {
            for &(second, second_active) in &collidable[i + 1..] {
                if !first_active && !second_active {
                    continue;
                }
                // The moving blade always comes first
                let (first, second) = if first_active { (first, second) } else { (second, first) };
                let Some((a, b)) = self.blades.get_pair_mut(first, second) else {
                    continue;
                };
                let (a, b) = (&mut a.body, &mut b.body);

                if !a.bounding_box().intersects(&b.bounding_box()) {
                    continue;
                }
                let Some(contact_distance) = BladeBody::distance_overlap(a, b) else {
                    continue;
                };

                let cooling_down = |blade: &BladeBody| {
                    blade
                        .prev_collision()
                        .map_or(false, |last| self.time - last < epsilon)
                };
                let obstacle = !(first_active && second_active);
                if cooling_down(a) || (!obstacle && cooling_down(b)) {
                    continue;
                }

                let report = if obstacle {
                    self.physics.accumulate_obstacle_impact(a, b, contact_distance)
                } else {
                    let report = self.physics.accumulate_impact(a, b, contact_distance, &mut self.rng);
                    b.set_prev_collision(self.time);
                    report
                };
                a.set_prev_collision(self.time);

                let (a_id, b_id) = (BladeId(first), BladeId(second));
                events.push(BladeEvent::Collision {
                    a: a_id,
                    b: b_id,
                    report,
                });
                if report.spin_relation == SpinRelation::Opposite {
                    events.push(BladeEvent::OppositeSpinUnsupported { a: a_id, b: b_id });
                }
            }
        }
    }

    fn integrate(&mut self, dt: Seconds) {
        for (_, entry) in self.blades.iter_mut() {
            if entry.status.is_terminal() {
                continue;
            }
            let blade = &mut entry.body;
            blade.apply_accumulated_changes(dt);
            blade.update(dt);

            for stadium in self.stadiums.values() {
                let contact = blade.bottom_position();
                if stadium.is_inside(contact.x(), contact.z()) {
                    self.physics.prevent_stadium_clipping(blade, stadium);
                }
            }
        }
    }
}

/// The stadium supporting a contact point: among the stadiums containing
/// it, the one whose surface is highest there
fn supporting_stadium(stadiums: &Slots<StadiumBody>, contact: LengthVector) -> Option<(&StadiumBody, Meters)> {
    stadiums
        .values()
        .filter(|stadium| stadium.is_inside(contact.x(), contact.z()))
        .map(|stadium| (stadium, stadium.surface_y(contact.x(), contact.z())))
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

/// Classify one active blade and queue the forces acting on it
///
/// Returns the terminal event when the blade stops being active.
fn blade_forces(
    physics: &Physics,
    stadiums: &Slots<StadiumBody>,
    handle: Handle,
    entry: &mut BladeEntry,
) -> Option<BladeEvent> {
    if entry.status.is_terminal() {
        return None;
    }
    let config = physics.config();
    let blade = &mut entry.body;

    let spin_rate = blade.spin_rate();
    if spin_rate < config.min_spin_threshold {
        entry.status = BladeStatus::OutOfSpin;
        let event = BladeEvent::OutOfSpin {
            blade: BladeId(handle),
            name: entry.name.clone(),
            spin_rate,
        };
        log::info!("{}", event);
        return Some(event);
    }

    let contact = blade.bottom_position();
    let Some((stadium, surface_y)) = supporting_stadium(stadiums, contact) else {
        entry.status = BladeStatus::OutOfBounds;
        let event = BladeEvent::OutOfBounds {
            blade: BladeId(handle),
            name: entry.name.clone(),
            contact_point: contact,
        };
        log::info!("{}", event);
        return Some(event);
    };

    physics.accumulate_air_resistance(blade, config.air_density);

    if contact.y() - surface_y > config.airborne_tolerance {
        physics.accumulate_gravity(blade);
    } else {
        physics.accumulate_friction(blade, stadium);
        physics.accumulate_slope(blade, stadium);
    }
    None
}
