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
//! Per-blade status, step events and match outcome

use super::handles::BladeId;
use crate::physics::ImpactReport;
use crate::units::{LengthVector, RadiansPerSecond, Seconds};
use std::fmt;

/// Simulation state of a blade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BladeStatus {
    /// Simulated normally
    Active,
    /// Spin dropped below the threshold; frozen until the match is reset
    OutOfSpin,
    /// Contact point left every stadium; frozen until the match is reset
    OutOfBounds,
}

impl BladeStatus {
    /// True for the states that end a blade's participation in the match
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BladeStatus::Active)
    }
}

impl fmt::Display for BladeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BladeStatus::Active => write!(f, "active"),
            BladeStatus::OutOfSpin => write!(f, "out of spin"),
            BladeStatus::OutOfBounds => write!(f, "out of bounds"),
        }
    }
}

/// Something that happened during a step
#[derive(Debug, Clone, PartialEq)]
pub enum BladeEvent {
    /// A blade's spin dropped below the threshold
    OutOfSpin {
        /// Blade that stopped
        blade: BladeId,
        /// Its name
        name: String,
        /// Spin rate when the condition was detected
        spin_rate: RadiansPerSecond,
    },
    /// A blade's contact point left every stadium
    OutOfBounds {
        /// Blade that left
        blade: BladeId,
        /// Its name
        name: String,
        /// Contact point when the condition was detected
        contact_point: LengthVector,
    },
    /// Two blades collided and were resolved
    Collision {
        /// First blade of the pair, always an active one
        a: BladeId,
        /// Second blade of the pair, possibly an out-of-spin obstacle
        b: BladeId,
        /// What the impact did
        report: ImpactReport,
    },
    /// Two blades spinning in opposite directions collided
    ///
    /// Only the elastic impulse was applied; there is no recoil model for
    /// this case. Always follows the matching `Collision` event.
    OppositeSpinUnsupported {
        /// First blade of the pair
        a: BladeId,
        /// Second blade of the pair
        b: BladeId,
    },
}

impl fmt::Display for BladeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BladeEvent::OutOfSpin { name, .. } => write!(f, "Blade {} ran out of spin", name),
            BladeEvent::OutOfBounds { name, .. } => write!(f, "Blade {} out of bounds", name),
            BladeEvent::Collision { a, b, report } => {
                write!(f, "{} and {} collided ({} impulse {})", a, b, report.spin_relation, report.impulse)
            }
            BladeEvent::OppositeSpinUnsupported { a, b } => write!(
                f,
                "Opposite-spin collision between {} and {} is not supported, applied elastic impulse only",
                a, b
            ),
        }
    }
}

/// State of the match after a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// At least two blades (or the only blade) are still active
    Ongoing,
    /// Too few blades remain active; `survivors` lists the remaining ones
    Finished {
        /// Blades still active, in slot order
        survivors: Vec<BladeId>,
    },
}

impl MatchOutcome {
    /// True once the match is over
    pub fn is_finished(&self) -> bool {
        matches!(self, MatchOutcome::Finished { .. })
    }

    /// The single surviving blade, if the match ended with exactly one
    pub fn winner(&self) -> Option<BladeId> {
        match self {
            MatchOutcome::Finished { survivors } if survivors.len() == 1 => Some(survivors[0]),
            _ => None,
        }
    }
}

/// Result of one [`PhysicsWorld::update`](super::PhysicsWorld::update)
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Simulation time at the end of the step
    pub time: Seconds,
    /// Events raised during the step, in the order they happened
    pub events: Vec<BladeEvent>,
    /// Match state after the step
    pub outcome: MatchOutcome,
}

impl StepReport {
    /// Number of blade-blade impacts resolved in the step
    pub fn collision_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, BladeEvent::Collision { .. }))
            .count()
    }

    /// Terminal events raised in the step
    pub fn terminal_events(&self) -> impl Iterator<Item = &BladeEvent> {
        self.events.iter().filter(|event| {
            matches!(event, BladeEvent::OutOfSpin { .. } | BladeEvent::OutOfBounds { .. })
        })
    }
}
