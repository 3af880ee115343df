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
//! Handles to bodies registered in a [`PhysicsWorld`](super::PhysicsWorld)
//!
//! Handles are generational indices: removing a body bumps the generation of
//! its slot, so a handle kept after removal never resolves to a body added
//! later in the same slot.

use std::fmt;

/// Slot index plus generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Handle { index, generation }
    }

    pub(crate) fn index(&self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }
}

/// Handle to a blade in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BladeId(pub(crate) Handle);

impl BladeId {
    /// Slot index
    pub fn index(&self) -> usize {
        self.0.index()
    }

    /// Generation of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl fmt::Display for BladeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blade({}, gen: {})", self.0.index, self.0.generation)
    }
}

/// Handle to a stadium in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StadiumId(pub(crate) Handle);

impl StadiumId {
    /// Slot index
    pub fn index(&self) -> usize {
        self.0.index()
    }

    /// Generation of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl fmt::Display for StadiumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stadium({}, gen: {})", self.0.index, self.0.generation)
    }
}
