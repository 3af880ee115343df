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
//! Rigid bodies of the arena: blades, their parts, and stadiums

pub mod blade;
pub mod parts;
pub mod recoil;
pub mod stadium;

pub use blade::{BladeBody, BoundingBox};
pub use parts::{BladePart, Disc, Driver, Layer, PartShape};
pub use recoil::{RecoilDistribution, RecoilParams};
pub use stadium::{StadiumBody, StadiumParams};
