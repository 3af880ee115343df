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
//! Compile-time dimensional analysis
//!
//! Every physical value in the crate is a [`Quantity`] or [`Vector3Quantity`]
//! tagged with a [`Dim`] of four integer exponents (length, mass, time,
//! angle). All dimension checks happen in the type system, so this module has
//! no runtime error paths: a unit mismatch is a build failure.
//!
//! ```
//! use arena_physics::units::{Kilograms, MetersPerSecond, KilogramMetersPerSecond, VelocityVector};
//!
//! let momentum: KilogramMetersPerSecond = Kilograms::new(0.054) * MetersPerSecond::new(2.0);
//! assert!((momentum.value() - 0.108).abs() < 1e-12);
//!
//! let v = VelocityVector::new(0.0, 0.0, 0.1);
//! assert_eq!(v.length(), MetersPerSecond::new(0.1));
//! ```
//!
//! Adding vectors of different dimensions does not compile:
//!
//! ```compile_fail
//! use arena_physics::units::{LengthVector, VelocityVector};
//!
//! let invalid = LengthVector::zero() + VelocityVector::zero();
//! ```

mod aliases;
mod dimension;
mod quantity;
mod vector;

pub use aliases::*;
pub use dimension::{Dim, DimDiv, DimMul, DimPow, DimRoot, Dimension};
pub use quantity::Quantity;
pub use vector::Vector3Quantity;
