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
//! Type-level physical dimensions
//!
//! A dimension is the vector of exponents of the four base dimensions used by
//! the arena simulation: length (L), mass (M), time (T) and angle (A). The
//! exponents are `typenum` signed integers, so combining two dimensions is
//! resolved entirely by the compiler and mismatched units never reach runtime.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Sub};
use typenum::{Diff, Integer, NonZero, PartialDiv, PartialQuot, Prod, Sum};

/// Dimension with exponents `L` (length), `M` (mass), `T` (time), `A` (angle)
///
/// This type is never instantiated; it only appears as a type parameter of
/// [`Quantity`](super::Quantity) and [`Vector3Quantity`](super::Vector3Quantity).
pub struct Dim<L, M, T, A>(PhantomData<(L, M, T, A)>);

/// Exponents of the base dimensions of a physical quantity
pub trait Dimension {
    /// Length exponent
    type Length: Integer;
    /// Mass exponent
    type Mass: Integer;
    /// Time exponent
    type Time: Integer;
    /// Angle exponent
    type Angle: Integer;

    /// Exponents as `[length, mass, time, angle]`
    fn exponents() -> [i32; 4] {
        [
            Self::Length::to_i32(),
            Self::Mass::to_i32(),
            Self::Time::to_i32(),
            Self::Angle::to_i32(),
        ]
    }

    /// True for the dimension with all exponents zero
    fn is_dimensionless() -> bool {
        Self::exponents() == [0, 0, 0, 0]
    }
}

impl<L, M, T, A> Dimension for Dim<L, M, T, A>
where
    L: Integer,
    M: Integer,
    T: Integer,
    A: Integer,
{
    type Length = L;
    type Mass = M;
    type Time = T;
    type Angle = A;
}

/// Dimension of the product of two quantities (exponents add)
pub trait DimMul<Rhs>: Dimension {
    /// Resulting dimension
    type Output: Dimension;
}

/// Dimension of the quotient of two quantities (exponents subtract)
pub trait DimDiv<Rhs>: Dimension {
    /// Resulting dimension
    type Output: Dimension;
}

/// Dimension of a quantity raised to the integer power `N`
pub trait DimPow<N>: Dimension {
    /// Resulting dimension
    type Output: Dimension;
}

/// Dimension of the `N`-th root of a quantity
///
/// Only implemented when every exponent is divisible by `N`, so taking the
/// square root of a velocity does not compile.
pub trait DimRoot<N>: Dimension {
    /// Resulting dimension
    type Output: Dimension;
}

impl<L1, M1, T1, A1, L2, M2, T2, A2> DimMul<Dim<L2, M2, T2, A2>> for Dim<L1, M1, T1, A1>
where
    L1: Integer + Add<L2>,
    M1: Integer + Add<M2>,
    T1: Integer + Add<T2>,
    A1: Integer + Add<A2>,
    L2: Integer,
    M2: Integer,
    T2: Integer,
    A2: Integer,
    Sum<L1, L2>: Integer,
    Sum<M1, M2>: Integer,
    Sum<T1, T2>: Integer,
    Sum<A1, A2>: Integer,
{
    type Output = Dim<Sum<L1, L2>, Sum<M1, M2>, Sum<T1, T2>, Sum<A1, A2>>;
}

impl<L1, M1, T1, A1, L2, M2, T2, A2> DimDiv<Dim<L2, M2, T2, A2>> for Dim<L1, M1, T1, A1>
where
    L1: Integer + Sub<L2>,
    M1: Integer + Sub<M2>,
    T1: Integer + Sub<T2>,
    A1: Integer + Sub<A2>,
    L2: Integer,
    M2: Integer,
    T2: Integer,
    A2: Integer,
    Diff<L1, L2>: Integer,
    Diff<M1, M2>: Integer,
    Diff<T1, T2>: Integer,
    Diff<A1, A2>: Integer,
{
    type Output = Dim<Diff<L1, L2>, Diff<M1, M2>, Diff<T1, T2>, Diff<A1, A2>>;
}

impl<L, M, T, A, N> DimPow<N> for Dim<L, M, T, A>
where
    L: Integer + Mul<N>,
    M: Integer + Mul<N>,
    T: Integer + Mul<N>,
    A: Integer + Mul<N>,
    N: Integer,
    Prod<L, N>: Integer,
    Prod<M, N>: Integer,
    Prod<T, N>: Integer,
    Prod<A, N>: Integer,
{
    type Output = Dim<Prod<L, N>, Prod<M, N>, Prod<T, N>, Prod<A, N>>;
}

impl<L, M, T, A, N> DimRoot<N> for Dim<L, M, T, A>
where
    L: Integer + PartialDiv<N>,
    M: Integer + PartialDiv<N>,
    T: Integer + PartialDiv<N>,
    A: Integer + PartialDiv<N>,
    N: Integer + NonZero,
    PartialQuot<L, N>: Integer,
    PartialQuot<M, N>: Integer,
    PartialQuot<T, N>: Integer,
    PartialQuot<A, N>: Integer,
{
    type Output = Dim<PartialQuot<L, N>, PartialQuot<M, N>, PartialQuot<T, N>, PartialQuot<A, N>>;
}

/// Formats the SI unit symbol of a dimension, e.g. `m·s^-2` or `rad·s^-1`
pub(crate) fn write_unit_symbol(f: &mut fmt::Formatter<'_>, exponents: [i32; 4]) -> fmt::Result {
    const SYMBOLS: [&str; 4] = ["m", "kg", "s", "rad"];
    // Printed as kg, m, s, rad
    const ORDER: [usize; 4] = [1, 0, 2, 3];

    let mut first = true;
    for index in ORDER {
        let exponent = exponents[index];
        if exponent == 0 {
            continue;
        }
        if !first {
            write!(f, "·")?;
        }
        first = false;
        if exponent == 1 {
            write!(f, "{}", SYMBOLS[index])?;
        } else {
            write!(f, "{}^{}", SYMBOLS[index], exponent)?;
        }
    }
    Ok(())
}
