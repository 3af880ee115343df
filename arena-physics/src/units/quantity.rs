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
//! Scalar physical quantities tagged with a compile-time dimension
//!
//! `Quantity<D, V>` wraps a raw value `V` with the dimension `D`. Adding or
//! subtracting quantities requires identical dimensions; multiplying or
//! dividing combines the exponents at the type level. There is no runtime
//! representation of the dimension.
//!
//! ```
//! use arena_physics::units::{Meters, MetersPerSecond, Seconds};
//!
//! let distance = Meters::new(3.0);
//! let time = Seconds::new(1.5);
//! let speed: MetersPerSecond = distance / time;
//! assert_eq!(speed.value(), 2.0);
//! ```
//!
//! Mixing dimensions is rejected by the compiler:
//!
//! ```compile_fail
//! use arena_physics::units::{Kilograms, Meters};
//!
//! let invalid = Meters::new(1.0) + Kilograms::new(2.0);
//! ```
//!
//! ```compile_fail
//! use arena_physics::units::{MetersPerSecond, Seconds};
//!
//! // velocity * time is a length, not a velocity
//! let invalid: MetersPerSecond = MetersPerSecond::new(1.0) * Seconds::new(2.0);
//! ```
//!
//! ```compile_fail
//! use arena_physics::units::MetersPerSecond;
//!
//! // m^1 s^-1 has no integer square root
//! let invalid = MetersPerSecond::new(4.0).sqrt();
//! ```

use super::dimension::{write_unit_symbol, DimDiv, DimMul, DimPow, DimRoot, Dimension};
use num_traits::{Float, NumCast};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use typenum::{Integer, NonZero, P2};

/// A scalar value of dimension `D` stored as `V` (`f64` by default)
pub struct Quantity<D, V = f64> {
    value: V,
    dimension: PhantomData<D>,
}

impl<D, V> Quantity<D, V> {
    /// Wrap a raw value expressed in SI base units
    pub const fn new(value: V) -> Self {
        Quantity {
            value,
            dimension: PhantomData,
        }
    }

    /// Unwrap the raw SI value
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<D, V: Copy> Quantity<D, V> {
    /// Get the raw SI value
    pub fn value(&self) -> V {
        self.value
    }
}

impl<D, V: Float> Quantity<D, V> {
    /// Zero of this dimension
    pub fn zero() -> Self {
        Quantity::new(V::zero())
    }

    /// Absolute value
    pub fn abs(self) -> Self {
        Quantity::new(self.value.abs())
    }

    /// `-1`, `0` or `1` as a raw factor following the sign of the value
    ///
    /// Zero maps to zero rather than `+1` as `f64::signum` would.
    pub fn sign(self) -> V {
        if self.value > V::zero() {
            V::one()
        } else if self.value < V::zero() {
            -V::one()
        } else {
            V::zero()
        }
    }

    /// Smaller of two quantities of the same dimension
    pub fn min(self, other: Self) -> Self {
        Quantity::new(self.value.min(other.value))
    }

    /// Larger of two quantities of the same dimension
    pub fn max(self, other: Self) -> Self {
        Quantity::new(self.value.max(other.value))
    }

    /// Check if the value is finite (not NaN or infinite)
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }

    /// Raise to the integer power `N`, multiplying every exponent by `N`
    ///
    /// ```
    /// use arena_physics::units::{Meters, Quantity, AreaDim};
    /// use typenum::P2;
    ///
    /// let area: Quantity<AreaDim> = Meters::new(3.0).powi::<P2>();
    /// assert_eq!(area.value(), 9.0);
    /// ```
    pub fn powi<N: Integer>(self) -> Quantity<<D as DimPow<N>>::Output, V>
    where
        D: DimPow<N>,
    {
        Quantity::new(self.value.powi(N::to_i32()))
    }

    /// Take the `N`-th root, dividing every exponent by `N`
    ///
    /// Only compiles when all exponents are divisible by `N`. Even roots of
    /// negative values are NaN, as with the underlying float type.
    pub fn root<N: Integer + NonZero>(self) -> Quantity<<D as DimRoot<N>>::Output, V>
    where
        D: DimRoot<N>,
    {
        let value = match N::to_i32() {
            2 => self.value.sqrt(),
            3 => self.value.cbrt(),
            n => match <V as NumCast>::from(n) {
                Some(degree) => self.value.abs().powf(degree.recip()) * self.sign_factor_for_root(n),
                None => V::nan(),
            },
        };
        Quantity::new(value)
    }

    /// Square root, halving every exponent
    pub fn sqrt(self) -> Quantity<<D as DimRoot<P2>>::Output, V>
    where
        D: DimRoot<P2>,
    {
        Quantity::new(self.value.sqrt())
    }

    fn sign_factor_for_root(&self, degree: i32) -> V {
        if self.value >= V::zero() {
            V::one()
        } else if degree % 2 != 0 {
            -V::one()
        } else {
            V::nan()
        }
    }
}

impl<D, V: Copy> Clone for Quantity<D, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, V: Copy> Copy for Quantity<D, V> {}

impl<D: Dimension, V: fmt::Debug> fmt::Debug for Quantity<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("value", &self.value)
            .field("dimension", &D::exponents())
            .finish()
    }
}

impl<D: Dimension, V: fmt::Display> fmt::Display for Quantity<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)?;
        if !D::is_dimensionless() {
            write!(f, " ")?;
            write_unit_symbol(f, D::exponents())?;
        }
        Ok(())
    }
}

impl<D, V: Float> Default for Quantity<D, V> {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl<D, V: PartialEq> PartialEq for Quantity<D, V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<D, V: PartialOrd> PartialOrd for Quantity<D, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<D, V: Serialize> Serialize for Quantity<D, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, D, V: Deserialize<'de>> Deserialize<'de> for Quantity<D, V> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        V::deserialize(deserializer).map(Quantity::new)
    }
}

impl<D, V: Neg<Output = V>> Neg for Quantity<D, V> {
    type Output = Self;

    fn neg(self) -> Self {
        Quantity::new(-self.value)
    }
}

impl<D, V: Add<Output = V>> Add for Quantity<D, V> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Quantity::new(self.value + rhs.value)
    }
}

impl<D, V: Sub<Output = V>> Sub for Quantity<D, V> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Quantity::new(self.value - rhs.value)
    }
}

impl<D, V: AddAssign> AddAssign for Quantity<D, V> {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<D, V: SubAssign> SubAssign for Quantity<D, V> {
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<D, V: Float> Sum for Quantity<D, V> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

impl<Dl, Dr, V> Mul<Quantity<Dr, V>> for Quantity<Dl, V>
where
    Dl: DimMul<Dr>,
    V: Mul<Output = V>,
{
    type Output = Quantity<<Dl as DimMul<Dr>>::Output, V>;

    fn mul(self, rhs: Quantity<Dr, V>) -> Self::Output {
        Quantity::new(self.value * rhs.value)
    }
}

impl<Dl, Dr, V> Div<Quantity<Dr, V>> for Quantity<Dl, V>
where
    Dl: DimDiv<Dr>,
    V: Div<Output = V>,
{
    type Output = Quantity<<Dl as DimDiv<Dr>>::Output, V>;

    fn div(self, rhs: Quantity<Dr, V>) -> Self::Output {
        Quantity::new(self.value / rhs.value)
    }
}

// Raw scalar factors leave the dimension unchanged. Implemented per float
// type so they cannot overlap with the quantity * quantity impls.
macro_rules! impl_scalar_ops {
    ($($float:ty),*) => {$(
        impl<D> Mul<$float> for Quantity<D, $float> {
            type Output = Self;

            fn mul(self, rhs: $float) -> Self {
                Quantity::new(self.value * rhs)
            }
        }

        impl<D> Mul<Quantity<D, $float>> for $float {
            type Output = Quantity<D, $float>;

            fn mul(self, rhs: Quantity<D, $float>) -> Quantity<D, $float> {
                Quantity::new(self * rhs.value)
            }
        }

        impl<D> Div<$float> for Quantity<D, $float> {
            type Output = Self;

            fn div(self, rhs: $float) -> Self {
                Quantity::new(self.value / rhs)
            }
        }

        impl<D> MulAssign<$float> for Quantity<D, $float> {
            fn mul_assign(&mut self, rhs: $float) {
                self.value *= rhs;
            }
        }

        impl<D> DivAssign<$float> for Quantity<D, $float> {
            fn div_assign(&mut self, rhs: $float) {
                self.value /= rhs;
            }
        }
    )*};
}

impl_scalar_ops!(f32, f64);
