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
//! Three-component vectors of a single physical dimension
//!
//! `Vector3Quantity<D, V>` stores its components as raw values and hands them
//! out as [`Quantity`] values of the same dimension. Products with other
//! vectors or quantities combine dimensions exactly like scalar quantities.

use super::aliases::DimensionlessDim;
use super::dimension::{write_unit_symbol, DimDiv, DimMul, Dimension};
use super::quantity::Quantity;
use num_traits::Float;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector whose components all have dimension `D`
pub struct Vector3Quantity<D, V = f64> {
    x: V,
    y: V,
    z: V,
    dimension: PhantomData<D>,
}

impl<D, V> Vector3Quantity<D, V> {
    /// Create a vector from raw SI component values
    pub const fn new(x: V, y: V, z: V) -> Self {
        Vector3Quantity {
            x,
            y,
            z,
            dimension: PhantomData,
        }
    }
}

impl<D, V: Float> Vector3Quantity<D, V> {
    /// Zero vector
    pub fn zero() -> Self {
        Self::new(V::zero(), V::zero(), V::zero())
    }

    /// Create a vector from typed components
    pub fn from_quantities(x: Quantity<D, V>, y: Quantity<D, V>, z: Quantity<D, V>) -> Self {
        Self::new(x.value(), y.value(), z.value())
    }

    /// Create a vector from raw `[x, y, z]` values
    pub fn from_array(values: [V; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Raw `[x, y, z]` values
    pub fn as_array(&self) -> [V; 3] {
        [self.x, self.y, self.z]
    }

    /// X component
    pub fn x(&self) -> Quantity<D, V> {
        Quantity::new(self.x)
    }

    /// Y component
    pub fn y(&self) -> Quantity<D, V> {
        Quantity::new(self.y)
    }

    /// Z component
    pub fn z(&self) -> Quantity<D, V> {
        Quantity::new(self.z)
    }

    /// Copy of this vector with the y component replaced
    pub fn with_y(self, y: Quantity<D, V>) -> Self {
        Self::new(self.x, y.value(), self.z)
    }

    /// Copy of this vector projected onto the horizontal (x, z) plane
    pub fn horizontal(self) -> Self {
        Self::new(self.x, V::zero(), self.z)
    }

    /// Euclidean length
    pub fn length(&self) -> Quantity<D, V> {
        Quantity::new(self.raw_length())
    }

    /// Squared length, with the squared dimension
    pub fn length_squared(&self) -> Quantity<<D as DimMul<D>>::Output, V>
    where
        D: DimMul<D>,
    {
        Quantity::new(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Dot product; the dimension of the result is the product of both dimensions
    pub fn dot<Dr>(self, rhs: Vector3Quantity<Dr, V>) -> Quantity<<D as DimMul<Dr>>::Output, V>
    where
        D: DimMul<Dr>,
    {
        Quantity::new(self.x * rhs.x + self.y * rhs.y + self.z * rhs.z)
    }

    /// Cross product; the dimension of the result is the product of both dimensions
    pub fn cross<Dr>(self, rhs: Vector3Quantity<Dr, V>) -> Vector3Quantity<<D as DimMul<Dr>>::Output, V>
    where
        D: DimMul<Dr>,
    {
        Vector3Quantity::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Dimensionless unit vector in the direction of this vector
    ///
    /// Returns `None` for vectors too short to have a meaningful direction
    /// (length at or below the square root of the float epsilon) and for
    /// vectors with non-finite components.
    pub fn normalize(&self) -> Option<Vector3Quantity<DimensionlessDim, V>> {
        let length = self.raw_length();
        if !length.is_finite() || length <= V::epsilon().sqrt() {
            return None;
        }
        Some(Vector3Quantity::new(
            self.x / length,
            self.y / length,
            self.z / length,
        ))
    }

    /// Like [`normalize`](Self::normalize) but yields the zero vector for
    /// degenerate input
    pub fn normalize_or_zero(&self) -> Vector3Quantity<DimensionlessDim, V> {
        self.normalize().unwrap_or_else(Vector3Quantity::zero)
    }

    /// Signed length of the projection onto a unit `axis`, keeping this
    /// vector's dimension
    pub fn proj(&self, axis: Vector3Quantity<DimensionlessDim, V>) -> Quantity<D, V> {
        Quantity::new(self.x * axis.x + self.y * axis.y + self.z * axis.z)
    }

    /// Check if all components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn raw_length(&self) -> V {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl<V: Float> Vector3Quantity<DimensionlessDim, V> {
    /// Unit vector along +x
    pub fn unit_x() -> Self {
        Self::new(V::one(), V::zero(), V::zero())
    }

    /// Unit vector along +y (up)
    pub fn unit_y() -> Self {
        Self::new(V::zero(), V::one(), V::zero())
    }

    /// Unit vector along +z
    pub fn unit_z() -> Self {
        Self::new(V::zero(), V::zero(), V::one())
    }
}

impl<D, V: Copy> Clone for Vector3Quantity<D, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, V: Copy> Copy for Vector3Quantity<D, V> {}

impl<D, V: Float> Default for Vector3Quantity<D, V> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D, V: PartialEq> PartialEq for Vector3Quantity<D, V> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl<D: Dimension, V: fmt::Debug> fmt::Debug for Vector3Quantity<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector3Quantity")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .field("dimension", &D::exponents())
            .finish()
    }
}

impl<D: Dimension, V: fmt::Display> fmt::Display for Vector3Quantity<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)?;
        if !D::is_dimensionless() {
            write!(f, " ")?;
            write_unit_symbol(f, D::exponents())?;
        }
        Ok(())
    }
}

impl<D, V: Serialize> Serialize for Vector3Quantity<D, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [&self.x, &self.y, &self.z].serialize(serializer)
    }
}

impl<'de, D, V: Deserialize<'de>> Deserialize<'de> for Vector3Quantity<D, V> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let [x, y, z] = <[V; 3]>::deserialize(deserializer)?;
        Ok(Self::new(x, y, z))
    }
}

impl<D, V: Float> Neg for Vector3Quantity<D, V> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<D, V: Float> Add for Vector3Quantity<D, V> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<D, V: Float> Sub for Vector3Quantity<D, V> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<D, V: Float> AddAssign for Vector3Quantity<D, V> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<D, V: Float> SubAssign for Vector3Quantity<D, V> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<D, V: Float> Sum for Vector3Quantity<D, V> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

impl<Dl, Dr, V: Float> Mul<Quantity<Dr, V>> for Vector3Quantity<Dl, V>
where
    Dl: DimMul<Dr>,
{
    type Output = Vector3Quantity<<Dl as DimMul<Dr>>::Output, V>;

    fn mul(self, rhs: Quantity<Dr, V>) -> Self::Output {
        let factor = rhs.value();
        Vector3Quantity::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl<Dl, Dr, V: Float> Mul<Vector3Quantity<Dr, V>> for Quantity<Dl, V>
where
    Dl: DimMul<Dr>,
{
    type Output = Vector3Quantity<<Dl as DimMul<Dr>>::Output, V>;

    fn mul(self, rhs: Vector3Quantity<Dr, V>) -> Self::Output {
        let factor = self.value();
        Vector3Quantity::new(factor * rhs.x, factor * rhs.y, factor * rhs.z)
    }
}

impl<Dl, Dr, V: Float> Div<Quantity<Dr, V>> for Vector3Quantity<Dl, V>
where
    Dl: DimDiv<Dr>,
{
    type Output = Vector3Quantity<<Dl as DimDiv<Dr>>::Output, V>;

    fn div(self, rhs: Quantity<Dr, V>) -> Self::Output {
        let divisor = rhs.value();
        Vector3Quantity::new(self.x / divisor, self.y / divisor, self.z / divisor)
    }
}

macro_rules! impl_vector_scalar_ops {
    ($($float:ty),*) => {$(
        impl<D> Mul<$float> for Vector3Quantity<D, $float> {
            type Output = Self;

            fn mul(self, rhs: $float) -> Self {
                Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
            }
        }

        impl<D> Mul<Vector3Quantity<D, $float>> for $float {
            type Output = Vector3Quantity<D, $float>;

            fn mul(self, rhs: Vector3Quantity<D, $float>) -> Vector3Quantity<D, $float> {
                rhs * self
            }
        }

        impl<D> Div<$float> for Vector3Quantity<D, $float> {
            type Output = Self;

            fn div(self, rhs: $float) -> Self {
                Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
            }
        }

        impl<D> MulAssign<$float> for Vector3Quantity<D, $float> {
            fn mul_assign(&mut self, rhs: $float) {
                *self = *self * rhs;
            }
        }

        impl<D> DivAssign<$float> for Vector3Quantity<D, $float> {
            fn div_assign(&mut self, rhs: $float) {
                *self = *self / rhs;
            }
        }
    )*};
}

impl_vector_scalar_ops!(f32, f64);

#[cfg(test)]
mod tests {
    use crate::units::{
        AccelerationVector, Kilograms, LengthVector, MetersPerSecond, MomentumVector, Seconds,
        UnitVector, VelocityVector,
    };

    #[test]
    fn test_component_access() {
        let v = VelocityVector::new(1.0, -2.0, 3.0);
        assert_eq!(v.x().value(), 1.0);
        assert_eq!(v.y(), MetersPerSecond::new(-2.0));
        assert_eq!(v.z().value(), 3.0);
        assert_eq!(v.as_array(), [1.0, -2.0, 3.0]);
        assert_eq!(
            VelocityVector::from_quantities(v.x(), v.y(), v.z()),
            VelocityVector::from_array([1.0, -2.0, 3.0])
        );
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = LengthVector::new(1.0, 2.0, 3.0);
        let b = LengthVector::new(0.5, 0.5, 0.5);
        assert_eq!((a + b).as_array(), [1.5, 2.5, 3.5]);
        assert_eq!((a - b).as_array(), [0.5, 1.5, 2.5]);
        assert_eq!((-a).as_array(), [-1.0, -2.0, -3.0]);
        assert_eq!((a * 2.0).as_array(), [2.0, 4.0, 6.0]);
        assert_eq!((2.0 * a).as_array(), [2.0, 4.0, 6.0]);
        assert_eq!((a / 2.0).as_array(), [0.5, 1.0, 1.5]);

        let mut c = a;
        c += b;
        c -= b;
        c *= 3.0;
        c /= 3.0;
        assert_eq!(c, a);
    }

    #[test]
    fn test_dimension_combining_products() {
        let velocity = VelocityVector::new(2.0, 0.0, -4.0);
        let displacement: LengthVector = velocity * Seconds::new(0.5);
        assert_eq!(displacement.as_array(), [1.0, 0.0, -2.0]);

        let momentum: MomentumVector = Kilograms::new(3.0) * velocity;
        assert_eq!(momentum.as_array(), [6.0, 0.0, -12.0]);

        let acceleration: AccelerationVector = velocity / Seconds::new(2.0);
        assert_eq!(acceleration.as_array(), [1.0, 0.0, -2.0]);
    }

    #[test]
    fn test_dot_and_cross() {
        let x = UnitVector::unit_x();
        let y = UnitVector::unit_y();
        assert_eq!(x.cross(y), UnitVector::unit_z());
        assert_eq!(x.dot(y).value(), 0.0);

        let a = LengthVector::new(1.0, 2.0, 2.0);
        assert_eq!(a.dot(a).value(), 9.0);
        assert_eq!(a.length_squared().value(), 9.0);
        assert_eq!(a.length().value(), 3.0);
    }

    #[test]
    fn test_normalize_guards_degenerate_vectors() {
        let v = VelocityVector::new(0.0, 3.0, 4.0);
        let unit = v.normalize().expect("non-zero vector normalizes");
        assert!((unit.length().value() - 1.0).abs() < 1e-12);
        assert!((unit.y().value() - 0.6).abs() < 1e-12);

        assert!(VelocityVector::zero().normalize().is_none());
        assert!(VelocityVector::new(1e-12, 0.0, 0.0).normalize().is_none());
        assert!(VelocityVector::new(f64::NAN, 1.0, 0.0).normalize().is_none());
        assert_eq!(VelocityVector::zero().normalize_or_zero(), UnitVector::zero());
    }

    #[test]
    fn test_projection_keeps_dimension() {
        let v = VelocityVector::new(3.0, 4.0, 0.0);
        let along_x: MetersPerSecond = v.proj(UnitVector::unit_x());
        assert_eq!(along_x.value(), 3.0);
        assert_eq!(v.proj(-UnitVector::unit_y()).value(), -4.0);
    }

    #[test]
    fn test_horizontal_helpers() {
        let p = LengthVector::new(1.0, 5.0, -1.0);
        assert_eq!(p.horizontal().as_array(), [1.0, 0.0, -1.0]);
        assert_eq!(p.with_y(crate::units::Meters::new(2.0)).as_array(), [1.0, 2.0, -1.0]);
        assert!(p.is_finite());
        assert!(!LengthVector::new(f64::INFINITY, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_display() {
        let v = VelocityVector::new(1.0, 0.0, -1.5);
        assert_eq!(format!("{}", v), "(1, 0, -1.5) m·s^-1");
        assert_eq!(format!("{}", UnitVector::unit_y()), "(0, 1, 0)");
    }

    #[test]
    fn test_serde_as_array() {
        let v = LengthVector::new(0.0, 1.0, 0.3);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[0.0,1.0,0.3]");
        let back: LengthVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
