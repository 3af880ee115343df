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
//! Named dimensions and quantities used by the arena simulation

use super::dimension::Dim;
use super::quantity::Quantity;
use super::vector::Vector3Quantity;
use typenum::{N1, N2, N3, P1, P2, P3, P5, Z0};

/// Pure number
pub type DimensionlessDim = Dim<Z0, Z0, Z0, Z0>;
/// Length (m)
pub type LengthDim = Dim<P1, Z0, Z0, Z0>;
/// Mass (kg)
pub type MassDim = Dim<Z0, P1, Z0, Z0>;
/// Time (s)
pub type TimeDim = Dim<Z0, Z0, P1, Z0>;
/// Plane angle (rad)
pub type AngleDim = Dim<Z0, Z0, Z0, P1>;
/// Area (m²)
pub type AreaDim = Dim<P2, Z0, Z0, Z0>;
/// Volume (m³)
pub type VolumeDim = Dim<P3, Z0, Z0, Z0>;
/// Fifth power of length (m⁵), the unit of angular drag terms
pub type LengthPow5Dim = Dim<P5, Z0, Z0, Z0>;
/// Reciprocal length (m⁻¹)
pub type InverseLengthDim = Dim<N1, Z0, Z0, Z0>;
/// Velocity (m/s)
pub type VelocityDim = Dim<P1, Z0, N1, Z0>;
/// Acceleration (m/s²)
pub type AccelerationDim = Dim<P1, Z0, N2, Z0>;
/// Frequency (1/s)
pub type FrequencyDim = Dim<Z0, Z0, N1, Z0>;
/// Angular velocity (rad/s)
pub type AngularVelocityDim = Dim<Z0, Z0, N1, P1>;
/// Angular acceleration (rad/s²)
pub type AngularAccelerationDim = Dim<Z0, Z0, N2, P1>;
/// Linear velocity per unit of angular velocity (m/rad)
pub type LengthPerAngleDim = Dim<P1, Z0, Z0, N1>;
/// Reciprocal of time and angle (1/(s·rad))
pub type PerSecondPerRadianDim = Dim<Z0, Z0, N1, N1>;
/// Linear mass density (kg/m)
pub type MassPerLengthDim = Dim<N1, P1, Z0, Z0>;
/// Volumetric mass density (kg/m³)
pub type DensityDim = Dim<N3, P1, Z0, Z0>;
/// Moment of inertia (kg·m²)
pub type InertiaDim = Dim<P2, P1, Z0, Z0>;
/// Force (N)
pub type ForceDim = Dim<P1, P1, N2, Z0>;
/// Energy (J)
pub type EnergyDim = Dim<P2, P1, N2, Z0>;
/// Linear momentum and impulse (kg·m/s)
pub type MomentumDim = Dim<P1, P1, N1, Z0>;
/// Angular momentum and angular impulse (kg·m²·rad/s)
pub type AngularMomentumDim = Dim<P2, P1, N1, P1>;

/// Dimensionless scalar
pub type Scalar = Quantity<DimensionlessDim>;
/// Length in meters
pub type Meters = Quantity<LengthDim>;
/// Mass in kilograms
pub type Kilograms = Quantity<MassDim>;
/// Time in seconds
pub type Seconds = Quantity<TimeDim>;
/// Angle in radians
pub type Radians = Quantity<AngleDim>;
/// Area in square meters
pub type SquareMeters = Quantity<AreaDim>;
/// Angular drag term in m⁵
pub type MetersToTheFifth = Quantity<LengthPow5Dim>;
/// Reciprocal length
pub type PerMeter = Quantity<InverseLengthDim>;
/// Speed
pub type MetersPerSecond = Quantity<VelocityDim>;
/// Linear acceleration
pub type MetersPerSecondSquared = Quantity<AccelerationDim>;
/// Frequency
pub type PerSecond = Quantity<FrequencyDim>;
/// Spin rate
pub type RadiansPerSecond = Quantity<AngularVelocityDim>;
/// Angular acceleration
pub type RadiansPerSecondSquared = Quantity<AngularAccelerationDim>;
/// Length per radian
pub type MetersPerRadian = Quantity<LengthPerAngleDim>;
/// Frequency per radian
pub type PerSecondPerRadian = Quantity<PerSecondPerRadianDim>;
/// Linear mass density
pub type KilogramsPerMeter = Quantity<MassPerLengthDim>;
/// Density
pub type KilogramsPerCubicMeter = Quantity<DensityDim>;
/// Moment of inertia
pub type KilogramSquareMeters = Quantity<InertiaDim>;
/// Force
pub type Newtons = Quantity<ForceDim>;
/// Energy
pub type Joules = Quantity<EnergyDim>;
/// Linear momentum or impulse
pub type KilogramMetersPerSecond = Quantity<MomentumDim>;
/// Angular momentum or angular impulse
pub type AngularMomentum = Quantity<AngularMomentumDim>;

/// Dimensionless direction vector
pub type UnitVector = Vector3Quantity<DimensionlessDim>;
/// Position or displacement
pub type LengthVector = Vector3Quantity<LengthDim>;
/// Linear velocity
pub type VelocityVector = Vector3Quantity<VelocityDim>;
/// Linear acceleration
pub type AccelerationVector = Vector3Quantity<AccelerationDim>;
/// Angular velocity (magnitude is the spin rate, direction the spin axis)
pub type AngularVelocityVector = Vector3Quantity<AngularVelocityDim>;
/// Angular acceleration
pub type AngularAccelerationVector = Vector3Quantity<AngularAccelerationDim>;
/// Linear momentum or impulse
pub type MomentumVector = Vector3Quantity<MomentumDim>;

/// One radian, used to add or strip the angle dimension explicitly
pub const RADIAN: Radians = Radians::new(1.0);

/// Length given in centimeters
pub fn centimeters(value: f64) -> Meters {
    Meters::new(value * 0.01)
}

/// Mass given in grams
pub fn grams(value: f64) -> Kilograms {
    Kilograms::new(value * 0.001)
}

/// Time given in milliseconds
pub fn milliseconds(value: f64) -> Seconds {
    Seconds::new(value * 0.001)
}

/// Angle given in degrees
pub fn degrees(value: f64) -> Radians {
    Radians::new(value.to_radians())
}
