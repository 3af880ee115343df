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
//! Lognormal recoil ("attack power") distribution of a blade's top layer

use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use serde::{Deserialize, Serialize};

/// Lognormal distribution parameterised by the mean and standard deviation
/// of its samples
///
/// Sampling is driven by a caller-supplied generator, so seeding that
/// generator reproduces a match exactly.
///
/// # Examples
///
/// ```
/// use arena_physics::bodies::RecoilDistribution;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let recoil = RecoilDistribution::new(1.0, 0.1);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// assert!(recoil.sample(&mut rng) > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RecoilParams", into = "RecoilParams")]
pub struct RecoilDistribution {
    mean: f64,
    std_dev: f64,
    distribution: LogNormal<f64>,
}

/// Serialized form of [`RecoilDistribution`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoilParams {
    /// Mean of the samples
    pub mean: f64,
    /// Standard deviation of the samples
    pub std_dev: f64,
}

impl RecoilDistribution {
    /// Create a distribution whose samples have the given mean and standard deviation
    ///
    /// # Panics
    ///
    /// Panics if either parameter is non-positive or not finite. Recoil
    /// parameters come from part definitions, so a bad value is a content
    /// error. For fallible construction, use `try_new`.
    pub fn new(mean: f64, std_dev: f64) -> Self {
        match Self::try_new(mean, std_dev) {
            Ok(distribution) => distribution,
            Err(message) => panic!("{}", message),
        }
    }

    /// Try to create a distribution with the given sample mean and standard deviation
    pub fn try_new(mean: f64, std_dev: f64) -> Result<Self, String> {
        if !(mean > 0.0 && mean.is_finite()) {
            return Err(format!("Recoil mean must be positive and finite, got {}", mean));
        }
        if !(std_dev > 0.0 && std_dev.is_finite()) {
            return Err(format!(
                "Recoil standard deviation must be positive and finite, got {}",
                std_dev
            ));
        }

        // Parameters of the underlying normal distribution
        let variance_ratio = (std_dev * std_dev) / (mean * mean);
        let mu = (mean / (1.0 + variance_ratio).sqrt()).ln();
        let sigma = (1.0 + variance_ratio).ln().sqrt();

        let distribution = LogNormal::new(mu, sigma)
            .map_err(|e| format!("Invalid lognormal parameters mu={}, sigma={}: {}", mu, sigma, e))?;

        Ok(RecoilDistribution {
            mean,
            std_dev,
            distribution,
        })
    }

    /// Mean of the samples
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the samples
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draw one strictly positive sample
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.distribution.sample(rng)
    }
}

impl Default for RecoilDistribution {
    fn default() -> Self {
        RecoilDistribution::new(1.0, 0.1)
    }
}

impl PartialEq for RecoilDistribution {
    fn eq(&self, other: &Self) -> bool {
        self.mean == other.mean && self.std_dev == other.std_dev
    }
}

impl TryFrom<RecoilParams> for RecoilDistribution {
    type Error = String;

    fn try_from(params: RecoilParams) -> Result<Self, Self::Error> {
        RecoilDistribution::try_new(params.mean, params.std_dev)
    }
}

impl From<RecoilDistribution> for RecoilParams {
    fn from(distribution: RecoilDistribution) -> Self {
        RecoilParams {
            mean: distribution.mean,
            std_dev: distribution.std_dev,
        }
    }
}
