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
//! Blade and stadium presets
//!
//! A small built-in catalogue of parts, plus [`PresetLoader`] for presets
//! stored as JSON files named `<name>.json` in a directory. Missing fields in
//! a file fall back to the part defaults, so a preset only needs to name what
//! it changes:
//!
//! ```json
//! { "name": "Striker", "layer": { "mass": 0.03 }, "driver": { "coefficient_of_friction": 0.3 } }
//! ```
//!
//! Files may carry a `format` version. Files written by a newer minor release
//! or a different major release of the format are rejected.

use crate::bodies::{BladeBody, Disc, Driver, Layer, RecoilDistribution, StadiumBody, StadiumParams};
use crate::units::{KilogramSquareMeters, Kilograms, LengthVector, Meters, Scalar};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while loading or validating presets
#[derive(Debug)]
pub enum PresetError {
    /// File system error
    Io(io::Error),
    /// Malformed JSON or out-of-range field
    Parse(serde_json::Error),
    /// Well-formed preset describing impossible parts
    Invalid(String),
    /// No preset with the requested name
    NotFound(String),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Io(e) => write!(f, "IO error: {}", e),
            PresetError::Parse(e) => write!(f, "Parse error: {}", e),
            PresetError::Invalid(msg) => write!(f, "Invalid preset: {}", msg),
            PresetError::NotFound(name) => write!(f, "Preset not found: {}", name),
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::Io(e) => Some(e),
            PresetError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PresetError {
    fn from(e: io::Error) -> Self {
        PresetError::Io(e)
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(e: serde_json::Error) -> Self {
        PresetError::Parse(e)
    }
}

/// Result type for preset operations
pub type PresetResult<T> = Result<T, PresetError>;

/// Preset file format version written by this crate
pub const PRESET_FORMAT_VERSION: &str = "1.0.0";

fn current_format() -> String {
    PRESET_FORMAT_VERSION.to_string()
}

/// Check whether a file's format version can be read
///
/// Major versions must match. Within major version 0 the minor version must
/// match too; from 1.0 on, files from an older or equal minor are accepted.
pub fn is_format_compatible(file_format: &str, supported: &str) -> bool {
    let (Ok(file), Ok(supported)) = (Version::parse(file_format), Version::parse(supported)) else {
        return false;
    };
    if file.major != supported.major {
        return false;
    }
    if file.major == 0 {
        file.minor == supported.minor
    } else {
        file.minor <= supported.minor
    }
}

fn check_format(name: &str, format: &str) -> PresetResult<()> {
    if is_format_compatible(format, PRESET_FORMAT_VERSION) {
        Ok(())
    } else {
        Err(PresetError::Invalid(format!(
            "{}: format version {} is incompatible with supported version {}",
            name, format, PRESET_FORMAT_VERSION
        )))
    }
}

/// A named combination of parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladePreset {
    /// Display name
    pub name: String,
    /// File format version
    #[serde(default = "current_format")]
    pub format: String,
    /// Top section
    #[serde(default)]
    pub layer: Layer,
    /// Middle section
    #[serde(default)]
    pub disc: Disc,
    /// Tip
    #[serde(default)]
    pub driver: Driver,
}

impl BladePreset {
    /// Check every part
    pub fn validate(&self) -> PresetResult<()> {
        if self.name.trim().is_empty() {
            return Err(PresetError::Invalid("Blade preset name must not be empty".to_string()));
        }
        check_format(&self.name, &self.format)?;
        self.layer
            .validate()
            .and_then(|_| self.disc.validate())
            .and_then(|_| self.driver.validate())
            .map_err(|e| PresetError::Invalid(format!("{}: {}", self.name, e)))
    }

    /// Assemble a blade at rest at the origin
    pub fn build(&self) -> BladeBody {
        BladeBody::from_parts(self.layer.clone(), self.disc.clone(), self.driver.clone())
    }
}

/// A named built-in stadium
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StadiumPreset {
    /// Display name
    pub name: &'static str,
    /// Geometry and surface
    pub params: StadiumParams,
}

/// Stadium preset as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StadiumPresetFile {
    /// Display name
    pub name: String,
    /// File format version
    #[serde(default = "current_format")]
    pub format: String,
    /// Geometry and surface
    #[serde(default)]
    pub params: StadiumParams,
}

impl StadiumPresetFile {
    /// Build the stadium, rejecting impossible geometry
    pub fn build(&self) -> PresetResult<StadiumBody> {
        StadiumBody::try_new(self.params).map_err(|e| PresetError::Invalid(format!("{}: {}", self.name, e)))
    }
}

fn layer(radius: f64, height: f64, recoil: (f64, f64), cor: f64, drag: f64, mass: f64, inertia: f64) -> Layer {
    Layer {
        radius: Meters::new(radius),
        height: Meters::new(height),
        mass: Kilograms::new(mass),
        moment_of_inertia: KilogramSquareMeters::new(inertia),
        coefficient_of_restitution: Scalar::new(cor),
        rotational_drag_coefficient: Scalar::new(drag),
        recoil: RecoilDistribution::new(recoil.0, recoil.1),
    }
}

fn disc(radius: f64, height: f64, mass: f64, inertia_factor: f64, drag: f64) -> Disc {
    let radius = Meters::new(radius);
    let mass = Kilograms::new(mass);
    Disc {
        radius,
        height: Meters::new(height),
        mass,
        moment_of_inertia: inertia_factor * (mass * radius * radius),
        rotational_drag_coefficient: Scalar::new(drag),
    }
}

fn driver(radius: f64, height: f64, mass: f64, inertia: f64, drag: f64, friction: f64) -> Driver {
    Driver {
        radius: Meters::new(radius),
        upper_radius: Meters::new(0.012),
        height: Meters::new(height),
        mass: Kilograms::new(mass),
        moment_of_inertia: KilogramSquareMeters::new(inertia),
        rotational_drag_coefficient: Scalar::new(drag),
        coefficient_of_friction: Scalar::new(friction),
    }
}

/// Built-in layers
pub fn layers() -> Vec<(&'static str, Layer)> {
    vec![
        ("Standard", Layer::default()),
        ("Wide", layer(0.03, 0.01, (1.1, 0.12), 0.8, 0.005, 0.024, 1.6e-5)),
        ("Tall", layer(0.025, 0.012, (0.9, 0.1), 0.85, 0.0055, 0.023, 1.3e-5)),
        ("Light", layer(0.025, 0.01, (1.0, 0.08), 0.75, 0.004, 0.018, 1.0e-5)),
        ("Heavy", layer(0.025, 0.01, (1.3, 0.15), 0.9, 0.006, 0.035, 1.8e-5)),
    ]
}

/// Built-in discs
pub fn discs() -> Vec<(&'static str, Disc)> {
    vec![
        ("Standard", Disc::default()),
        ("Wide", disc(0.03, 0.01, 0.030, 0.7, 0.12 * 0.006)),
        ("Compact", disc(0.017, 0.01, 0.025, 0.65, 0.09 * 0.0045)),
        ("Light", disc(0.015, 0.008, 0.020, 0.6, 0.08 * 0.004)),
        ("Heavy", disc(0.02, 0.012, 0.035, 0.8, 0.15 * 0.007)),
    ]
}

/// Built-in drivers
pub fn drivers() -> Vec<(&'static str, Driver)> {
    vec![
        ("Standard", Driver::default()),
        ("Wide", driver(0.0025, 0.015, 0.006, 0.5 * 0.006 * 0.0025 * 0.0015, 0.12 * 0.006, 0.25)),
        ("Tall", driver(0.002, 0.02, 0.007, 0.6 * 0.007 * 0.002 * 0.002, 0.1 * 0.007, 0.20)),
        ("Light", driver(0.0015, 0.01, 0.004, 0.4 * 0.004 * 0.0015 * 0.001, 0.08 * 0.004, 0.18)),
        ("High Friction", driver(0.002, 0.015, 0.005, 0.5 * 0.005 * 0.002 * 0.0015, 0.1 * 0.005, 0.35)),
    ]
}

/// Built-in blades, one per layer with the disc and driver of the same slot
pub fn blades() -> Vec<BladePreset> {
    layers()
        .into_iter()
        .zip(discs())
        .zip(drivers())
        .map(|(((name, layer), (_, disc)), (_, driver))| BladePreset {
            name: name.to_string(),
            format: current_format(),
            layer,
            disc,
            driver,
        })
        .collect()
}

/// Built-in stadiums
pub fn stadiums() -> Vec<StadiumPreset> {
    let stadium = |name, radius, curvature, friction| StadiumPreset {
        name,
        params: StadiumParams {
            center: LengthVector::zero(),
            radius: Meters::new(radius),
            curvature: Scalar::new(curvature),
            coefficient_of_friction: Scalar::new(friction),
        },
    };
    vec![
        StadiumPreset {
            name: "Standard",
            params: StadiumParams::default(),
        },
        stadium("Shallow", 1.5, 0.05, 0.30),
        stadium("Deep", 0.8, 0.25, 0.40),
    ]
}

/// Reads and writes presets stored as `<dir>/<name>.json`
#[derive(Debug, Clone)]
pub struct PresetLoader {
    dir: PathBuf,
}

impl PresetLoader {
    /// Create a loader rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PresetLoader { dir: dir.into() }
    }

    /// Directory presets are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PresetResult<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(PresetError::Invalid(format!("Preset name {:?} is not a valid file name", name)));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }

    fn read(&self, name: &str) -> PresetResult<String> {
        let path = self.path_for(name)?;
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PresetError::NotFound(name.to_string()),
            _ => PresetError::Io(e),
        })
    }

    /// Load and validate `<dir>/<name>.json` as a blade preset
    pub fn load_blade(&self, name: &str) -> PresetResult<BladePreset> {
        let preset: BladePreset = serde_json::from_str(&self.read(name)?)?;
        preset.validate()?;
        log::debug!("Loaded blade preset {} from {}", preset.name, self.dir.display());
        Ok(preset)
    }

    /// Load `<dir>/<name>.json` as a stadium preset
    pub fn load_stadium(&self, name: &str) -> PresetResult<StadiumPresetFile> {
        let preset: StadiumPresetFile = serde_json::from_str(&self.read(name)?)?;
        check_format(&preset.name, &preset.format)?;
        preset
            .params
            .validate()
            .map_err(|e| PresetError::Invalid(format!("{}: {}", preset.name, e)))?;
        log::debug!("Loaded stadium preset {} from {}", preset.name, self.dir.display());
        Ok(preset)
    }

    /// Load a blade from disk, falling back to the built-in catalogue
    pub fn find_blade(&self, name: &str) -> PresetResult<BladePreset> {
        match self.load_blade(name) {
            Err(PresetError::NotFound(_)) => blades()
                .into_iter()
                .find(|preset| preset.name == name)
                .ok_or_else(|| PresetError::NotFound(name.to_string())),
            other => other,
        }
    }

    /// Validate `preset` and write it to `<dir>/<file_name>.json`
    pub fn save_blade(&self, file_name: &str, preset: &BladePreset) -> PresetResult<PathBuf> {
        preset.validate()?;
        let path = self.path_for(file_name)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(preset)?)?;
        log::info!("Saved blade preset {} to {}", preset.name, path.display());
        Ok(path)
    }
}
