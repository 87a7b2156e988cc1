//! Engine configuration.
//!
//! In an interactive front-end these values come from sliders; headless runs
//! load them from YAML. Either way they are validated here, never inside a
//! tick.
//!
//! ```yaml
//! neutron_speed: 40.0                    # scale of spawned-neutron speeds
//! lattice_spacing: 100.0                 # grid spacing of the uranium lattice
//! reaction_probability_per_second: 0.99  # chance a sustained contact reacts within one second
//! frame_rate: 60.0                       # nominal ticks per second
//! seed_spread_degrees: 22.5              # seed neutron aim spread (+/-)
//! seed: 42                               # omit for a nondeterministic run
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Smallest accepted lattice spacing.
pub const MIN_LATTICE_SPACING: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Scale for spawned-neutron speeds (> 0).
    pub neutron_speed: f64,
    /// Grid spacing for the initial uranium lattice (>= 1).
    pub lattice_spacing: f64,
    /// Probability in (0, 1) that a contact held for one second reacts.
    pub reaction_probability_per_second: f64,
    /// Nominal frame rate used to convert the per-second probability.
    pub frame_rate: f64,
    /// Half-width of the random aim of the seed neutron, in degrees.
    pub seed_spread_degrees: f64,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            neutron_speed: 40.0,
            lattice_spacing: 100.0,
            reaction_probability_per_second: 0.99,
            frame_rate: 60.0,
            seed_spread_degrees: 22.5,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Check every field; returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        validate_neutron_speed(self.neutron_speed)?;
        validate_lattice_spacing(self.lattice_spacing)?;
        validate_reaction_probability(self.reaction_probability_per_second)?;
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(Error::InvalidParam("frame_rate must be finite and > 0".into()));
        }
        if !(0.0..=180.0).contains(&self.seed_spread_degrees) {
            return Err(Error::InvalidParam(
                "seed_spread_degrees must lie in [0, 180]".into(),
            ));
        }
        Ok(())
    }

    /// Reaction probability per tick: `1 - (1 - p_s)^(1 / frame_rate)`.
    ///
    /// Keeps the expected per-second reaction rate independent of the frame rate.
    pub fn reaction_probability_per_tick(&self) -> f64 {
        per_tick_probability(self.reaction_probability_per_second, self.frame_rate)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        let cfg: SimConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_yaml_reader(BufReader::new(file))
    }
}

/// Convert a per-second probability to a per-tick one at `rate` ticks per second.
pub fn per_tick_probability(p_per_second: f64, rate: f64) -> f64 {
    1.0 - (1.0 - p_per_second).powf(1.0 / rate)
}

pub fn validate_neutron_speed(v: f64) -> Result<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(Error::InvalidParam("neutron_speed must be finite and > 0".into()));
    }
    Ok(())
}

pub fn validate_lattice_spacing(v: f64) -> Result<()> {
    if !v.is_finite() || v < MIN_LATTICE_SPACING {
        return Err(Error::InvalidParam(format!(
            "lattice_spacing must be finite and >= {MIN_LATTICE_SPACING}"
        )));
    }
    Ok(())
}

pub fn validate_reaction_probability(v: f64) -> Result<()> {
    if v.is_nan() || v <= 0.0 || v >= 1.0 {
        return Err(Error::InvalidParam(
            "reaction_probability_per_second must lie in (0, 1)".into(),
        ));
    }
    Ok(())
}
