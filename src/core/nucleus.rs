//! Reaction rules for nuclei.
//!
//! Whether a nucleus can react is looked up from its species rather than
//! dispatched through the particle itself: products have no rule, uranium
//! has the fission rule.
//!
//! Fission conserves momentum only through the heavy fragment. The three
//! neutrons and the light fragment get independent random velocities; the
//! heavy fragment takes whatever momentum is left over. That residual scheme
//! is the model, not an approximation error to be corrected.

use crate::core::particle::{Particle, Species};
use crate::core::vector::{self, Vec2};
use crate::error::{Error, Result};
use rand::Rng;
use tracing::trace;

/// Neutrons released per fission.
pub const FISSION_NEUTRONS: usize = 3;
/// Spawned neutron speed range, as fractions of the configured neutron speed.
pub const NEUTRON_SPEED_MIN_FACTOR: f64 = 0.4;
pub const NEUTRON_SPEED_MAX_FACTOR: f64 = 1.6;
/// Speed range of the light fragment (independent of configuration).
pub const LIGHT_PRODUCT_SPEED_MIN: f64 = 1.5;
pub const LIGHT_PRODUCT_SPEED_MAX: f64 = 6.0;

/// Reaction a species undergoes on neutron impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionRule {
    Fission {
        light: Species,
        heavy: Species,
    },
}

/// Rule lookup by species. `None` means the nucleus is inert.
pub fn rule_for(species: Species) -> Option<ReactionRule> {
    match species {
        Species::Uranium => Some(ReactionRule::Fission {
            light: Species::Krypton,
            heavy: Species::Barium,
        }),
        Species::Neutron | Species::Krypton | Species::Barium => None,
    }
}

/// Per-tick inputs to the fission rule, pulled from the current configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FissionParams {
    /// Scale for spawned-neutron speeds.
    pub neutron_speed: f64,
    /// Probability that a contact reacts on this tick.
    pub reaction_probability: f64,
}

impl FissionParams {
    pub fn new(neutron_speed: f64, reaction_probability: f64) -> Result<Self> {
        if !neutron_speed.is_finite() || neutron_speed <= 0.0 {
            return Err(Error::InvalidParam("neutron_speed must be finite and > 0".into()));
        }
        if !(0.0..=1.0).contains(&reaction_probability) {
            return Err(Error::InvalidParam(
                "per-tick reaction probability must lie in [0, 1]".into(),
            ));
        }
        Ok(Self {
            neutron_speed,
            reaction_probability,
        })
    }
}

/// Everything one fission event creates.
#[derive(Debug, Clone)]
pub struct FissionProducts {
    /// The released neutrons, in spawn order.
    pub neutrons: Vec<Particle>,
    pub light: Particle,
    pub heavy: Particle,
}

impl FissionProducts {
    /// Total momentum carried away by every spawned particle.
    pub fn momentum(&self) -> Vec2 {
        self.neutrons
            .iter()
            .chain([&self.light, &self.heavy])
            .map(Particle::momentum)
            .sum()
    }
}

/// Per-tick throttle: accept when a uniform draw in [0,1) does not exceed `p`.
#[inline]
pub fn reaction_gate<R: Rng + ?Sized>(p: f64, rng: &mut R) -> bool {
    rng.random::<f64>() <= p
}

/// Try to react `nucleus` with the colliding `neutron`.
///
/// Returns `Ok(None)` when the nucleus is inert or the per-tick gate rejects
/// the contact, and `Ok(Some(products))` when fission happens; in that case
/// both the nucleus and the neutron are consumed by the caller.
pub fn fission<R: Rng + ?Sized>(
    nucleus: &Particle,
    neutron: &Particle,
    params: &FissionParams,
    rng: &mut R,
) -> Result<Option<FissionProducts>> {
    let Some(ReactionRule::Fission { light, heavy }) = rule_for(nucleus.species) else {
        return Ok(None);
    };
    if !reaction_gate(params.reaction_probability, rng) {
        return Ok(None);
    }

    let incoming = nucleus.momentum() + neutron.momentum();
    let mut outgoing = Vec2::zeros();

    let lo = NEUTRON_SPEED_MIN_FACTOR * params.neutron_speed;
    let hi = NEUTRON_SPEED_MAX_FACTOR * params.neutron_speed;
    let mut neutrons = Vec::with_capacity(FISSION_NEUTRONS);
    for _ in 0..FISSION_NEUTRONS {
        let dir = vector::random_unit(rng);
        let v = nucleus.velocity + dir * rng.random_range(lo..hi);
        let n = Particle::neutron(nucleus.position, v)?;
        outgoing += n.momentum();
        neutrons.push(n);
    }

    let dir = vector::random_unit(rng);
    let v = nucleus.velocity
        + dir * rng.random_range(LIGHT_PRODUCT_SPEED_MIN..LIGHT_PRODUCT_SPEED_MAX);
    let light = Particle::new(light, nucleus.position, v)?;
    outgoing += light.momentum();

    let v = vector::divide(incoming - outgoing, heavy.mass())?;
    let heavy = Particle::new(heavy, nucleus.position, v)?;

    trace!(
        x = nucleus.position.x,
        y = nucleus.position.y,
        "fission"
    );
    Ok(Some(FissionProducts {
        neutrons,
        light,
        heavy,
    }))
}
