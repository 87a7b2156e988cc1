use crate::core::vector::{self, Vec2};
use crate::error::{Error, Result};

/// Fixed neutron radius (neutrons are not sized by mass).
pub const NEUTRON_RADIUS: f64 = 5.0;
/// Neutron mass.
pub const NEUTRON_MASS: f64 = 1.0;

/// Particle species known to the engine.
///
/// The species fixes mass, label and draw radius, and decides which reaction
/// rule (if any) applies; see [`crate::core::nucleus::rule_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Neutron,
    /// Uranium-235 analogue, the only fissile species.
    Uranium,
    /// Light fission product (krypton-89 analogue).
    Krypton,
    /// Heavy fission product (barium-144 analogue).
    Barium,
}

impl Species {
    pub const fn mass(self) -> f64 {
        match self {
            Species::Neutron => NEUTRON_MASS,
            Species::Uranium => 235.0,
            Species::Krypton => 89.0,
            Species::Barium => 144.0,
        }
    }

    /// Short label drawn inside the particle.
    pub const fn label(self) -> &'static str {
        match self {
            Species::Neutron => "n",
            Species::Uranium => "U",
            Species::Krypton => "Kr",
            Species::Barium => "Ba",
        }
    }

    /// Neutrons use a fixed radius; nuclei use `mass / 10`.
    pub fn radius(self) -> f64 {
        match self {
            Species::Neutron => NEUTRON_RADIUS,
            nucleus => nucleus.mass() / 10.0,
        }
    }
}

/// Variant tag carried by every particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Free neutron. `speed` is the magnitude of the velocity it was created
    /// with and never changes afterwards.
    Neutron { speed: f64, escaped: bool },
    /// Nucleus that can undergo fission.
    Fissile,
    /// Fission product; inert.
    Product,
}

/// A moving circle with mass: the shared kinematic record of every variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radius (> 0).
    pub radius: f64,
    /// Mass (> 0).
    pub mass: f64,
    pub species: Species,
    pub kind: ParticleKind,
}

impl Particle {
    /// Create a particle of `species` after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if position or velocity is non-finite, or a
    ///   neutron is created at rest (its containment heuristic divides by speed).
    pub fn new(species: Species, position: Vec2, velocity: Vec2) -> Result<Self> {
        if !vector::is_finite(&position) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !vector::is_finite(&velocity) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        let kind = match species {
            Species::Neutron => {
                let speed = velocity.magnitude();
                if speed <= 0.0 {
                    return Err(Error::InvalidParam("neutron speed must be > 0".into()));
                }
                ParticleKind::Neutron {
                    speed,
                    escaped: false,
                }
            }
            Species::Uranium => ParticleKind::Fissile,
            Species::Krypton | Species::Barium => ParticleKind::Product,
        };
        Ok(Self {
            position,
            velocity,
            radius: species.radius(),
            mass: species.mass(),
            species,
            kind,
        })
    }

    /// Shorthand for a free neutron.
    pub fn neutron(position: Vec2, velocity: Vec2) -> Result<Self> {
        Self::new(Species::Neutron, position, velocity)
    }

    /// Shorthand for a resting uranium nucleus.
    pub fn uranium(position: Vec2) -> Result<Self> {
        Self::new(Species::Uranium, position, Vec2::zeros())
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.species.label()
    }

    /// Advance one frame: `position += velocity`.
    #[inline]
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// True for a neutron that has left containment.
    #[inline]
    pub fn is_escaped(&self) -> bool {
        matches!(self.kind, ParticleKind::Neutron { escaped: true, .. })
    }
}
