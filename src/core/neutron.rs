//! Containment-vs-escape policy for free neutrons.
//!
//! This is a cheap stand-in for a containment vessel, not boundary physics:
//! each tick a neutron that is still contained rolls against `5 / speed`. On
//! success it bounces off any edge it is crossing; otherwise, if it is
//! crossing an edge, it escapes for good and is only removed by culling.

use crate::core::bounds::Bounds;
use crate::core::particle::{Particle, ParticleKind};
use rand::Rng;

/// Numerator of the per-tick containment probability `5 / speed`.
pub const CONTAINMENT_FACTOR: f64 = 5.0;

/// What the containment policy did to a neutron this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Roll succeeded; any crossed axis was reflected.
    Checked,
    /// Roll failed (or neutron already free) and nothing changed.
    Skipped,
    /// Roll failed while crossing an edge: the neutron is now escaped.
    Escaped,
}

/// Probability that a contained neutron of `speed` bounces this tick.
#[inline]
pub fn containment_probability(speed: f64) -> f64 {
    (CONTAINMENT_FACTOR / speed).min(1.0)
}

/// One containment roll: true means "check the walls and reflect".
#[inline]
pub fn containment_roll<R: Rng + ?Sized>(speed: f64, rng: &mut R) -> bool {
    rng.random::<f64>() < CONTAINMENT_FACTOR / speed
}

/// Apply the containment policy to `p` after it has moved.
///
/// Non-neutrons are left untouched and report `Skipped`.
pub fn contain<R: Rng + ?Sized>(p: &mut Particle, bounds: &Bounds, rng: &mut R) -> Containment {
    let ParticleKind::Neutron { speed, escaped } = p.kind else {
        return Containment::Skipped;
    };
    if escaped {
        return Containment::Skipped;
    }
    if containment_roll(speed, rng) {
        if bounds.crosses_x(&p.position, p.radius) {
            p.velocity.x = -p.velocity.x;
        }
        if bounds.crosses_y(&p.position, p.radius) {
            p.velocity.y = -p.velocity.y;
        }
        return Containment::Checked;
    }
    if bounds.crosses_x(&p.position, p.radius) || bounds.crosses_y(&p.position, p.radius) {
        p.kind = ParticleKind::Neutron {
            speed,
            escaped: true,
        };
        return Containment::Escaped;
    }
    Containment::Skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vector::Vec2;
    use crate::error::Result;
    use rand::{rngs::StdRng, SeedableRng};

    fn bounds() -> Bounds {
        Bounds {
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn slow_neutron_always_bounces() -> Result<()> {
        // speed 2 < 5 => probability saturates at 1
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let mut n = Particle::neutron(Vec2::new(798.0, 300.0), Vec2::new(2.0, 0.0))?;
            assert_eq!(contain(&mut n, &bounds(), &mut rng), Containment::Checked);
            assert_eq!(n.velocity.x, -2.0);
            assert!(!n.is_escaped());
        }
        Ok(())
    }

    #[test]
    fn corner_reflects_both_axes() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(2);
        let mut n = Particle::neutron(Vec2::new(2.0, 599.0), Vec2::new(-3.0, 4.0))?;
        contain(&mut n, &bounds(), &mut rng);
        assert_eq!(n.velocity, Vec2::new(3.0, -4.0));
        Ok(())
    }

    #[test]
    fn interior_neutron_never_escapes() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let mut n = Particle::neutron(Vec2::new(400.0, 300.0), Vec2::new(1000.0, 0.0))?;
        for _ in 0..100 {
            contain(&mut n, &bounds(), &mut rng);
        }
        assert!(!n.is_escaped());
        assert_eq!(n.velocity, Vec2::new(1000.0, 0.0));
        Ok(())
    }

    #[test]
    fn escaped_neutron_never_bounces_again() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(4);
        let mut n = Particle::neutron(Vec2::new(798.0, 300.0), Vec2::new(1.0e6, 0.0))?;
        // 5 / 1e6: practically always fails the roll
        assert_eq!(contain(&mut n, &bounds(), &mut rng), Containment::Escaped);
        assert!(n.is_escaped());
        for _ in 0..100 {
            assert_eq!(contain(&mut n, &bounds(), &mut rng), Containment::Skipped);
        }
        assert_eq!(n.velocity.x, 1.0e6);
        Ok(())
    }

    #[test]
    fn bounce_frequency_matches_five_over_speed() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(20240601);
        let speed = 40.0;
        let trials = 100_000;
        let mut reflected = 0usize;
        let mut escaped = 0usize;
        for _ in 0..trials {
            let mut n = Particle::neutron(Vec2::new(799.0, 300.0), Vec2::new(speed, 0.0))?;
            match contain(&mut n, &bounds(), &mut rng) {
                Containment::Checked => reflected += 1,
                Containment::Escaped => escaped += 1,
                Containment::Skipped => unreachable!("neutron is crossing the edge"),
            }
        }
        let f_reflect = reflected as f64 / trials as f64;
        let f_escape = escaped as f64 / trials as f64;
        let p = containment_probability(speed);
        assert!((f_reflect - p).abs() < 0.005, "reflect freq {f_reflect} vs {p}");
        assert!((f_escape - (1.0 - p)).abs() < 0.005, "escape freq {f_escape}");
        Ok(())
    }
}
