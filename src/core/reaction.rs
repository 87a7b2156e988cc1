//! Per-tick collision and reaction pass.
//!
//! Two phases so that no list is mutated while it is being scanned:
//! 1. collect neutron/fissile contacts by index;
//! 2. run the fission rule for every contact and gather spawned particles
//!    and consumed indices into a [`ReactionOutcome`] that the controller
//!    applies afterwards.

use crate::core::nucleus::{self, FissionParams};
use crate::core::particle::Particle;
use crate::core::population::Consumed;
use crate::core::vector::{self, Vec2};
use crate::error::Result;
use rand::Rng;

/// A neutron overlapping a fissile nucleus, by list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub neutron: usize,
    pub nucleus: usize,
}

/// Everything a reaction pass wants to change, applied after the scan.
#[derive(Debug, Clone, Default)]
pub struct ReactionOutcome {
    pub consumed: Consumed,
    pub spawned_neutrons: Vec<Particle>,
    pub spawned_products: Vec<Particle>,
    pub fissions: usize,
}

/// Strict circle overlap via squared distance; tangency does not count.
#[inline]
pub fn overlaps(a: &Vec2, ra: f64, b: &Vec2, rb: f64) -> bool {
    let reach = ra + rb;
    vector::distance_squared(a, b) < reach * reach
}

/// Collect contacts: each neutron (newest first) pairs with the first
/// fissile nucleus (newest first) it overlaps, and with no other.
pub fn detect_contacts(neutrons: &[Particle], fissile: &[Particle]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    if neutrons.is_empty() || fissile.is_empty() {
        return contacts;
    }
    for (n, neutron) in neutrons.iter().enumerate().rev() {
        let hit = fissile
            .iter()
            .enumerate()
            .rev()
            .find(|(_, u)| overlaps(&neutron.position, neutron.radius, &u.position, u.radius));
        if let Some((u, _)) = hit {
            contacts.push(Contact {
                neutron: n,
                nucleus: u,
            });
        }
    }
    contacts
}

/// Run the reaction rule for each contact, in detection order.
///
/// A nucleus reached by several neutrons in one tick is evaluated once per
/// contact.
pub fn react<R: Rng + ?Sized>(
    neutrons: &[Particle],
    fissile: &[Particle],
    contacts: &[Contact],
    params: &FissionParams,
    rng: &mut R,
) -> Result<ReactionOutcome> {
    let mut out = ReactionOutcome::default();
    for c in contacts {
        let (target, neutron) = (&fissile[c.nucleus], &neutrons[c.neutron]);
        let Some(products) = nucleus::fission(target, neutron, params, rng)? else {
            continue;
        };
        out.consumed.neutrons.push(c.neutron);
        out.consumed.fissile.push(c.nucleus);
        out.spawned_neutrons.extend(products.neutrons);
        out.spawned_products.push(products.light);
        out.spawned_products.push(products.heavy);
        out.fissions += 1;
    }
    Ok(out)
}
