use crate::core::bounds::Bounds;
use crate::core::particle::{Particle, ParticleKind};

/// Indices consumed by fission during one tick, per list.
///
/// Indices refer to positions before any of this tick's removals; the two
/// lists are culled independently so one never shifts the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consumed {
    pub neutrons: Vec<usize>,
    pub fissile: Vec<usize>,
}

impl Consumed {
    pub fn is_empty(&self) -> bool {
        self.neutrons.is_empty() && self.fissile.is_empty()
    }
}

/// How many particles one cull pass removed from each list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullCounts {
    pub neutrons: usize,
    pub fissile: usize,
    pub products: usize,
}

/// The three managed particle collections.
///
/// Insertion order is meaningful: the reaction scan walks each list from the
/// most recently added element backwards.
#[derive(Debug, Clone, Default)]
pub struct Population {
    neutrons: Vec<Particle>,
    fissile: Vec<Particle>,
    products: Vec<Particle>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.neutrons.clear();
        self.fissile.clear();
        self.products.clear();
    }

    /// Insert a particle into the list that matches its kind.
    pub fn insert(&mut self, p: Particle) {
        match p.kind {
            ParticleKind::Neutron { .. } => self.neutrons.push(p),
            ParticleKind::Fissile => self.fissile.push(p),
            ParticleKind::Product => self.products.push(p),
        }
    }

    pub fn neutrons(&self) -> &[Particle] {
        &self.neutrons
    }

    pub fn fissile(&self) -> &[Particle] {
        &self.fissile
    }

    pub fn products(&self) -> &[Particle] {
        &self.products
    }

    /// Every particle in render order: products, then neutrons, then fissile nuclei.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.products
            .iter()
            .chain(self.neutrons.iter())
            .chain(self.fissile.iter())
    }

    /// Same order as [`Population::iter`], mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.products
            .iter_mut()
            .chain(self.neutrons.iter_mut())
            .chain(self.fissile.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.neutrons.len() + self.fissile.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove everything outside `bounds` plus the `consumed` indices.
    ///
    /// Out-of-bounds removal is a centre test and ignores any reaction
    /// outcome. Survivors keep their relative order.
    pub fn cull(&mut self, bounds: &Bounds, consumed: &Consumed) -> CullCounts {
        CullCounts {
            neutrons: cull_list(&mut self.neutrons, bounds, &consumed.neutrons),
            fissile: cull_list(&mut self.fissile, bounds, &consumed.fissile),
            products: cull_list(&mut self.products, bounds, &[]),
        }
    }
}

fn cull_list(list: &mut Vec<Particle>, bounds: &Bounds, consumed: &[usize]) -> usize {
    let mut consumed = consumed.to_vec();
    consumed.sort_unstable();
    consumed.dedup();

    let before = list.len();
    let mut idx = 0usize;
    list.retain(|p| {
        let keep = bounds.contains(&p.position) && consumed.binary_search(&idx).is_err();
        idx += 1;
        keep
    });
    before - list.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particle::Species;
    use crate::core::vector::Vec2;
    use crate::error::Result;

    fn bounds() -> Bounds {
        Bounds {
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn insert_routes_by_kind() -> Result<()> {
        let mut pop = Population::new();
        pop.insert(Particle::uranium(Vec2::new(400.0, 40.0))?);
        pop.insert(Particle::neutron(Vec2::new(100.0, 300.0), Vec2::new(5.0, 0.0))?);
        pop.insert(Particle::new(Species::Krypton, Vec2::zeros(), Vec2::new(1.0, 1.0))?);
        assert_eq!(pop.fissile().len(), 1);
        assert_eq!(pop.neutrons().len(), 1);
        assert_eq!(pop.products().len(), 1);
        assert_eq!(pop.len(), 3);
        let labels: Vec<_> = pop.iter().map(Particle::label).collect();
        assert_eq!(labels, ["Kr", "n", "U"]);
        Ok(())
    }

    #[test]
    fn cull_removes_out_of_bounds() -> Result<()> {
        let mut pop = Population::new();
        pop.insert(Particle::neutron(Vec2::new(-1.0, 300.0), Vec2::new(5.0, 0.0))?);
        pop.insert(Particle::neutron(Vec2::new(400.0, 300.0), Vec2::new(5.0, 0.0))?);
        pop.insert(Particle::neutron(Vec2::new(801.0, 300.0), Vec2::new(5.0, 0.0))?);
        pop.insert(Particle::new(Species::Barium, Vec2::new(10.0, 601.0), Vec2::new(0.0, 1.0))?);
        let counts = pop.cull(&bounds(), &Consumed::default());
        assert_eq!(
            counts,
            CullCounts {
                neutrons: 2,
                fissile: 0,
                products: 1
            }
        );
        assert_eq!(pop.neutrons().len(), 1);
        assert_eq!(pop.neutrons()[0].position.x, 400.0);
        Ok(())
    }

    #[test]
    fn consumed_indices_are_per_list() -> Result<()> {
        let mut pop = Population::new();
        for x in [400.0, 500.0, 600.0] {
            pop.insert(Particle::uranium(Vec2::new(x, 40.0))?);
            pop.insert(Particle::neutron(Vec2::new(x, 300.0), Vec2::new(5.0, 0.0))?);
        }
        let consumed = Consumed {
            neutrons: vec![2, 0, 2],
            fissile: vec![1],
        };
        pop.cull(&bounds(), &consumed);
        let nx: Vec<f64> = pop.neutrons().iter().map(|p| p.position.x).collect();
        let ux: Vec<f64> = pop.fissile().iter().map(|p| p.position.x).collect();
        assert_eq!(nx, [500.0]);
        assert_eq!(ux, [400.0, 600.0]);
        Ok(())
    }
}
