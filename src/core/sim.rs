use crate::config::{self, SimConfig};
use crate::core::bounds::Bounds;
use crate::core::neutron::{self, Containment};
use crate::core::nucleus::FissionParams;
use crate::core::particle::{Particle, ParticleKind, NEUTRON_RADIUS};
use crate::core::population::{CullCounts, Population};
use crate::core::reaction;
use crate::core::vector::{self, Vec2};
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

/// Speed of the seed neutron placed by `reset`.
pub const SEED_NEUTRON_SPEED: f64 = 5.0;
/// Horizontal distance of the seed neutron left of the centre line.
pub const SEED_NEUTRON_OFFSET: f64 = 300.0;
/// y coordinate of the first lattice row.
pub const LATTICE_TOP: f64 = 40.0;
/// Largest lattice `reset` will build.
pub const MAX_LATTICE_NUCLEI: usize = 1_000_000;

/// Per-tick counters returned by [`Simulation::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Neutron/nucleus overlaps found this tick.
    pub contacts: usize,
    /// Contacts that passed the reaction gate.
    pub fissions: usize,
    /// Neutrons that left containment this tick.
    pub escaped: usize,
    /// Neutrons released by this tick's fissions.
    pub spawned_neutrons: usize,
    /// Removals per list (out of bounds or consumed).
    pub culled: CullCounts,
}

/// Running totals since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainStats {
    pub ticks: u64,
    pub fissions: u64,
    pub neutrons_spawned: u64,
    pub escaped: u64,
    pub peak_neutrons: usize,
}

/// What the renderer needs to draw one particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleView {
    pub position: Vec2,
    pub radius: f64,
    pub label: &'static str,
    pub kind: ParticleKind,
}

/// Chain-reaction controller: owns configuration, bounds, the three
/// populations and the random source. One `tick` is one frame.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    bounds: Bounds,
    population: Population,
    rng: StdRng,
    /// Seeds the seed-neutron aim when `config.seed` is unset, so resets
    /// without a seed still rebuild the same world.
    reset_seed: u64,
    stats: ChainStats,
}

impl Simulation {
    /// Validate `config` and build the initial lattice and seed neutron.
    ///
    /// With `config.seed` set, every reset replays the same random stream.
    /// Without one, resets still rebuild the same initial state and only the
    /// fission draws differ between runs.
    pub fn new(config: SimConfig, bounds: Bounds) -> Result<Self> {
        config.validate()?;
        let rng = make_rng(config.seed);
        let reset_seed = config.seed.unwrap_or_else(rng_seed);
        let mut sim = Self {
            config,
            bounds,
            population: Population::new(),
            rng,
            reset_seed,
            stats: ChainStats::default(),
        };
        sim.reset()?;
        Ok(sim)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn stats(&self) -> ChainStats {
        self.stats
    }

    pub fn ticks(&self) -> u64 {
        self.stats.ticks
    }

    /// Current per-tick reaction probability derived from the configuration.
    pub fn reaction_probability_per_tick(&self) -> f64 {
        self.config.reaction_probability_per_tick()
    }

    /// Discard all particles and rebuild the initial state.
    ///
    /// Uranium nuclei fill the right half of the bounds on a grid of
    /// `lattice_spacing`, starting at `(width/2, 40)`. One neutron starts
    /// 300 units left of centre, aimed rightward within the configured spread.
    ///
    /// Errors: `Error::InvalidParam` if the lattice would exceed
    /// [`MAX_LATTICE_NUCLEI`]; the current state is then left untouched.
    pub fn reset(&mut self) -> Result<()> {
        let spacing = self.config.lattice_spacing;
        let (cols, rows) = lattice_dims(&self.bounds, spacing)?;

        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let mut aim_rng = StdRng::seed_from_u64(self.config.seed.unwrap_or(self.reset_seed));
        self.population.clear();
        self.stats = ChainStats::default();

        let centre = self.bounds.center();
        for i in 0..cols {
            let x = centre.x + i as f64 * spacing;
            for j in 0..rows {
                let y = LATTICE_TOP + j as f64 * spacing;
                self.population.insert(Particle::uranium(Vec2::new(x, y))?);
            }
        }

        let mut sx = centre.x - SEED_NEUTRON_OFFSET;
        if sx < NEUTRON_RADIUS {
            sx = self.bounds.width / 4.0;
        }
        let spread = self.config.seed_spread_degrees.to_radians();
        let aim = if spread > 0.0 {
            aim_rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        let velocity = vector::rotate(Vec2::new(SEED_NEUTRON_SPEED, 0.0), aim);
        self.population
            .insert(Particle::neutron(Vec2::new(sx, centre.y), velocity)?);
        self.stats.peak_neutrons = self.population.neutrons().len();

        info!(
            fissile = self.population.fissile().len(),
            width = self.bounds.width,
            height = self.bounds.height,
            "simulation reset"
        );
        Ok(())
    }

    /// Advance one frame.
    ///
    /// Order: move every particle (neutrons also run the containment policy),
    /// collect contacts, react, append spawned particles, then cull consumed
    /// and out-of-bounds particles.
    ///
    /// A tick that fails leaves particles, RNG and statistics as they were
    /// before the call.
    pub fn tick(&mut self) -> Result<TickReport> {
        let params = FissionParams::new(
            self.config.neutron_speed,
            self.config.reaction_probability_per_tick(),
        )?;
        let population = self.population.clone();
        let rng = self.rng.clone();
        let report = match self.step(&params) {
            Ok(report) => report,
            Err(e) => {
                self.population = population;
                self.rng = rng;
                return Err(e);
            }
        };

        self.stats.ticks += 1;
        self.stats.fissions += report.fissions as u64;
        self.stats.neutrons_spawned += report.spawned_neutrons as u64;
        self.stats.escaped += report.escaped as u64;
        self.stats.peak_neutrons = self
            .stats
            .peak_neutrons
            .max(self.population.neutrons().len());

        if report.fissions > 0 {
            debug!(
                tick = self.stats.ticks,
                fissions = report.fissions,
                neutrons = self.population.neutrons().len(),
                "fission"
            );
        }
        Ok(report)
    }

    fn step(&mut self, params: &FissionParams) -> Result<TickReport> {
        let mut report = TickReport::default();

        for p in self.population.iter_mut() {
            p.advance();
            if neutron::contain(p, &self.bounds, &mut self.rng) == Containment::Escaped {
                report.escaped += 1;
            }
        }

        let contacts =
            reaction::detect_contacts(self.population.neutrons(), self.population.fissile());
        report.contacts = contacts.len();
        let outcome = reaction::react(
            self.population.neutrons(),
            self.population.fissile(),
            &contacts,
            params,
            &mut self.rng,
        )?;
        report.fissions = outcome.fissions;
        report.spawned_neutrons = outcome.spawned_neutrons.len();

        for p in outcome
            .spawned_neutrons
            .into_iter()
            .chain(outcome.spawned_products)
        {
            self.population.insert(p);
        }
        report.culled = self.population.cull(&self.bounds, &outcome.consumed);
        Ok(report)
    }

    /// Run `ticks` frames back to back.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Render feed: every particle in draw order (products, neutrons, fissile).
    pub fn snapshot(&self) -> Vec<ParticleView> {
        self.population
            .iter()
            .map(|p| ParticleView {
                position: p.position,
                radius: p.radius,
                label: p.label(),
                kind: p.kind,
            })
            .collect()
    }

    /// Add a particle to the running simulation (e.g. a neutron fired by the user).
    pub fn insert(&mut self, p: Particle) {
        self.population.insert(p);
    }

    /// Replace the whole configuration. Lattice spacing and seed take effect
    /// at the next reset; a rejected config leaves the current one in place.
    pub fn set_config(&mut self, config: SimConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_neutron_speed(&mut self, v: f64) -> Result<()> {
        config::validate_neutron_speed(v)?;
        self.config.neutron_speed = v;
        Ok(())
    }

    /// Takes effect at the next reset.
    pub fn set_lattice_spacing(&mut self, v: f64) -> Result<()> {
        config::validate_lattice_spacing(v)?;
        self.config.lattice_spacing = v;
        Ok(())
    }

    pub fn set_reaction_probability(&mut self, p_per_second: f64) -> Result<()> {
        config::validate_reaction_probability(p_per_second)?;
        self.config.reaction_probability_per_second = p_per_second;
        Ok(())
    }

    /// Viewport resize.
    pub fn set_bounds(&mut self, width: f64, height: f64) -> Result<()> {
        self.bounds = Bounds::new(width, height)?;
        Ok(())
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng_seed()),
    }
}

fn rng_seed() -> u64 {
    rng().random()
}

/// Columns and rows of the initial lattice, rejecting oversized ones.
fn lattice_dims(bounds: &Bounds, spacing: f64) -> Result<(usize, usize)> {
    let cols = ((bounds.width - bounds.center().x) / spacing).ceil().max(0.0);
    let rows = ((bounds.height - LATTICE_TOP) / spacing).ceil().max(0.0);
    let cap = MAX_LATTICE_NUCLEI as f64;
    if cols > cap || rows > cap || cols * rows > cap {
        return Err(Error::InvalidParam(format!(
            "lattice of {cols} x {rows} nuclei exceeds {MAX_LATTICE_NUCLEI}"
        )));
    }
    Ok((cols as usize, rows as usize))
}
