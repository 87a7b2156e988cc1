//! Real-time 2D neutron chain-reaction simulation.
//!
//! Free neutrons drift through a lattice of uranium nuclei; contacts fission
//! with a configurable per-second probability, releasing three neutrons and
//! two fragments. The crate is only the engine: a front-end drives
//! [`core::Simulation::tick`] once per frame and draws
//! [`core::Simulation::snapshot`].
//!
//! ```
//! use fissionsim::config::SimConfig;
//! use fissionsim::core::{Bounds, Simulation};
//!
//! let config = SimConfig { seed: Some(7), ..Default::default() };
//! let mut sim = Simulation::new(config, Bounds::new(800.0, 600.0)?)?;
//! for _ in 0..60 {
//!     sim.tick()?;
//! }
//! assert!(!sim.snapshot().is_empty());
//! # Ok::<(), fissionsim::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::config::SimConfig;
pub use crate::core::Simulation;
pub use crate::error::{Error, Result};
