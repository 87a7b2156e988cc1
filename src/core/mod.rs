//! Core simulation data structures and the chain-reaction engine.
//!
//! Leaf-first: `vector` and `bounds` are plain value types, `particle` holds
//! the shared kinematic record, `neutron` and `nucleus` carry the
//! per-variant rules, `population` and `reaction` manage the lists, and
//! `sim` drives one tick at a time.

pub mod bounds;
pub mod neutron;
pub mod nucleus;
pub mod particle;
pub mod population;
pub mod reaction;
pub mod sim;
pub mod vector;

pub use bounds::Bounds;
pub use particle::{Particle, ParticleKind, Species};
pub use population::Population;
pub use sim::{ChainStats, ParticleView, Simulation, TickReport};
pub use vector::Vec2;
