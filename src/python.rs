use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::SimConfig;
use crate::core::{Bounds, Simulation};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// FissionSim Python-facing wrapper around the Rust chain-reaction engine.
///
/// The Python side owns the window and drawing; each frame it calls `tick()`
/// and then reads `get_particles()` / `get_labels()` to draw circles.
#[pyclass]
pub struct FissionSim {
    sim: Simulation,
}

#[pymethods]
impl FissionSim {
    /// Create a simulation in a `width` x `height` viewport and reset it.
    ///
    /// Parameters
    /// - width, height: viewport size (floats, > 0)
    /// - neutron_speed: scale of spawned-neutron speeds (> 0)
    /// - lattice_spacing: uranium grid spacing (>= 1)
    /// - reaction_probability: per-second reaction probability in (0, 1)
    /// - frame_rate: nominal ticks per second
    /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (width, height, neutron_speed=40.0, lattice_spacing=100.0, reaction_probability=0.99, frame_rate=60.0, seed=None))]
    fn new(
        width: f64,
        height: f64,
        neutron_speed: f64,
        lattice_spacing: f64,
        reaction_probability: f64,
        frame_rate: f64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = SimConfig {
            neutron_speed,
            lattice_spacing,
            reaction_probability_per_second: reaction_probability,
            frame_rate,
            seed,
            ..Default::default()
        };
        let bounds = Bounds::new(width, height).map_err(py_err)?;
        let sim = Simulation::new(config, bounds).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance `n` frames (releases the GIL during computation).
    #[pyo3(signature = (n=1))]
    fn tick(&mut self, py: Python<'_>, n: u64) -> PyResult<()> {
        py.detach(|| self.sim.run(n)).map_err(py_err)
    }

    /// Rebuild the lattice and seed neutron from the current settings.
    fn reset(&mut self) -> PyResult<()> {
        self.sim.reset().map_err(py_err)
    }

    fn set_neutron_speed(&mut self, v: f64) -> PyResult<()> {
        self.sim.set_neutron_speed(v).map_err(py_err)
    }

    /// Takes effect at the next `reset()`.
    fn set_lattice_spacing(&mut self, v: f64) -> PyResult<()> {
        self.sim.set_lattice_spacing(v).map_err(py_err)
    }

    fn set_reaction_probability(&mut self, p: f64) -> PyResult<()> {
        self.sim.set_reaction_probability(p).map_err(py_err)
    }

    /// Viewport resize.
    fn set_bounds(&mut self, width: f64, height: f64) -> PyResult<()> {
        self.sim.set_bounds(width, height).map_err(py_err)
    }

    /// Return particles as a NumPy array of shape (N, 3): [x, y, radius], float64.
    ///
    /// Row order matches `get_labels()`.
    fn get_particles<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let views = self.sim.snapshot();
        let mut arr = Array2::<f64>::zeros((views.len(), 3));
        for (i, v) in views.iter().enumerate() {
            arr[[i, 0]] = v.position.x;
            arr[[i, 1]] = v.position.y;
            arr[[i, 2]] = v.radius;
        }
        Ok(arr.into_pyarray(py).unbind())
    }

    /// Return particle labels ("n", "U", "Kr", "Ba") in `get_particles()` order.
    fn get_labels(&self) -> Vec<&'static str> {
        self.sim.snapshot().into_iter().map(|v| v.label).collect()
    }

    /// Return (neutrons, fissile, products) population sizes.
    fn get_counts(&self) -> (usize, usize, usize) {
        let pop = self.sim.population();
        (pop.neutrons().len(), pop.fissile().len(), pop.products().len())
    }

    /// Return running totals since the last reset as a dict.
    fn get_stats<'py>(&self, py: Python<'py>) -> PyResult<Py<PyDict>> {
        let s = self.sim.stats();
        let out = PyDict::new(py);
        out.set_item("ticks", s.ticks)?;
        out.set_item("fissions", s.fissions)?;
        out.set_item("neutrons_spawned", s.neutrons_spawned)?;
        out.set_item("escaped", s.escaped)?;
        out.set_item("peak_neutrons", s.peak_neutrons)?;
        Ok(out.into())
    }
}

/// The fissionsim Python module entry point.
#[pymodule]
fn fissionsim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FissionSim>()?;
    Ok(())
}
