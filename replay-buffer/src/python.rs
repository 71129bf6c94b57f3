use common::{Config, ConfigLoader};
use env_logger::Env;
use numpy::IntoPyArray;
use pyo3::exceptions::{PyFileNotFoundError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::{Observation, ReplayBuffer, ReplayBufferError, ReplayBufferOptions, Trajectory};

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn replay_buffer(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyReplayBuffer>()?;
    Ok(())
}

#[pyclass(name = "ReplayBuffer")]
struct PyReplayBuffer {
    inner: ReplayBuffer,
}

#[pymethods]
impl PyReplayBuffer {
    #[new]
    #[pyo3(signature = (config_path, scope=None))]
    fn new(config_path: String, scope: Option<String>) -> PyResult<Self> {
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();

        let scope = scope.unwrap_or_else(|| "replay_buffer".to_string());
        let config = ConfigLoader::new(&config_path, scope)
            .map_err(|err| PyFileNotFoundError::new_err(format!("{:#}", err)))?;
        let options = ReplayBufferOptions::load(&config)
            .map_err(|err| PyValueError::new_err(format!("{:#}", err)))?;

        Ok(Self {
            inner: ReplayBuffer::new(options),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn save_game(
        &self,
        observation_shape: [usize; 3],
        observations: Vec<Vec<f32>>,
        actions: Vec<usize>,
        rewards: Vec<f32>,
        root_values: Vec<f32>,
        child_visits: Vec<Vec<f32>>,
        to_play: Vec<usize>,
    ) -> PyResult<()> {
        let expected = observation_shape.iter().product::<usize>();
        if observations.iter().any(|o| o.len() != expected) {
            return Err(PyValueError::new_err(format!(
                "every observation must have {} values for shape {:?}",
                expected, observation_shape
            )));
        }

        let len = rewards.len();
        if [actions.len(), root_values.len(), child_visits.len(), to_play.len()]
            .iter()
            .any(|l| *l != len)
            || observations.len() != len + 1
            || child_visits.iter().any(|p| p.len() != child_visits[0].len())
        {
            return Err(PyValueError::new_err(
                "game history sequences have inconsistent lengths",
            ));
        }

        let observations = observations
            .into_iter()
            .map(|data| Observation::new(observation_shape, data))
            .collect();

        self.inner.save_game(Trajectory::new(
            observations,
            actions,
            rewards,
            root_values,
            child_visits,
            to_play,
        ));

        Ok(())
    }

    fn get_self_play_count(&self) -> usize {
        self.inner.games_played()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    #[pyo3(signature = (symmetries, batch_size=None))]
    fn get_batch<'py>(
        &self,
        py: Python<'py>,
        symmetries: [bool; 3],
        batch_size: Option<usize>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let batch_size = batch_size.unwrap_or(self.inner.options().batch_size);
        let batch = py
            .allow_threads(|| self.inner.get_batch(batch_size, symmetries))
            .map_err(to_py_err)?;

        let shape = batch
            .observations
            .first()
            .map(|o| o.shape().to_vec())
            .unwrap_or_default();

        let x = batch.flat_observations();
        let actions = batch.actions.iter().flatten().copied().collect::<Vec<_>>();
        let values = batch.values.iter().flatten().copied().collect::<Vec<_>>();
        let rewards = batch.rewards.iter().flatten().copied().collect::<Vec<_>>();
        let policies = batch.flat_policies();

        let dict = PyDict::new(py);
        dict.set_item("observations", x.into_pyarray(py))?;
        dict.set_item("values", values.into_pyarray(py))?;
        dict.set_item("rewards", rewards.into_pyarray(py))?;
        dict.set_item("policies", policies.into_pyarray(py))?;
        dict.set_item("actions", actions.into_pyarray(py))?;
        dict.set_item("batch_size", batch.len())?;
        dict.set_item("observation_shape", shape)?;

        Ok(dict)
    }
}

fn to_py_err(err: ReplayBufferError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
