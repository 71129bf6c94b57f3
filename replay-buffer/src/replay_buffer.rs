use std::sync::Arc;

use common::create_rng;
use log::{debug, info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rayon::prelude::*;

use super::batch::{assemble, samples_per_orientation, Batch, Sample};
use super::error::ReplayBufferError;
use super::options::ReplayBufferOptions;
use super::sampler::{PositionSampler, TrajectorySampler, Uniform};
use super::symmetry::Symmetries;
use super::target::build_target;
use super::trajectory::Trajectory;
use super::window::WindowStore;

/// Stores played games from any number of self play producers and serves training
/// batches to the trainer.
///
/// The window, the games played counter and the sampling rng sit behind a single lock.
/// Targets are built outside of the lock.
pub struct ReplayBuffer<S = Uniform, P = Uniform> {
    options: ReplayBufferOptions,
    trajectory_sampler: S,
    position_sampler: P,
    inner: Mutex<Inner>,
}

struct Inner {
    window: WindowStore,
    rng: StdRng,
}

impl ReplayBuffer {
    pub fn new(options: ReplayBufferOptions) -> Self {
        Self::with_samplers(options, Uniform, Uniform)
    }
}

impl<S, P> ReplayBuffer<S, P>
where
    S: TrajectorySampler,
    P: PositionSampler,
{
    pub fn with_samplers(
        options: ReplayBufferOptions,
        trajectory_sampler: S,
        position_sampler: P,
    ) -> Self {
        assert!(
            options.validate().is_ok(),
            "Replay buffer options are invalid: {:?}",
            options
        );

        info!(
            "Creating replay buffer with window size {}, unroll steps {}, td steps {}, discount {}",
            options.window_size, options.num_unroll_steps, options.td_steps, options.discount
        );

        let inner = Inner {
            window: WindowStore::new(options.window_size),
            rng: create_rng(options.seed),
        };

        Self {
            options,
            trajectory_sampler,
            position_sampler,
            inner: Mutex::new(inner),
        }
    }

    pub fn options(&self) -> &ReplayBufferOptions {
        &self.options
    }

    pub fn save_game(&self, trajectory: Trajectory) {
        let mut inner = self.inner.lock();
        inner.window.append(trajectory);

        debug!(
            "Saved game, games played: {}, games in window: {}",
            inner.window.games_played(),
            inner.window.len()
        );
    }

    pub fn games_played(&self) -> usize {
        self.inner.lock().window.games_played()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().window.is_empty()
    }

    /// Samples a batch of the configured `batch_size`.
    pub fn batch(&self, symmetries: impl Into<Symmetries>) -> Result<Batch, ReplayBufferError> {
        self.get_batch(self.options.batch_size, symmetries)
    }

    /// Samples `target_size / (symmetries + 1)` positions and augments them with every
    /// enabled symmetry, giving a batch of exactly `target_size` entries.
    pub fn get_batch(
        &self,
        target_size: usize,
        symmetries: impl Into<Symmetries>,
    ) -> Result<Batch, ReplayBufferError> {
        let symmetries = symmetries.into();
        let num_samples = samples_per_orientation(target_size, &symmetries).map_err(|err| {
            warn!("Rejecting batch request: {}", err);
            err
        })?;

        let draws = self.draw(num_samples)?;

        let num_unroll_steps = self.options.num_unroll_steps;
        let td_steps = self.options.td_steps;
        let discount = self.options.discount;

        let samples = draws
            .into_par_iter()
            .map(|(trajectory, position)| Sample {
                observation: trajectory.observations()[position].clone(),
                targets: build_target(
                    &trajectory,
                    position,
                    num_unroll_steps,
                    td_steps,
                    discount,
                ),
            })
            .collect::<Vec<_>>();

        let batch = assemble(samples, &symmetries);

        debug!(
            "Assembled batch of {} from {} samples with {} symmetries",
            batch.len(),
            num_samples,
            symmetries.count()
        );

        Ok(batch)
    }

    // All draws for one batch happen under a single lock hold.
    fn draw(
        &self,
        num_samples: usize,
    ) -> Result<Vec<(Arc<Trajectory>, usize)>, ReplayBufferError> {
        let mut inner = self.inner.lock();
        let Inner { window, rng } = &mut *inner;

        (0..num_samples)
            .map(|_| {
                let trajectory = window.sample(&self.trajectory_sampler, &mut *rng)?;
                let position = self.position_sampler.sample_position(trajectory, &mut *rng)?;
                Ok((trajectory.clone(), position))
            })
            .collect()
    }
}
