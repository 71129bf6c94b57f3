use std::collections::VecDeque;
use std::sync::Arc;

use log::debug;
use rand::Rng;

use super::error::ReplayBufferError;
use super::sampler::TrajectorySampler;
use super::trajectory::Trajectory;

/// The most recent trajectories, oldest first, bounded by `window_size`.
pub struct WindowStore {
    window_size: usize,
    trajectories: VecDeque<Arc<Trajectory>>,
    games_played: usize,
}

impl WindowStore {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "window_size must be greater than 0");

        Self {
            window_size,
            trajectories: VecDeque::with_capacity(window_size.min(4096)),
            games_played: 0,
        }
    }

    /// Stores the trajectory, evicting the oldest ones first so that no more than
    /// `window_size` remain afterwards.
    pub fn append(&mut self, trajectory: Trajectory) {
        trajectory.assert_well_formed();

        while self.trajectories.len() >= self.window_size {
            self.trajectories.pop_front();
            debug!(
                "Evicted oldest trajectory, window size: {}, games played: {}",
                self.window_size(),
                self.games_played
            );
        }

        self.trajectories.push_back(Arc::new(trajectory));
        self.games_played += 1;
    }

    /// Total number of trajectories ever appended, including evicted ones.
    pub fn games_played(&self) -> usize {
        self.games_played
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Trajectory> + '_ {
        self.trajectories.iter().map(|t| t.as_ref())
    }

    pub fn sample<S, R>(
        &self,
        sampler: &S,
        rng: &mut R,
    ) -> Result<&Arc<Trajectory>, ReplayBufferError>
    where
        S: TrajectorySampler,
        R: Rng + ?Sized,
    {
        if self.trajectories.is_empty() {
            return Err(ReplayBufferError::EmptyBuffer);
        }

        let idx = sampler.sample_trajectory(&self.trajectories, rng);

        Ok(&self.trajectories[idx])
    }
}
