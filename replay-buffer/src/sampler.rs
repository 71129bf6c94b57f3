use std::collections::VecDeque;
use std::sync::Arc;

use rand::Rng;

use super::error::ReplayBufferError;
use super::trajectory::Trajectory;

/// Chooses which stored trajectory a training sample is drawn from.
pub trait TrajectorySampler {
    /// Returns an index into `trajectories`, which is never empty and is ordered oldest first.
    fn sample_trajectory<R: Rng + ?Sized>(
        &self,
        trajectories: &VecDeque<Arc<Trajectory>>,
        rng: &mut R,
    ) -> usize;
}

/// Chooses the start position within a trajectory.
pub trait PositionSampler {
    fn sample_position<R: Rng + ?Sized>(
        &self,
        trajectory: &Trajectory,
        rng: &mut R,
    ) -> Result<usize, ReplayBufferError>;
}

/// Samples trajectories and positions with equal probability.
// @TODO: Weight by the difference between the search value and the predicted value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl TrajectorySampler for Uniform {
    fn sample_trajectory<R: Rng + ?Sized>(
        &self,
        trajectories: &VecDeque<Arc<Trajectory>>,
        rng: &mut R,
    ) -> usize {
        rng.gen_range(0..trajectories.len())
    }
}

impl PositionSampler for Uniform {
    fn sample_position<R: Rng + ?Sized>(
        &self,
        trajectory: &Trajectory,
        rng: &mut R,
    ) -> Result<usize, ReplayBufferError> {
        if trajectory.is_empty() {
            return Err(ReplayBufferError::EmptyTrajectory);
        }

        Ok(rng.gen_range(0..trajectory.len()))
    }
}
