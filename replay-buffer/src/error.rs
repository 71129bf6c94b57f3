use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayBufferError {
    /// No trajectories have been saved yet. Callers should wait for more self play.
    #[error("cannot sample from an empty replay buffer")]
    EmptyBuffer,

    /// A stored trajectory has no transitions to sample a position from.
    #[error("cannot sample a position from a trajectory with no transitions")]
    EmptyTrajectory,

    #[error(
        "batch size {target_size} must be divisible by the number of orientations {orientations}"
    )]
    InvalidConfiguration {
        target_size: usize,
        orientations: usize,
    },
}
