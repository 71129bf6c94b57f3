//! Bounded store of self play trajectories that turns sampled positions into
//! unrolled value, reward, policy and action training targets.

mod batch;
mod error;
mod observation;
mod options;
mod replay_buffer;
mod sampler;
mod symmetry;
mod target;
mod trajectory;
mod window;

#[cfg(feature = "python")]
mod python;

pub use batch::*;
pub use error::*;
pub use observation::*;
pub use options::*;
pub use replay_buffer::*;
pub use sampler::*;
pub use symmetry::*;
pub use target::*;
pub use trajectory::*;
pub use window::*;
