use super::error::ReplayBufferError;
use super::observation::Observation;
use super::symmetry::Symmetries;
use super::target::Targets;
use super::trajectory::Action;

/// One sampled position, its observation and its unrolled targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub observation: Observation,
    pub targets: Targets,
}

/// Training batch. Entry `i` of every sequence belongs to the same sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub observations: Vec<Observation>,
    pub actions: Vec<Vec<Action>>,
    pub values: Vec<Vec<f32>>,
    pub rewards: Vec<Vec<f32>>,
    pub policies: Vec<Vec<Vec<f32>>>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn flat_observations(&self) -> Vec<f32> {
        self.observations
            .iter()
            .flat_map(|o| o.data().iter().copied())
            .collect()
    }

    pub fn flat_policies(&self) -> Vec<f32> {
        self.policies.iter().flatten().flatten().copied().collect()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            observations: Vec::with_capacity(capacity),
            actions: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            rewards: Vec::with_capacity(capacity),
            policies: Vec::with_capacity(capacity),
        }
    }
}

/// Number of samples to draw so that every orientation adds up to exactly `target_size`.
///
/// Sizes that do not divide evenly are rejected rather than rounded.
pub fn samples_per_orientation(
    target_size: usize,
    symmetries: &Symmetries,
) -> Result<usize, ReplayBufferError> {
    let orientations = symmetries.orientations();

    if target_size % orientations != 0 {
        return Err(ReplayBufferError::InvalidConfiguration {
            target_size,
            orientations,
        });
    }

    Ok(target_size / orientations)
}

/// Lays out the samples followed by one transformed copy of all of them per enabled
/// symmetry. Only observations are transformed; targets are repeated as is.
pub fn assemble(samples: Vec<Sample>, symmetries: &Symmetries) -> Batch {
    let mut batch = Batch::with_capacity(samples.len() * symmetries.orientations());

    for _ in 0..symmetries.orientations() {
        for sample in &samples {
            batch.actions.push(sample.targets.actions.clone());
            batch.values.push(sample.targets.values.clone());
            batch.rewards.push(sample.targets.rewards.clone());
            batch.policies.push(sample.targets.policies.clone());
        }
    }

    let augmented = symmetries
        .enabled()
        .flat_map(|symmetry| {
            samples
                .iter()
                .map(move |sample| sample.observation.transformed(symmetry))
        })
        .collect::<Vec<_>>();

    batch
        .observations
        .extend(samples.into_iter().map(|sample| sample.observation));
    batch.observations.extend(augmented);

    batch
}
