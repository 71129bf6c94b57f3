use serde::{Deserialize, Serialize};

use super::observation::Observation;

pub type Action = usize;
pub type Player = usize;

/// One finished self play episode.
///
/// Every per-transition sequence has the same length and there is one more
/// observation than transitions, the last being the terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    observations: Vec<Observation>,
    actions: Vec<Action>,
    rewards: Vec<f32>,
    root_values: Vec<f32>,
    child_visits: Vec<Vec<f32>>,
    to_play: Vec<Player>,
}

impl Trajectory {
    pub fn new(
        observations: Vec<Observation>,
        actions: Vec<Action>,
        rewards: Vec<f32>,
        root_values: Vec<f32>,
        child_visits: Vec<Vec<f32>>,
        to_play: Vec<Player>,
    ) -> Self {
        let trajectory = Self {
            observations,
            actions,
            rewards,
            root_values,
            child_visits,
            to_play,
        };

        trajectory.assert_well_formed();

        trajectory
    }

    /// Number of transitions.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    pub fn root_values(&self) -> &[f32] {
        &self.root_values
    }

    pub fn child_visits(&self) -> &[Vec<f32>] {
        &self.child_visits
    }

    pub fn to_play(&self) -> &[Player] {
        &self.to_play
    }

    /// Size of the action space, taken from the first policy target.
    pub fn action_space_size(&self) -> usize {
        self.child_visits.first().map_or(0, |p| p.len())
    }

    pub(crate) fn assert_well_formed(&self) {
        let len = self.rewards.len();

        assert_eq!(self.actions.len(), len, "Trajectory actions length mismatch");
        assert_eq!(self.root_values.len(), len, "Trajectory root_values length mismatch");
        assert_eq!(self.child_visits.len(), len, "Trajectory child_visits length mismatch");
        assert_eq!(self.to_play.len(), len, "Trajectory to_play length mismatch");
        assert_eq!(
            self.observations.len(),
            len + 1,
            "Trajectory must have one more observation than transitions"
        );

        let action_space_size = self.action_space_size();
        assert!(
            self.child_visits.iter().all(|p| p.len() == action_space_size),
            "All child_visits in a trajectory must share the action space size"
        );

        for observation in &self.observations {
            observation.assert_well_formed();
        }

        let shape = self.observations[0].shape();
        assert!(
            self.observations.iter().all(|o| o.shape() == shape),
            "All observations in a trajectory must share the shape {:?}",
            shape
        );
    }
}

/// Accumulates a trajectory step by step as a game is played.
pub struct TrajectoryBuilder {
    observations: Vec<Observation>,
    actions: Vec<Action>,
    rewards: Vec<f32>,
    root_values: Vec<f32>,
    child_visits: Vec<Vec<f32>>,
    to_play: Vec<Player>,
}

impl TrajectoryBuilder {
    pub fn new(initial_observation: Observation) -> Self {
        Self {
            observations: vec![initial_observation],
            actions: vec![],
            rewards: vec![],
            root_values: vec![],
            child_visits: vec![],
            to_play: vec![],
        }
    }

    /// Records the search results at the current state, the action taken from it
    /// and what it led to.
    pub fn push(
        &mut self,
        action: Action,
        reward: f32,
        root_value: f32,
        child_visits: Vec<f32>,
        to_play: Player,
        next_observation: Observation,
    ) -> &mut Self {
        self.actions.push(action);
        self.rewards.push(reward);
        self.root_values.push(root_value);
        self.child_visits.push(child_visits);
        self.to_play.push(to_play);
        self.observations.push(next_observation);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn finish(self) -> Trajectory {
        Trajectory::new(
            self.observations,
            self.actions,
            self.rewards,
            self.root_values,
            self.child_visits,
            self.to_play,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowStore;

    fn obs(v: f32) -> Observation {
        Observation::new([1, 1, 1], vec![v])
    }

    #[test]
    fn test_builder_produces_aligned_trajectory() {
        let mut builder = TrajectoryBuilder::new(obs(0.0));
        builder
            .push(2, 0.0, 0.1, vec![0.0, 0.0, 1.0], 1, obs(1.0))
            .push(0, 1.0, 0.4, vec![1.0, 0.0, 0.0], 2, obs(2.0));

        assert_eq!(builder.len(), 2);

        let trajectory = builder.finish();

        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.observations().len(), 3);
        assert_eq!(trajectory.actions(), &[2, 0]);
        assert_eq!(trajectory.rewards(), &[0.0, 1.0]);
        assert_eq!(trajectory.to_play(), &[1, 2]);
        assert_eq!(trajectory.action_space_size(), 3);
    }

    #[test]
    fn test_empty_trajectory_is_allowed() {
        let trajectory = TrajectoryBuilder::new(obs(0.0)).finish();

        assert!(trajectory.is_empty());
        assert_eq!(trajectory.action_space_size(), 0);
    }

    #[test]
    #[should_panic(expected = "Trajectory root_values length mismatch")]
    fn test_mismatched_lengths_panic() {
        Trajectory::new(
            vec![obs(0.0), obs(1.0)],
            vec![0],
            vec![1.0],
            vec![0.0, 0.0],
            vec![vec![1.0]],
            vec![1],
        );
    }

    #[test]
    #[should_panic(expected = "one more observation than transitions")]
    fn test_missing_terminal_observation_panics() {
        Trajectory::new(
            vec![obs(0.0)],
            vec![0],
            vec![1.0],
            vec![0.0],
            vec![vec![1.0]],
            vec![1],
        );
    }

    #[test]
    #[should_panic(expected = "share the action space size")]
    fn test_ragged_policies_panic() {
        Trajectory::new(
            vec![obs(0.0), obs(1.0), obs(2.0)],
            vec![0, 1],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![vec![1.0, 0.0], vec![1.0]],
            vec![1, 2],
        );
    }

    #[test]
    #[should_panic(expected = "All observations in a trajectory must share the shape")]
    fn test_mixed_observation_shapes_panic() {
        Trajectory::new(
            vec![obs(0.0), Observation::new([1, 2, 1], vec![0.0, 1.0])],
            vec![0],
            vec![0.0],
            vec![0.0],
            vec![vec![1.0]],
            vec![1],
        );
    }

    #[test]
    #[should_panic(expected = "Observation data length must match its shape")]
    fn test_deserialized_observation_is_checked_on_append() {
        let mut builder = TrajectoryBuilder::new(obs(0.0));
        builder.push(1, 0.5, 0.25, vec![0.5, 0.5], 1, obs(1.0));
        let mut json = serde_json::to_value(builder.finish()).unwrap();
        json["observations"][1]["data"] = serde_json::json!([0.0, 1.0]);

        let trajectory: Trajectory = serde_json::from_value(json).unwrap();

        WindowStore::new(2).append(trajectory);
    }

    #[test]
    fn test_serde_round_trip_through_json() {
        let mut builder = TrajectoryBuilder::new(obs(0.0));
        builder.push(1, 0.5, 0.25, vec![0.5, 0.5], 1, obs(1.0));
        let trajectory = builder.finish();

        let json = serde_json::to_string(&trajectory).unwrap();
        let parsed: Trajectory = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, trajectory);
    }
}
