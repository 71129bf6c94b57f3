use super::trajectory::{Action, Trajectory};

/// Action recorded for unroll steps past the end of a game. It only pads the
/// sequence and can coincide with a real action identifier.
pub const ABSORBING_ACTION: Action = 0;

/// Unrolled training targets for one sampled position, each of length `num_unroll_steps + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Targets {
    pub values: Vec<f32>,
    pub rewards: Vec<f32>,
    pub policies: Vec<Vec<f32>>,
    pub actions: Vec<Action>,
}

/// Builds the value, reward, policy and action targets for the `num_unroll_steps + 1`
/// states starting at `state_index`.
///
/// The value target is the discounted root value of the search `td_steps` into the
/// future plus the discounted sum of the rewards until then. Rewards received by the
/// other player are negated. States past the end of the game are absorbing: they
/// have zero value and reward, a uniform policy and `ABSORBING_ACTION`.
pub fn build_target(
    trajectory: &Trajectory,
    state_index: usize,
    num_unroll_steps: usize,
    td_steps: usize,
    discount: f32,
) -> Targets {
    assert!(
        state_index < trajectory.len(),
        "state_index {} out of range for trajectory of length {}",
        state_index,
        trajectory.len()
    );

    assert!(
        i32::try_from(td_steps).is_ok(),
        "td_steps {} exceeds the supported maximum {}",
        td_steps,
        i32::MAX
    );

    let root_values = trajectory.root_values();
    let rewards = trajectory.rewards();
    let to_play = trajectory.to_play();

    let mut targets = Targets {
        values: Vec::with_capacity(num_unroll_steps + 1),
        rewards: Vec::with_capacity(num_unroll_steps + 1),
        policies: Vec::with_capacity(num_unroll_steps + 1),
        actions: Vec::with_capacity(num_unroll_steps + 1),
    };

    for current_index in state_index..=state_index + num_unroll_steps {
        if current_index >= root_values.len() {
            let action_space_size = trajectory.action_space_size();
            targets.values.push(0.0);
            targets.rewards.push(0.0);
            targets
                .policies
                .push(vec![1.0 / action_space_size as f32; action_space_size]);
            targets.actions.push(ABSORBING_ACTION);
            continue;
        }

        let bootstrap_index = current_index + td_steps;
        let mut value = root_values
            .get(bootstrap_index)
            .map_or(0.0, |v| v * discount.powi(td_steps as i32));

        let player = to_play[current_index];
        let end = bootstrap_index.min(rewards.len());
        for (i, reward) in rewards[current_index..end].iter().enumerate() {
            let reward = if to_play[current_index + i] == player {
                *reward
            } else {
                -*reward
            };

            value += reward * discount.powi(i as i32);
        }

        targets.values.push(value);
        targets.rewards.push(rewards[current_index]);
        targets
            .policies
            .push(trajectory.child_visits()[current_index].clone());
        targets.actions.push(trajectory.actions()[current_index]);
    }

    targets
}
