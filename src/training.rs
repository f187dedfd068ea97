//! Match composition for one environment instance
//!
//! Bundles the combined reward, the terminal conditions and the state setter
//! the training loop drives. Reward and terminal memory is not keyed by
//! environment, so every parallel instance needs its own `TrainingMatch`.

use crate::controls::ACTION_LEN;
use crate::game::{GameSnapshot, StateWrapper};
use crate::reward::{CombinedReward, RewardFunction};
use crate::settings::TrainingSettings;
use crate::setter::{Scenario, TrainingStateSetter};
use crate::terminal::{Terminal, TerminalCondition, first_terminal};

/// Result of one agent step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// One reward per player, in snapshot order
    pub rewards: Vec<f32>,
    pub done: bool,
    /// Name of the condition that ended the episode
    pub reason: Option<&'static str>,
}

pub struct TrainingMatch {
    reward: CombinedReward,
    terminals: Vec<Terminal>,
    setter: TrainingStateSetter,
    /// Agent steps taken in the current episode
    episode_steps: u64,
    episodes: u64,
}

impl TrainingMatch {
    pub fn new(
        reward: CombinedReward,
        terminals: Vec<Terminal>,
        setter: TrainingStateSetter,
    ) -> Self {
        Self {
            reward,
            terminals,
            setter,
            episode_steps: 0,
            episodes: 0,
        }
    }

    pub fn from_settings(settings: &TrainingSettings) -> Self {
        Self::new(
            settings.build_reward(),
            settings.build_terminals(),
            TrainingStateSetter::new(settings.seed),
        )
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    pub fn episode_steps(&self) -> u64 {
        self.episode_steps
    }

    /// Write the next episode's initial conditions into `wrapper`
    pub fn episode_reset(&mut self, wrapper: &mut StateWrapper) -> Scenario {
        self.setter.sample(wrapper)
    }

    /// Reset reward and terminal memory from the episode's first snapshot
    pub fn begin_episode(&mut self, initial_state: &GameSnapshot) {
        self.reward.reset(initial_state);
        for terminal in &mut self.terminals {
            terminal.reset(initial_state);
        }
        self.episode_steps = 0;
        self.episodes += 1;
    }

    /// Rewards for every player on this tick and whether the episode is over
    ///
    /// `previous_actions` is indexed like `state.players`; missing entries count
    /// as an all-zero action.
    pub fn step(
        &mut self,
        state: &GameSnapshot,
        previous_actions: &[[f32; ACTION_LEN]],
    ) -> StepOutcome {
        const IDLE_ACTION: [f32; ACTION_LEN] = [0.0; ACTION_LEN];

        let rewards = state
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let action = previous_actions.get(i).unwrap_or(&IDLE_ACTION);
                self.reward.get_reward(player, state, action)
            })
            .collect();

        self.episode_steps += 1;
        let reason = first_terminal(&mut self.terminals, state);
        if let Some(reason) = reason {
            log::debug!(
                "Episode {} ended after {} steps ({})",
                self.episodes,
                self.episode_steps,
                reason
            );
        }

        StepOutcome {
            rewards,
            done: reason.is_some(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Team;
    use crate::reward::{EventReward, EventWeights, VelocityReward};
    use glam::Vec3;

    fn fresh_episode(training: &mut TrainingMatch) -> GameSnapshot {
        let mut wrapper = StateWrapper::new(1, 1);
        training.episode_reset(&mut wrapper);
        let initial = GameSnapshot::from(&wrapper);
        training.begin_episode(&initial);
        initial
    }

    #[test]
    fn test_default_match_first_step() {
        let mut training = TrainingMatch::from_settings(&TrainingSettings::default());
        let initial = fresh_episode(&mut training);

        let outcome = training.step(&initial, &[]);
        assert_eq!(outcome.rewards.len(), 2);
        assert!(outcome.rewards.iter().all(|r| r.is_finite()));
        assert!(!outcome.done);
        assert_eq!(training.episodes(), 1);
        assert_eq!(training.episode_steps(), 1);
    }

    #[test]
    fn test_goal_ends_episode_and_rewards_scorer() {
        let reward = CombinedReward::new().with(
            EventReward::new(EventWeights {
                goal: 10.0,
                concede: -10.0,
                ..Default::default()
            }),
            1.0,
        );
        let mut training = TrainingMatch::new(
            reward,
            vec![Terminal::goal_scored()],
            TrainingStateSetter::new(3),
        );
        let mut state = fresh_episode(&mut training);

        state.blue_score = 1;
        let scorer = state
            .players
            .iter_mut()
            .find(|p| p.team == Team::Blue)
            .unwrap();
        scorer.match_goals = 1;

        let outcome = training.step(&state, &[]);
        assert!(outcome.done);
        assert_eq!(outcome.reason, Some("goal_scored"));
        // Players are sorted by car id: blue first
        assert_eq!(outcome.rewards, vec![10.0, -10.0]);
    }

    #[test]
    fn test_timeout_and_new_episode() {
        let reward = CombinedReward::new().with(VelocityReward, 1.0);
        let mut training =
            TrainingMatch::new(reward, vec![Terminal::timeout(3)], TrainingStateSetter::new(5));
        let mut state = fresh_episode(&mut training);
        state.players[0].car_data.linear_velocity = Vec3::new(0.0, 100.0, 0.0);

        let actions = [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]];
        assert!(!training.step(&state, &actions).done);
        assert!(!training.step(&state, &actions).done);
        let last = training.step(&state, &actions);
        assert!(last.done);
        assert_eq!(last.rewards[0], 100.0);

        fresh_episode(&mut training);
        assert_eq!(training.episodes(), 2);
        assert_eq!(training.episode_steps(), 0);
        assert!(!training.step(&state, &actions).done);
    }

    #[test]
    fn test_same_seed_same_rewards() {
        let settings = TrainingSettings {
            seed: 11,
            ..Default::default()
        };
        let mut a = TrainingMatch::from_settings(&settings);
        let mut b = TrainingMatch::from_settings(&settings);
        for _ in 0..10 {
            let sa = fresh_episode(&mut a);
            let sb = fresh_episode(&mut b);
            assert_eq!(sa, sb);
            assert_eq!(a.step(&sa, &[]), b.step(&sb, &[]));
        }
    }
}
