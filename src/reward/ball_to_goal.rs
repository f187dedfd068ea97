//! Ball approaching the opposing goal

use super::RewardFunction;
use crate::consts::{BLUE_GOAL_BACK, IDLE_PENALTY, ORANGE_GOAL_BACK};
use crate::game::{GameSnapshot, PlayerRecord, Team};

/// Flat reward when the ball is near the opposing goal and heading into it
///
/// Any other tick costs the idle penalty.
#[derive(Debug, Clone)]
pub struct BallToGoalReward {
    pub reward_weight: f32,
    pub distance_threshold: f32,
}

impl BallToGoalReward {
    pub fn new(reward_weight: f32) -> Self {
        Self {
            reward_weight,
            distance_threshold: 10.0,
        }
    }

    pub fn with_threshold(mut self, distance_threshold: f32) -> Self {
        self.distance_threshold = distance_threshold;
        self
    }
}

impl RewardFunction for BallToGoalReward {
    fn reset(&mut self, _initial_state: &GameSnapshot) {}

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        _previous_action: &[f32],
    ) -> f32 {
        let goal = match player.team {
            Team::Blue => ORANGE_GOAL_BACK,
            Team::Orange => BLUE_GOAL_BACK,
        };
        let ball = state.ball.position;
        let heading_in = state.ball.linear_velocity.dot(goal - ball) > 0.0;

        if heading_in && ball.distance(goal) < self.distance_threshold {
            self.reward_weight
        } else {
            IDLE_PENALTY
        }
    }
}
