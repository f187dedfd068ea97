//! Airborne car-near-ball reward

use super::RewardFunction;
use crate::game::{GameSnapshot, PlayerRecord};

/// Flat reward while car and ball are both airborne and close together
#[derive(Debug, Clone)]
pub struct AirDribbleReward {
    pub reward_weight: f32,
    pub distance_threshold: f32,
}

impl AirDribbleReward {
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

impl RewardFunction for AirDribbleReward {
    fn reset(&mut self, _initial_state: &GameSnapshot) {}

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        _previous_action: &[f32],
    ) -> f32 {
        let ball = state.ball.position;
        let car = player.car_data.position;

        if ball.z > 0.0 && car.z > 0.0 && car.distance(ball) < self.distance_threshold {
            self.reward_weight
        } else {
            0.0
        }
    }
}
