//! Distance and heading shaping toward the ball

use std::f32::consts::{FRAC_PI_2, PI};

use super::RewardFunction;
use crate::consts::{BACK_WALL_Y, BALL_MAX_SPEED, BALL_RADIUS, IDLE_PENALTY};
use crate::game::{GameSnapshot, PlayerRecord};
use crate::{angle_between, magnitude};

/// Rewards being close to a moving ball, more so when it is moving fast
///
/// The base reward `1 - distance / (BACK_WALL_Y - BALL_RADIUS)` is scaled by
/// `1 + ball_speed_factor * ball_speed / BALL_MAX_SPEED`, then by a heading
/// factor from the angle between the ball's and the car's travel directions.
/// A resting ball yields the idle penalty.
#[derive(Debug, Clone)]
pub struct PlayerToBallReward {
    pub ball_speed_factor: f32,
}

impl Default for PlayerToBallReward {
    fn default() -> Self {
        Self {
            ball_speed_factor: 0.1,
        }
    }
}

impl PlayerToBallReward {
    pub fn new(ball_speed_factor: f32) -> Self {
        Self { ball_speed_factor }
    }
}

impl RewardFunction for PlayerToBallReward {
    fn reset(&mut self, _initial_state: &GameSnapshot) {}

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        _previous_action: &[f32],
    ) -> f32 {
        let ball_speed = magnitude(state.ball.linear_velocity);
        if ball_speed == 0.0 {
            return IDLE_PENALTY;
        }

        let distance = state.ball.position.distance(player.car_data.position);
        let mut reward = (1.0 - distance / (BACK_WALL_Y - BALL_RADIUS))
            * (1.0 + self.ball_speed_factor * ball_speed / BALL_MAX_SPEED);

        // A stationary car normalizes to zero, which lands on the π/2 boundary (factor 1)
        let angle = angle_between(state.ball.linear_velocity, player.car_data.linear_velocity);
        if angle < FRAC_PI_2 {
            reward *= 1.0 + angle / PI;
        } else {
            reward *= 1.0 - (angle - FRAC_PI_2) / PI;
        }

        reward
    }
}
