//! Ball speed gain reward

use std::collections::HashMap;

use super::RewardFunction;
use crate::consts::BALL_MAX_SPEED;
use crate::game::{GameSnapshot, PlayerRecord};
use crate::magnitude;

/// Rewards increases in ball speed over the highest speed seen so far
///
/// The stored baseline only moves up: a slower ball leaves it untouched, so
/// after a hard hit the ball must beat that speed again to earn anything.
#[derive(Debug, Clone)]
pub struct HitSpeedReward {
    pub reward_weight: f32,
    /// Baseline ball speed per car id
    previous_ball_speed: HashMap<u32, f32>,
}

impl HitSpeedReward {
    pub fn new(reward_weight: f32) -> Self {
        Self {
            reward_weight,
            previous_ball_speed: HashMap::new(),
        }
    }

    pub fn baseline(&self, car_id: u32) -> Option<f32> {
        self.previous_ball_speed.get(&car_id).copied()
    }
}

impl RewardFunction for HitSpeedReward {
    fn reset(&mut self, initial_state: &GameSnapshot) {
        let speed = magnitude(initial_state.ball.linear_velocity);
        self.previous_ball_speed = initial_state
            .players
            .iter()
            .map(|p| (p.car_id, speed))
            .collect();
    }

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        _previous_action: &[f32],
    ) -> f32 {
        let speed = magnitude(state.ball.linear_velocity);
        let previous = self.previous_ball_speed.entry(player.car_id).or_insert(0.0);

        if speed > *previous {
            let reward = self.reward_weight * (speed - *previous) / BALL_MAX_SPEED;
            *previous = speed;
            reward
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Team;
    use crate::reward::test_support::{player_at, snapshot};
    use glam::Vec3;

    fn ball_moving(speed: f32, player: &PlayerRecord) -> GameSnapshot {
        snapshot(Vec3::ZERO, Vec3::new(speed, 0.0, 0.0), vec![player.clone()])
    }

    #[test]
    fn test_speed_gain() {
        let player = player_at(1, Team::Blue, Vec3::ZERO, Vec3::ZERO);
        let mut reward = HitSpeedReward::new(2.0);
        reward.reset(&ball_moving(500.0, &player));
        assert_eq!(reward.baseline(1), Some(500.0));

        let got = reward.get_reward(&player, &ball_moving(800.0, &player), &[]);
        assert_eq!(got, 2.0 * (800.0 - 500.0) / BALL_MAX_SPEED);
        assert_eq!(reward.baseline(1), Some(800.0));
    }

    #[test]
    fn test_no_gain_keeps_baseline() {
        let player = player_at(1, Team::Blue, Vec3::ZERO, Vec3::ZERO);
        let mut reward = HitSpeedReward::new(2.0);
        reward.reset(&ball_moving(500.0, &player));

        assert_eq!(reward.get_reward(&player, &ball_moving(500.0, &player), &[]), 0.0);
        assert_eq!(reward.get_reward(&player, &ball_moving(300.0, &player), &[]), 0.0);
        assert_eq!(reward.baseline(1), Some(500.0));
    }

    #[test]
    fn test_baseline_ratchets_up() {
        let player = player_at(1, Team::Blue, Vec3::ZERO, Vec3::ZERO);
        let mut reward = HitSpeedReward::new(1.0);
        reward.reset(&ball_moving(0.0, &player));

        reward.get_reward(&player, &ball_moving(1000.0, &player), &[]);
        // Ball slows down, then speeds back up below the old peak
        reward.get_reward(&player, &ball_moving(200.0, &player), &[]);
        assert_eq!(reward.get_reward(&player, &ball_moving(900.0, &player), &[]), 0.0);
        assert_eq!(reward.baseline(1), Some(1000.0));

        let got = reward.get_reward(&player, &ball_moving(1600.0, &player), &[]);
        assert_eq!(got, 600.0 / BALL_MAX_SPEED);
    }

    #[test]
    fn test_unknown_player_baseline_is_zero() {
        let player = player_at(4, Team::Orange, Vec3::ZERO, Vec3::ZERO);
        let mut reward = HitSpeedReward::new(1.0);
        reward.reset(&snapshot(Vec3::ZERO, Vec3::new(600.0, 0.0, 0.0), vec![]));
        assert_eq!(reward.baseline(4), None);

        let got = reward.get_reward(&player, &ball_moving(600.0, &player), &[]);
        assert_eq!(got, 600.0 / BALL_MAX_SPEED);
        assert_eq!(reward.baseline(4), Some(600.0));
    }

    #[test]
    fn test_reset_rebuilds_baseline() {
        let player = player_at(1, Team::Blue, Vec3::ZERO, Vec3::ZERO);
        let mut reward = HitSpeedReward::new(1.0);
        reward.reset(&ball_moving(0.0, &player));
        reward.get_reward(&player, &ball_moving(3000.0, &player), &[]);

        reward.reset(&ball_moving(100.0, &player));
        assert_eq!(reward.baseline(1), Some(100.0));
    }
}
