//! Player speed reward

use super::RewardFunction;
use crate::game::{GameSnapshot, PlayerRecord};
use crate::magnitude;

/// Raw car speed, unweighted
#[derive(Debug, Clone, Default)]
pub struct VelocityReward;

impl RewardFunction for VelocityReward {
    fn reset(&mut self, _initial_state: &GameSnapshot) {}

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        _state: &GameSnapshot,
        _previous_action: &[f32],
    ) -> f32 {
        magnitude(player.car_data.linear_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Team;
    use crate::reward::test_support::player_at;
    use glam::Vec3;

    #[test]
    fn test_speed() {
        let player = player_at(1, Team::Blue, Vec3::ZERO, Vec3::new(300.0, 400.0, 0.0));
        let state = GameSnapshot::default();
        assert_eq!(VelocityReward.get_reward(&player, &state, &[]), 500.0);
    }
}
