//! Weighted sum of reward terms

use super::{RewardFunction, RewardTerm};
use crate::game::{GameSnapshot, PlayerRecord};

/// Reward terms combined by a weighted sum
#[derive(Debug, Clone, Default)]
pub struct CombinedReward {
    terms: Vec<(RewardTerm, f32)>,
}

impl CombinedReward {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a term with its weight (builder style)
    pub fn with(mut self, term: impl Into<RewardTerm>, weight: f32) -> Self {
        self.push(term, weight);
        self
    }

    pub fn push(&mut self, term: impl Into<RewardTerm>, weight: f32) {
        self.terms.push((term.into(), weight));
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&RewardTerm, f32)> {
        self.terms.iter().map(|(term, weight)| (term, *weight))
    }

    /// Weighted contribution of each term, in insertion order
    ///
    /// Every term is queried so that stateful terms keep their memory current.
    pub fn get_reward_breakdown(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        previous_action: &[f32],
    ) -> Vec<(&'static str, f32)> {
        self.terms
            .iter_mut()
            .map(|(term, weight)| {
                let value = term.get_reward(player, state, previous_action);
                (term.name(), value * *weight)
            })
            .collect()
    }
}

impl RewardFunction for CombinedReward {
    fn reset(&mut self, initial_state: &GameSnapshot) {
        for (term, _) in &mut self.terms {
            term.reset(initial_state);
        }
    }

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        previous_action: &[f32],
    ) -> f32 {
        self.terms
            .iter_mut()
            .map(|(term, weight)| term.get_reward(player, state, previous_action) * *weight)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Team;
    use crate::reward::test_support::{player_at, snapshot};
    use crate::reward::{AirDribbleReward, BallToGoalReward, HitSpeedReward, VelocityReward};
    use glam::Vec3;

    #[test]
    fn test_weighted_sum() {
        let mut combined = CombinedReward::new()
            .with(VelocityReward, 0.005)
            .with(BallToGoalReward::new(5.0), 1.0);
        assert_eq!(combined.len(), 2);

        let player = player_at(1, Team::Blue, Vec3::ZERO, Vec3::new(1000.0, 0.0, 0.0));
        let state = snapshot(Vec3::ZERO, Vec3::ZERO, vec![player.clone()]);
        combined.reset(&state);

        let got = combined.get_reward(&player, &state, &[]);
        assert!((got - (1000.0 * 0.005 - 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_breakdown_names_and_values() {
        let mut combined = CombinedReward::new()
            .with(AirDribbleReward::new(3.0), 2.0)
            .with(VelocityReward, 1.0);
        let player = player_at(1, Team::Blue, Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 10.0, 0.0));
        let state = snapshot(Vec3::new(0.0, 5.0, 50.0), Vec3::ZERO, vec![player.clone()]);
        combined.reset(&state);

        let breakdown = combined.get_reward_breakdown(&player, &state, &[]);
        assert_eq!(breakdown, vec![("air_dribble", 6.0), ("velocity", 10.0)]);
    }

    #[test]
    fn test_reset_reaches_every_term() {
        let mut combined = CombinedReward::new().with(HitSpeedReward::new(1.0), 1.0);
        let player = player_at(1, Team::Blue, Vec3::ZERO, Vec3::ZERO);
        combined.reset(&snapshot(Vec3::ZERO, Vec3::new(600.0, 0.0, 0.0), vec![player.clone()]));

        // Ball speed equals the reset baseline, so nothing is earned
        let state = snapshot(Vec3::ZERO, Vec3::new(600.0, 0.0, 0.0), vec![player.clone()]);
        assert_eq!(combined.get_reward(&player, &state, &[]), 0.0);
    }
}
