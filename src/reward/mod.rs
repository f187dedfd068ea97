//! Reward shaping
//!
//! Each term maps (player, state, previous action) to a scalar and keeps its
//! own per-player memory, keyed by car id and rebuilt on every `reset`.
//! The set of terms is fixed at configuration time, so they are collected in
//! the closed [`RewardTerm`] enum rather than boxed trait objects.

pub mod air_dribble;
pub mod ball_to_goal;
pub mod combined;
pub mod events;
pub mod hit_speed;
pub mod player_to_ball;
pub mod velocity;

pub use air_dribble::AirDribbleReward;
pub use ball_to_goal::BallToGoalReward;
pub use combined::CombinedReward;
pub use events::{EventReward, EventWeights};
pub use hit_speed::HitSpeedReward;
pub use player_to_ball::PlayerToBallReward;
pub use velocity::VelocityReward;

use crate::game::{GameSnapshot, PlayerRecord};

/// The two operations the training loop calls on a reward term
pub trait RewardFunction {
    /// Start of an episode: drop all memory and rebuild it from `initial_state`
    fn reset(&mut self, initial_state: &GameSnapshot);

    /// Reward for `player` on this tick
    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        previous_action: &[f32],
    ) -> f32;
}

/// Every available reward term
#[derive(Debug, Clone)]
pub enum RewardTerm {
    Events(EventReward),
    PlayerToBall(PlayerToBallReward),
    HitSpeed(HitSpeedReward),
    AirDribble(AirDribbleReward),
    BallToGoal(BallToGoalReward),
    Velocity(VelocityReward),
}

impl RewardTerm {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            RewardTerm::Events(_) => "events",
            RewardTerm::PlayerToBall(_) => "player_to_ball",
            RewardTerm::HitSpeed(_) => "hit_speed",
            RewardTerm::AirDribble(_) => "air_dribble",
            RewardTerm::BallToGoal(_) => "ball_to_goal",
            RewardTerm::Velocity(_) => "velocity",
        }
    }
}

impl RewardFunction for RewardTerm {
    fn reset(&mut self, initial_state: &GameSnapshot) {
        match self {
            RewardTerm::Events(r) => r.reset(initial_state),
            RewardTerm::PlayerToBall(r) => r.reset(initial_state),
            RewardTerm::HitSpeed(r) => r.reset(initial_state),
            RewardTerm::AirDribble(r) => r.reset(initial_state),
            RewardTerm::BallToGoal(r) => r.reset(initial_state),
            RewardTerm::Velocity(r) => r.reset(initial_state),
        }
    }

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        previous_action: &[f32],
    ) -> f32 {
        match self {
            RewardTerm::Events(r) => r.get_reward(player, state, previous_action),
            RewardTerm::PlayerToBall(r) => r.get_reward(player, state, previous_action),
            RewardTerm::HitSpeed(r) => r.get_reward(player, state, previous_action),
            RewardTerm::AirDribble(r) => r.get_reward(player, state, previous_action),
            RewardTerm::BallToGoal(r) => r.get_reward(player, state, previous_action),
            RewardTerm::Velocity(r) => r.get_reward(player, state, previous_action),
        }
    }
}

macro_rules! impl_from_term {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for RewardTerm {
                fn from(term: $ty) -> Self {
                    RewardTerm::$variant(term)
                }
            }
        )*
    };
}

impl_from_term!(
    Events(EventReward),
    PlayerToBall(PlayerToBallReward),
    HitSpeed(HitSpeedReward),
    AirDribble(AirDribbleReward),
    BallToGoal(BallToGoalReward),
    Velocity(VelocityReward),
);

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec3;

    use crate::game::{GameSnapshot, PhysicsObject, PlayerRecord, Team};

    pub fn player_at(car_id: u32, team: Team, position: Vec3, velocity: Vec3) -> PlayerRecord {
        PlayerRecord {
            car_data: PhysicsObject::at(position).with_velocity(velocity),
            ..PlayerRecord::new(car_id, team)
        }
    }

    pub fn snapshot(ball_pos: Vec3, ball_vel: Vec3, players: Vec<PlayerRecord>) -> GameSnapshot {
        GameSnapshot {
            ball: PhysicsObject::at(ball_pos).with_velocity(ball_vel),
            players,
            ..Default::default()
        }
    }
}
