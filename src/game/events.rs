//! Player event extraction
//!
//! Reads the cumulative counters that event-based rewards difference tick to tick.

use super::state::{GameSnapshot, PlayerRecord};

/// Number of tracked event values
pub const EVENT_COUNT: usize = 7;

/// Snapshot of a player's cumulative event values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerEvents {
    pub goals: f32,
    /// Score of the team the player is not on
    pub opponent_score: f32,
    /// 1.0 if the ball was touched this tick
    pub touched: f32,
    pub shots: f32,
    pub saves: f32,
    pub demolishes: f32,
    pub boost: f32,
}

impl PlayerEvents {
    pub fn extract(player: &PlayerRecord, state: &GameSnapshot) -> Self {
        Self {
            goals: player.match_goals as f32,
            opponent_score: state.score(player.team.opponent()) as f32,
            touched: if player.ball_touched { 1.0 } else { 0.0 },
            shots: player.match_shots as f32,
            saves: player.match_saves as f32,
            demolishes: player.match_demolishes as f32,
            boost: player.boost_amount,
        }
    }

    /// Values in weight order: goal, concede, touch, shot, save, demo, boost
    pub fn to_array(&self) -> [f32; EVENT_COUNT] {
        [
            self.goals,
            self.opponent_score,
            self.touched,
            self.shots,
            self.saves,
            self.demolishes,
            self.boost,
        ]
    }

    /// Increase since `previous`, each component clamped at zero
    pub fn positive_delta(&self, previous: &Self) -> [f32; EVENT_COUNT] {
        let now = self.to_array();
        let before = previous.to_array();
        std::array::from_fn(|i| (now[i] - before[i]).max(0.0))
    }
}

impl From<PlayerEvents> for [f32; EVENT_COUNT] {
    fn from(events: PlayerEvents) -> Self {
        events.to_array()
    }
}
