//! Cumulative event reward
//!
//! Rewards goals, concessions, touches, shots, saves, demos and boost pickups
//! by differencing each player's cumulative counters against the previous tick.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::RewardFunction;
use crate::game::events::EVENT_COUNT;
use crate::game::{GameSnapshot, PlayerEvents, PlayerRecord};

/// Weight per event, applied as given (pass a negative `concede` to punish conceding)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventWeights {
    pub goal: f32,
    pub concede: f32,
    pub touch: f32,
    pub shot: f32,
    pub save: f32,
    pub demo: f32,
    pub boost_pickup: f32,
}

impl EventWeights {
    /// Same order as [`PlayerEvents::to_array`]
    pub fn to_array(&self) -> [f32; EVENT_COUNT] {
        [
            self.goal,
            self.concede,
            self.touch,
            self.shot,
            self.save,
            self.demo,
            self.boost_pickup,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct EventReward {
    weights: [f32; EVENT_COUNT],
    /// Last seen event values per car id
    last_values: HashMap<u32, PlayerEvents>,
}

impl EventReward {
    pub fn new(weights: EventWeights) -> Self {
        Self {
            weights: weights.to_array(),
            last_values: HashMap::new(),
        }
    }
}

impl RewardFunction for EventReward {
    fn reset(&mut self, initial_state: &GameSnapshot) {
        self.last_values = initial_state
            .players
            .iter()
            .map(|p| (p.car_id, PlayerEvents::extract(p, initial_state)))
            .collect();
    }

    fn get_reward(
        &mut self,
        player: &PlayerRecord,
        state: &GameSnapshot,
        _previous_action: &[f32],
    ) -> f32 {
        let current = PlayerEvents::extract(player, state);
        let previous = self
            .last_values
            .insert(player.car_id, current)
            .unwrap_or(current);

        current
            .positive_delta(&previous)
            .iter()
            .zip(self.weights.iter())
            .map(|(delta, weight)| delta * weight)
            .sum()
    }
}
