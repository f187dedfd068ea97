//! Per-tick game snapshot types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::wrapper::StateWrapper;
use crate::consts::{BLUE_TEAM, ORANGE_TEAM};

/// One of the two teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Team {
    #[default]
    Blue,
    Orange,
}

impl Team {
    /// Team number as reported by the game
    pub fn num(&self) -> u8 {
        match self {
            Team::Blue => BLUE_TEAM,
            Team::Orange => ORANGE_TEAM,
        }
    }

    pub fn from_num(num: u8) -> Option<Self> {
        match num {
            BLUE_TEAM => Some(Team::Blue),
            ORANGE_TEAM => Some(Team::Orange),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Team::Blue => Team::Orange,
            Team::Orange => Team::Blue,
        }
    }
}

/// Rigid body state of the ball or a car
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicsObject {
    pub position: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Euler angles as (pitch, yaw, roll), radians
    pub rotation: Vec3,
}

impl PhysicsObject {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, linear_velocity: Vec3) -> Self {
        self.linear_velocity = linear_velocity;
        self
    }
}

/// A player's car and cumulative match counters
///
/// Counters only increase within an episode; the engine zeroes them at episode start.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Stable for the whole episode
    pub car_id: u32,
    pub team: Team,
    pub car_data: PhysicsObject,
    /// Boost amount (0..1)
    pub boost_amount: f32,
    pub match_goals: u32,
    pub match_shots: u32,
    pub match_saves: u32,
    pub match_demolishes: u32,
    /// Whether the car touched the ball during this tick
    pub ball_touched: bool,
}

impl PlayerRecord {
    pub fn new(car_id: u32, team: Team) -> Self {
        Self {
            car_id,
            team,
            ..Default::default()
        }
    }
}

/// Immutable view of the world for one tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub ball: PhysicsObject,
    /// Sorted by car id
    pub players: Vec<PlayerRecord>,
    pub blue_score: u32,
    pub orange_score: u32,
}

impl GameSnapshot {
    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue_score,
            Team::Orange => self.orange_score,
        }
    }

    /// True if any car touched the ball this tick
    pub fn any_touch(&self) -> bool {
        self.players.iter().any(|p| p.ball_touched)
    }
}

/// Snapshot of a freshly set episode: counters zeroed, scores zeroed
impl From<&StateWrapper> for GameSnapshot {
    fn from(wrapper: &StateWrapper) -> Self {
        let mut players: Vec<PlayerRecord> = wrapper
            .cars
            .iter()
            .map(|car| PlayerRecord {
                car_id: car.id,
                team: car.team,
                car_data: car.physics.to_object(),
                boost_amount: car.boost,
                ..Default::default()
            })
            .collect();
        players.sort_by_key(|p| p.car_id);

        Self {
            ball: wrapper.ball.to_object(),
            players,
            blue_score: 0,
            orange_score: 0,
        }
    }
}
