//! Training settings
//!
//! Persisted as JSON next to the training run. Defaults reproduce the
//! 1v1 setup the bot was trained with.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PHYSICS_TICK_FREQ;
use crate::reward::{
    AirDribbleReward, BallToGoalReward, CombinedReward, EventReward, EventWeights,
    HitSpeedReward, PlayerToBallReward, VelocityReward,
};
use crate::terminal::Terminal;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

fn default_threshold() -> f32 {
    10.0
}

/// One reward term with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardKind {
    Events {
        weights: EventWeights,
    },
    PlayerToBall {
        ball_speed_factor: f32,
    },
    HitSpeed {
        reward_weight: f32,
    },
    AirDribble {
        reward_weight: f32,
        #[serde(default = "default_threshold")]
        distance_threshold: f32,
    },
    BallToGoal {
        reward_weight: f32,
        #[serde(default = "default_threshold")]
        distance_threshold: f32,
    },
    Velocity,
}

/// A reward term and its weight in the combined reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    pub term: RewardKind,
    pub weight: f32,
}

impl RewardEntry {
    pub fn new(term: RewardKind, weight: f32) -> Self {
        Self { term, weight }
    }

    fn params(&self) -> Vec<f32> {
        let mut params = vec![self.weight];
        match &self.term {
            RewardKind::Events { weights } => params.extend(weights.to_array()),
            RewardKind::PlayerToBall { ball_speed_factor } => params.push(*ball_speed_factor),
            RewardKind::HitSpeed { reward_weight } => params.push(*reward_weight),
            RewardKind::AirDribble {
                reward_weight,
                distance_threshold,
            }
            | RewardKind::BallToGoal {
                reward_weight,
                distance_threshold,
            } => params.extend([*reward_weight, *distance_threshold]),
            RewardKind::Velocity => {}
        }
        params
    }
}

/// Complete training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSettings {
    /// Seed for the episode state setter
    pub seed: u64,
    /// Cars per team
    pub team_size: usize,
    /// Whether the other team is filled with cars
    pub spawn_opponents: bool,
    /// Physics ticks each action is repeated for
    pub frame_skip: u32,
    /// Seconds after which a future reward is worth half
    pub half_life_seconds: f32,
    pub rewards: Vec<RewardEntry>,
    pub terminals: Vec<Terminal>,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            team_size: 1,
            spawn_opponents: true,
            frame_skip: 8,
            half_life_seconds: 5.0,
            rewards: vec![
                RewardEntry::new(RewardKind::PlayerToBall { ball_speed_factor: 0.1 }, 1.0),
                RewardEntry::new(RewardKind::HitSpeed { reward_weight: 5.0 }, 1.0),
                RewardEntry::new(
                    RewardKind::AirDribble {
                        reward_weight: 3.0,
                        distance_threshold: default_threshold(),
                    },
                    1.0,
                ),
                RewardEntry::new(
                    RewardKind::BallToGoal {
                        reward_weight: 5.0,
                        distance_threshold: default_threshold(),
                    },
                    1.0,
                ),
                RewardEntry::new(RewardKind::Velocity, 0.005),
                RewardEntry::new(
                    RewardKind::Events {
                        weights: EventWeights {
                            goal: 10.0,
                            concede: -10.0,
                            touch: 1.0,
                            shot: 5.0,
                            save: 5.0,
                            demo: 0.0,
                            boost_pickup: 0.1,
                        },
                    },
                    1.0,
                ),
            ],
            terminals: vec![
                Terminal::timeout(10_000),
                Terminal::no_touch_timeout(2_500),
                Terminal::goal_scored(),
            ],
        }
    }
}

impl TrainingSettings {
    /// Agent decisions per second
    pub fn fps(&self) -> f32 {
        PHYSICS_TICK_FREQ / self.frame_skip as f32
    }

    /// Discount factor giving rewards `half_life_seconds` away half the weight
    pub fn gamma(&self) -> f32 {
        (0.5f32.ln() / (self.fps() * self.half_life_seconds)).exp()
    }

    /// Cars in the match (blue, orange)
    pub fn car_counts(&self) -> (usize, usize) {
        let opponents = if self.spawn_opponents { self.team_size } else { 0 };
        (self.team_size, opponents)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_skip == 0 {
            return Err(SettingsError::Invalid("frame_skip must be at least 1".into()));
        }
        if !(self.half_life_seconds > 0.0 && self.half_life_seconds.is_finite()) {
            return Err(SettingsError::Invalid(format!(
                "half_life_seconds must be positive, got {}",
                self.half_life_seconds
            )));
        }
        if self.team_size == 0 {
            return Err(SettingsError::Invalid("team_size must be at least 1".into()));
        }
        if self.rewards.is_empty() {
            return Err(SettingsError::Invalid("no reward terms configured".into()));
        }
        if let Some((i, _)) = self
            .rewards
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.params().iter().any(|p| !p.is_finite()))
        {
            return Err(SettingsError::Invalid(format!(
                "reward entry {} has a non-finite parameter",
                i
            )));
        }
        Ok(())
    }

    /// Build the combined reward described by `rewards`
    pub fn build_reward(&self) -> CombinedReward {
        let mut combined = CombinedReward::new();
        for entry in &self.rewards {
            match entry.term.clone() {
                RewardKind::Events { weights } => {
                    combined.push(EventReward::new(weights), entry.weight)
                }
                RewardKind::PlayerToBall { ball_speed_factor } => {
                    combined.push(PlayerToBallReward::new(ball_speed_factor), entry.weight)
                }
                RewardKind::HitSpeed { reward_weight } => {
                    combined.push(HitSpeedReward::new(reward_weight), entry.weight)
                }
                RewardKind::AirDribble {
                    reward_weight,
                    distance_threshold,
                } => combined.push(
                    AirDribbleReward::new(reward_weight).with_threshold(distance_threshold),
                    entry.weight,
                ),
                RewardKind::BallToGoal {
                    reward_weight,
                    distance_threshold,
                } => combined.push(
                    BallToGoalReward::new(reward_weight).with_threshold(distance_threshold),
                    entry.weight,
                ),
                RewardKind::Velocity => combined.push(VelocityReward, entry.weight),
            }
        }
        combined
    }

    /// Fresh terminal conditions (counters zeroed)
    pub fn build_terminals(&self) -> Vec<Terminal> {
        self.terminals.clone()
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let settings = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!(
            "Loaded settings from {} ({} reward terms)",
            path.display(),
            settings.rewards.len()
        );
        Ok(settings)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
