//! Episode state randomization
//!
//! Every reset picks one of three scenario layouts and writes car and ball
//! state into the engine's wrapper. All randomness comes from a seeded PCG
//! stream so a run can be replayed from its seed.

use std::f32::consts::FRAC_PI_2;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::game::{StateWrapper, Team};

/// Range of the attacking car's (and ball's) x offset
pub const CAR_X_RANGE: std::ops::RangeInclusive<i32> = -500..=500;
/// Scenario roll range; folded into 3 buckets of 5/4/4 outcomes
pub const SCENARIO_ROLL_RANGE: std::ops::RangeInclusive<u32> = 0..=12;
/// Defend scenario ball velocity ranges
pub const DEFEND_BALL_VEL_X: std::ops::RangeInclusive<i32> = -200..=200;
pub const DEFEND_BALL_VEL_Y: std::ops::RangeInclusive<i32> = 100..=1500;

/// Ball rest height for every scenario
const BALL_Z: f32 = 70.0;

/// Initial condition layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Blue car lined up behind the ball on the orange half
    Attack,
    /// Blue car on its goal line, ball rolling toward the blue half
    Defend,
    /// Both cars near midfield, ball dropped beside the blue car
    Center,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Attack, Scenario::Defend, Scenario::Center];

    /// Map a scenario roll onto a layout
    pub fn from_roll(roll: u32) -> Self {
        match roll % 3 {
            0 => Scenario::Attack,
            1 => Scenario::Defend,
            _ => Scenario::Center,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Attack => "attack",
            Scenario::Defend => "defend",
            Scenario::Center => "center",
        }
    }

    /// Car position, yaw and boost for a team in this layout
    fn car_layout(&self, team: Team, car_x: f32) -> ([f32; 3], f32, f32) {
        let yaw = match team {
            Team::Blue => FRAC_PI_2,
            Team::Orange => -FRAC_PI_2,
        };
        let (pos, boost) = match (self, team) {
            (Scenario::Attack, Team::Blue) => ([car_x, 0.0, 0.0], 0.25),
            (Scenario::Attack, Team::Orange) => ([0.0, 4260.0, 0.0], 0.25),
            (Scenario::Defend, Team::Blue) => ([0.0, -5120.0, 0.0], 0.5),
            (Scenario::Defend, Team::Orange) => ([0.0, -2500.0, 0.0], 0.5),
            (Scenario::Center, Team::Blue) => ([0.0, -1024.0, 30.0], 0.5),
            (Scenario::Center, Team::Orange) => ([0.0, 1024.0, 30.0], 0.5),
        };
        (pos, yaw, boost)
    }
}

/// Writes initial conditions at the start of an episode
pub trait StateSetter {
    fn reset(&mut self, wrapper: &mut StateWrapper);
}

/// Seeded attack/defend/center scenario sampler
#[derive(Debug, Clone)]
pub struct TrainingStateSetter {
    rng: Pcg32,
    last_scenario: Option<Scenario>,
}

impl TrainingStateSetter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_scenario: None,
        }
    }

    /// Scenario written by the most recent reset
    pub fn last_scenario(&self) -> Option<Scenario> {
        self.last_scenario
    }

    /// Write `scenario` into the wrapper
    ///
    /// `car_x` only affects the attack layout. The defend layout draws its ball
    /// velocity from this setter's RNG.
    pub fn apply(&mut self, scenario: Scenario, car_x: i32, wrapper: &mut StateWrapper) {
        let car_x = car_x as f32;

        for car in &mut wrapper.cars {
            let ([x, y, z], yaw, boost) = scenario.car_layout(car.team, car_x);
            car.set_pos(Some(x), Some(y), Some(z));
            car.set_rot(None, Some(yaw), None);
            car.boost = boost;
        }

        let ball = &mut wrapper.ball;
        match scenario {
            Scenario::Attack => {
                ball.set_pos(Some(car_x), Some(2816.0), Some(BALL_Z));
                ball.set_lin_vel(Some(0.0), Some(0.0), Some(0.0));
            }
            Scenario::Defend => {
                let vel_x = self.rng.random_range(DEFEND_BALL_VEL_X) as f32;
                let vel_y = self.rng.random_range(DEFEND_BALL_VEL_Y) as f32;
                ball.set_pos(Some(0.0), Some(-2816.0), Some(BALL_Z));
                ball.set_lin_vel(Some(vel_x), Some(vel_y), Some(0.0));
            }
            Scenario::Center => {
                ball.set_pos(Some(0.0), Some(-960.0), Some(BALL_Z));
                ball.set_lin_vel(Some(0.0), Some(0.0), Some(0.0));
            }
        }

        self.last_scenario = Some(scenario);
    }

    /// Draw a scenario and write it into the wrapper
    pub fn sample(&mut self, wrapper: &mut StateWrapper) -> Scenario {
        let car_x = self.rng.random_range(CAR_X_RANGE);
        let roll = self.rng.random_range(SCENARIO_ROLL_RANGE);
        let scenario = Scenario::from_roll(roll);
        log::debug!("Episode scenario: {} (roll {}, car_x {})", scenario.as_str(), roll, car_x);

        self.apply(scenario, car_x, wrapper);
        scenario
    }
}

impl StateSetter for TrainingStateSetter {
    fn reset(&mut self, wrapper: &mut StateWrapper) {
        self.sample(wrapper);
    }
}
