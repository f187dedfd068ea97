//! Writable world state used at episode boundaries
//!
//! The engine owns the wrapper and lends it to the state setter for one reset
//! call. Setters take `Option`s so a scenario can overwrite single components
//! and leave the rest as the engine had them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{PhysicsObject, Team};

/// Mutable rigid body state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicsWrapper {
    pub position: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// (pitch, yaw, roll), radians
    pub rotation: Vec3,
}

fn apply(target: &mut Vec3, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
    if let Some(x) = x {
        target.x = x;
    }
    if let Some(y) = y {
        target.y = y;
    }
    if let Some(z) = z {
        target.z = z;
    }
}

impl PhysicsWrapper {
    pub fn set_pos(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        apply(&mut self.position, x, y, z);
    }

    pub fn set_lin_vel(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        apply(&mut self.linear_velocity, x, y, z);
    }

    pub fn set_rot(&mut self, pitch: Option<f32>, yaw: Option<f32>, roll: Option<f32>) {
        apply(&mut self.rotation, pitch, yaw, roll);
    }

    pub fn to_object(&self) -> PhysicsObject {
        PhysicsObject {
            position: self.position,
            linear_velocity: self.linear_velocity,
            angular_velocity: self.angular_velocity,
            rotation: self.rotation,
        }
    }
}

/// A car slot in the world state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarWrapper {
    pub id: u32,
    pub team: Team,
    pub physics: PhysicsWrapper,
    /// Boost amount (0..1)
    pub boost: f32,
}

impl CarWrapper {
    pub fn new(id: u32, team: Team) -> Self {
        Self {
            id,
            team,
            physics: PhysicsWrapper::default(),
            boost: 0.0,
        }
    }

    pub fn set_pos(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.physics.set_pos(x, y, z);
    }

    pub fn set_lin_vel(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.physics.set_lin_vel(x, y, z);
    }

    pub fn set_rot(&mut self, pitch: Option<f32>, yaw: Option<f32>, roll: Option<f32>) {
        self.physics.set_rot(pitch, yaw, roll);
    }
}

/// Complete writable world: ball plus every car
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateWrapper {
    pub ball: PhysicsWrapper,
    pub cars: Vec<CarWrapper>,
}

impl StateWrapper {
    /// Blue cars get ids `1..=blue_count`, orange cars follow
    pub fn new(blue_count: usize, orange_count: usize) -> Self {
        let teams = std::iter::repeat_n(Team::Blue, blue_count)
            .chain(std::iter::repeat_n(Team::Orange, orange_count));
        let cars = teams
            .enumerate()
            .map(|(i, team)| CarWrapper::new(i as u32 + 1, team))
            .collect();

        Self {
            ball: PhysicsWrapper::default(),
            cars,
        }
    }

    pub fn cars_of(&self, team: Team) -> impl Iterator<Item = &CarWrapper> {
        self.cars.iter().filter(move |c| c.team == team)
    }
}
