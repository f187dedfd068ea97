//! Action vector to controller mapping
//!
//! Actions are 8 values in the order throttle, steer, pitch, yaw, roll, jump,
//! boost, handbrake.

use serde::{Deserialize, Serialize};

/// Length of an action vector
pub const ACTION_LEN: usize = 8;

/// Controller inputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerState {
    /// -1 (reverse) to 1 (forward)
    pub throttle: f32,
    pub steer: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub jump: bool,
    pub boost: bool,
    pub handbrake: bool,
}

impl ControllerState {
    /// Analog axes are clamped to [-1, 1]; buttons are pressed when positive
    pub fn from_action(action: &[f32; ACTION_LEN]) -> Self {
        let axis = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Self {
            throttle: axis(action[0]),
            steer: axis(action[1]),
            pitch: axis(action[2]),
            yaw: axis(action[3]),
            roll: axis(action[4]),
            jump: action[5] > 0.0,
            boost: action[6] > 0.0,
            handbrake: action[7] > 0.0,
        }
    }

    /// Back to the action vector layout
    pub fn to_action(&self) -> [f32; ACTION_LEN] {
        let button = |b: bool| if b { 1.0 } else { 0.0 };
        [
            self.throttle,
            self.steer,
            self.pitch,
            self.yaw,
            self.roll,
            button(self.jump),
            button(self.boost),
            button(self.handbrake),
        ]
    }
}

/// Parser for policies that emit a bin index per control
///
/// The five analog controls use 3 bins mapped to -1, 0 and 1; the three
/// buttons use 2 bins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteAction;

impl DiscreteAction {
    pub const ANALOG_BINS: u8 = 3;

    /// Bin count for each slot of the action
    pub fn action_space() -> [u8; ACTION_LEN] {
        [3, 3, 3, 3, 3, 2, 2, 2]
    }

    pub fn parse(&self, bins: &[u8; ACTION_LEN]) -> [f32; ACTION_LEN] {
        let half = f32::from(Self::ANALOG_BINS / 2);
        std::array::from_fn(|i| {
            let bin = f32::from(bins[i].min(Self::action_space()[i] - 1));
            if i < 5 { bin / half - 1.0 } else { bin }
        })
    }

    pub fn to_controls(&self, bins: &[u8; ACTION_LEN]) -> ControllerState {
        ControllerState::from_action(&self.parse(bins))
    }
}
