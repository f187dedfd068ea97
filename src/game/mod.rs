//! Game state seen by the training environment
//!
//! Snapshots are produced once per tick by the external engine adapter and are
//! never mutated by reward terms. The wrapper is the only writable view and is
//! handed to the state setter at episode boundaries.

pub mod events;
pub mod state;
pub mod wrapper;

pub use events::PlayerEvents;
pub use state::{GameSnapshot, PhysicsObject, PlayerRecord, Team};
pub use wrapper::{CarWrapper, PhysicsWrapper, StateWrapper};
