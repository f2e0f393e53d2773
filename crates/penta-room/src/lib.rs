//! Room lifecycle and game state for Penta.
//!
//! A [`Room`] is one game: two seats (creator first), each with its own
//! board and marks, a shared claimed-number set, and a turn pointer. The
//! [`RoomRegistry`] actor owns every active room in the process and is
//! the only thing that mutates them — intents are processed one at a
//! time, so turn order is a structural guarantee, not a locking one.
//!
//! # Key types
//!
//! - [`Room`] — the turn-based game state machine
//! - [`RoomRegistry`] / [`spawn_registry`] — the actor owning all rooms
//! - [`RegistryHandle`] — send intents to the running registry
//! - [`RoomPhase`] — lifecycle state machine
//! - [`RegistryConfig`] — tuning (bot thinking delay, channel size)

mod config;
mod error;
mod registry;
mod room;

pub use config::{RegistryConfig, RoomPhase};
pub use error::{RegistryError, RoomError};
pub use registry::{NotificationSender, RegistryHandle, RoomInfo, RoomRegistry, spawn_registry};
pub use room::{ClaimOutcome, LINES_TO_WIN, MAX_PARTICIPANTS, Room};
