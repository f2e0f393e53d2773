//! The vocabulary spoken between Penta's core and its session gateway.
//!
//! The gateway (connection handshake, framing, reconnection UI) lives
//! outside this repository; from the core's point of view it is a client
//! that submits [`Intent`]s and relays [`Notification`]s back to player
//! connections. This crate defines those messages plus the identity
//! newtypes they carry:
//!
//! - **Types** ([`Intent`], [`Notification`], [`ParticipantId`],
//!   [`RoomCode`], [`FailureReason`]) — the structures on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how they become bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{FailureReason, Intent, Notification, ParticipantId, RoomCode};
