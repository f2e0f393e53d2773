//! Error types for the room layer.

use penta_protocol::{FailureReason, ParticipantId, RoomCode};

/// A rejected room operation. Every variant is recoverable, is reported
/// back to the originating participant as `OperationFailed`, and leaves
/// room state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No room is registered under this code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The room is a bot room, already seats two participants, or the
    /// joiner is already in it.
    #[error("room {0} cannot be joined")]
    InvalidJoin(RoomCode),

    /// The room is still waiting for a second participant.
    #[error("room {0} has not started")]
    NotStarted(RoomCode),

    /// The claimant is not the participant whose turn it is.
    #[error("not {0}'s turn")]
    NotYourTurn(ParticipantId),

    /// The number was already claimed by either side this game.
    #[error("number {0} already claimed")]
    AlreadyClaimed(u8),

    /// The game is over; the room accepts no further claims.
    #[error("room {0} is already finished")]
    GameFinished(RoomCode),
}

impl RoomError {
    /// The protocol-level reason carried in `OperationFailed`.
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::RoomNotFound(_) => FailureReason::RoomNotFound,
            Self::InvalidJoin(_) => FailureReason::InvalidJoin,
            Self::NotStarted(_) => FailureReason::NotStarted,
            Self::NotYourTurn(_) => FailureReason::NotYourTurn,
            Self::AlreadyClaimed(_) => FailureReason::AlreadyClaimed,
            Self::GameFinished(_) => FailureReason::GameFinished,
        }
    }
}

/// The registry task is gone (channel closed) — the process is shutting
/// down or the actor panicked.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("room registry is unavailable")]
    Closed,
}
