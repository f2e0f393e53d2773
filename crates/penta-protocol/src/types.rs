//! Message and identity types for Penta's gateway-facing surface.

use std::fmt;

use penta_game::Board;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque per-connection identifier for a human participant, or the
/// reserved sentinel for the bot opponent.
///
/// `#[serde(transparent)]` keeps the JSON representation a plain string,
/// so `ParticipantId("k3PZ".into())` serializes as just `"k3PZ"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// The sentinel identifier the bot opponent plays under.
    pub const BOT: &'static str = "BOT";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier of the bot opponent's seat.
    pub fn bot() -> Self {
        Self(Self::BOT.to_owned())
    }

    /// Whether this identifier is the bot sentinel.
    pub fn is_bot(&self) -> bool {
        self.0 == Self::BOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A short human-typeable room code: 4 characters of uppercase base-36.
///
/// Codes are generated by the registry; collisions are not checked (an
/// accepted low-probability risk, not resolved by retrying).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Intents (gateway → core)
// ---------------------------------------------------------------------------

/// What a participant's connection asks the core to do.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON, e.g.
/// `{ "type": "ClaimNumber", "code": "A1B2", "number": 17 }` — the shape
/// gateway-side JavaScript handles most naturally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    /// Open a new room; `vs_bot` picks the bot opponent instead of
    /// waiting for a second human.
    CreateRoom { vs_bot: bool },

    /// Join the room with this code as the second human participant.
    JoinRoom { code: RoomCode },

    /// Claim a number in the given room.
    ClaimNumber { code: RoomCode, number: u8 },

    /// The connection is gone; tear down any room it occupies.
    Disconnect,
}

// ---------------------------------------------------------------------------
// Notifications (core → gateway)
// ---------------------------------------------------------------------------

/// Why an intent was rejected. Every rejection is recoverable and leaves
/// room state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// No room is registered under the given code.
    RoomNotFound,
    /// The room is a bot room, already has two participants, or the
    /// joiner is already seated in it.
    InvalidJoin,
    /// The room is still waiting for a second participant.
    NotStarted,
    /// The claimant is not the participant whose turn it is.
    NotYourTurn,
    /// The number was already claimed by either side this game.
    AlreadyClaimed,
    /// The game has ended; no further claims are accepted.
    GameFinished,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RoomNotFound => "room not found",
            Self::InvalidJoin => "room cannot be joined",
            Self::NotStarted => "game has not started",
            Self::NotYourTurn => "not your turn",
            Self::AlreadyClaimed => "number already claimed",
            Self::GameFinished => "game is already over",
        };
        f.write_str(s)
    }
}

/// What the core tells a participant's connection.
///
/// `line_counts` is index-aligned with the `participants` list announced
/// in [`Notification::GameStarted`] (creator first, then joiner or bot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// Sent to the creator once their room exists.
    RoomCreated {
        code: RoomCode,
        board: Board,
        participant_index: usize,
    },

    /// Sent to the joiner once they are seated.
    RoomJoined {
        code: RoomCode,
        board: Board,
        participant_index: usize,
    },

    /// Sent to every human seat when play begins.
    GameStarted {
        current_turn: ParticipantId,
        participants: Vec<ParticipantId>,
        vs_bot: bool,
    },

    /// A claim was applied and the game continues.
    StateUpdated {
        claimed_number: u8,
        claimant: ParticipantId,
        current_turn: ParticipantId,
        line_counts: Vec<u8>,
    },

    /// A participant reached five lines; the room is finished.
    GameOver {
        winner: ParticipantId,
        participants: Vec<ParticipantId>,
    },

    /// The submitted intent was rejected.
    OperationFailed { reason: FailureReason },

    /// The other human participant disconnected and the room is gone.
    PlayerDisconnected,
}

// =========================================================================
// Tests
// =========================================================================
