//! Registry configuration and the room lifecycle state machine.

use std::time::Duration;

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for a [`crate::RoomRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How long the bot "thinks" before its deferred move is applied.
    pub bot_delay: Duration,

    /// Bound of the registry's command channel. When it fills up,
    /// senders wait (backpressure).
    pub channel_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            bot_delay: Duration::from_secs(1),
            channel_size: 64,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomPhase
// ---------------------------------------------------------------------------

/// The lifecycle state of a room.
///
/// ```text
/// Pending → Active → Finished
/// ```
///
/// - **Pending**: created by a human waiting for a second human. Bot
///   rooms skip this phase entirely.
/// - **Active**: turns alternate; claims are accepted.
/// - **Finished**: a participant reached five lines. Terminal — no
///   transition leaves it, and no claim mutates a finished room.
///
/// Destruction is not a phase: a room in any phase is dropped outright
/// when a participant disconnects, and only then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    Pending,
    Active,
    Finished,
}

impl RoomPhase {
    /// Returns `true` if the room is still waiting for its second
    /// participant.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if claims are currently accepted.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if the game has ended.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Active => write!(f, "Active"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_predicates() {
        assert!(RoomPhase::Pending.is_joinable());
        assert!(!RoomPhase::Active.is_joinable());
        assert!(!RoomPhase::Finished.is_joinable());

        assert!(!RoomPhase::Pending.is_active());
        assert!(RoomPhase::Active.is_active());
        assert!(!RoomPhase::Finished.is_active());

        assert!(RoomPhase::Finished.is_finished());
        assert!(!RoomPhase::Active.is_finished());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RoomPhase::Pending.to_string(), "Pending");
        assert_eq!(RoomPhase::Active.to_string(), "Active");
        assert_eq!(RoomPhase::Finished.to_string(), "Finished");
    }

    #[test]
    fn test_config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.bot_delay, Duration::from_secs(1));
        assert_eq!(config.channel_size, 64);
    }
}
