//! Codec trait and implementations for serializing messages.
//!
//! The core does not care how intents and notifications become bytes —
//! the gateway picks a [`Codec`]. [`JsonCodec`] (feature `json`, on by
//! default) is the human-readable choice; a binary codec can be added
//! later without touching the message types.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts message types to bytes and back.
///
/// `Send + Sync + 'static` so a codec can live inside long-running
/// Tokio tasks; `DeserializeOwned` so decoded values own their data and
/// the input buffer can be dropped.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// truncated, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ## Example
///
/// ```rust
/// use penta_protocol::{Codec, Intent, JsonCodec, RoomCode};
///
/// let codec = JsonCodec;
/// let intent = Intent::JoinRoom { code: RoomCode::new("A1B2") };
///
/// let bytes = codec.encode(&intent).unwrap();
/// let decoded: Intent = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, intent);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{FailureReason, Notification};

    #[test]
    fn test_json_codec_round_trip() {
        let codec = JsonCodec;
        let note = Notification::OperationFailed {
            reason: FailureReason::AlreadyClaimed,
        };
        let bytes = codec.encode(&note).unwrap();
        let decoded: Notification = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, note);
    }

    #[test]
    fn test_json_codec_rejects_garbage() {
        let codec = JsonCodec;
        let result: Result<Notification, _> = codec.decode(b"not json at all");
        assert!(result.is_err());
    }
}
