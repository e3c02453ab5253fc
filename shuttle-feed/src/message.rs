use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use viewport::Coordinates;

use crate::{errors::FeedError, state::ShuttleState};

/// Wire form of a bus position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// One message pushed by the feed.
///
/// ```json
/// {"etas": {"stop1": "3 min"}, "busPosition": {"latitude": 43.26, "longitude": -79.91}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMessage {
    pub etas: BTreeMap<String, String>,
    pub bus_position: BusPosition,
}

impl From<FeedMessage> for ShuttleState {
    fn from(message: FeedMessage) -> Self {
        ShuttleState::new(
            Coordinates::new(message.bus_position.latitude, message.bus_position.longitude),
            message.etas,
        )
    }
}

impl From<&ShuttleState> for FeedMessage {
    fn from(state: &ShuttleState) -> Self {
        FeedMessage {
            etas: state.etas.clone(),
            bus_position: BusPosition {
                latitude: state.bus_position.latitude,
                longitude: state.bus_position.longitude,
            },
        }
    }
}

/// Parses one text frame from the feed.
pub fn decode(text: &str) -> Result<ShuttleState, FeedError> {
    let message: FeedMessage = serde_json::from_str(text)?;
    Ok(message.into())
}

/// Serializes a snapshot the way the feed sends it.
pub fn encode(state: &ShuttleState) -> Result<String, FeedError> {
    Ok(serde_json::to_string(&FeedMessage::from(state))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_feed_message() {
        let text = r#"{"etas": {"stop1": "3 min", "stop2": "7 min"},
                       "busPosition": {"latitude": 43.2627, "longitude": -79.9161}}"#;

        let state = decode(text).unwrap();

        assert_eq!(state.eta("stop1"), Some("3 min"));
        assert_eq!(state.eta("stop2"), Some("7 min"));
        assert_eq!(state.bus_position, Coordinates::new(43.2627, -79.9161));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let text = r#"{"etas": {}, "busPosition": {"latitude": 1.0, "longitude": 2.0}, "route": "A"}"#;

        let state = decode(text).unwrap();

        assert!(state.etas.is_empty());
    }

    #[test]
    fn test_decode_rejects_missing_position() {
        let result = decode(r#"{"etas": {"stop1": "3 min"}}"#);

        assert!(matches!(result, Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(decode("bus is late"), Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_encoded_message_uses_camel_case() {
        let encoded = encode(&ShuttleState::loading()).unwrap();

        assert!(encoded.contains("\"busPosition\""));
        assert!(encoded.contains("\"etas\""));
        let decoded = decode(&encoded).unwrap();
        let expected = ShuttleState::loading();
        assert_eq!(decoded.etas, expected.etas);
        assert!((decoded.bus_position.latitude - expected.bus_position.latitude).abs() < 1e-12);
    }
}
