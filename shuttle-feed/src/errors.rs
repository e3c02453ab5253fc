use std::fmt;

/// Errors raised while opening or reading the shuttle feed.
#[derive(Debug)]
pub enum FeedError {
    InvalidEndpoint(String), // Endpoint is not a usable ws:// or wss:// address
    Connection(String),      // TCP connection could not be established
    Handshake(String),       // WebSocket upgrade was rejected
    Io(std::io::Error),
    Decode(String), // Payload is not a valid feed message
    Closed,         // Remote side closed the channel
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::InvalidEndpoint(endpoint) => write!(f, "Invalid feed endpoint: {}", endpoint),
            FeedError::Connection(msg) => write!(f, "Could not connect to feed: {}", msg),
            FeedError::Handshake(msg) => write!(f, "Feed handshake failed: {}", msg),
            FeedError::Io(e) => write!(f, "Feed I/O error: {}", e),
            FeedError::Decode(msg) => write!(f, "Malformed feed message: {}", msg),
            FeedError::Closed => write!(f, "Feed closed by remote"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Io(err)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Decode(err.to_string())
    }
}

impl From<tungstenite::Error> for FeedError {
    fn from(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
                FeedError::Closed
            }
            tungstenite::Error::Io(e) => FeedError::Io(e),
            other => FeedError::Connection(other.to_string()),
        }
    }
}
