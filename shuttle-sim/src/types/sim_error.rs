use std::fmt;

/// Represents errors that can occur in the feed simulator.
#[derive(Debug)]
pub enum SimError {
    Bind(String),   // Listener could not be opened
    Encode(String), // Snapshot could not be serialized
    LockError(String),
    InvalidRoute(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Bind(ref addr) => write!(f, "Could not listen on {}", addr),
            SimError::Encode(ref msg) => write!(f, "Could not encode snapshot: {}", msg),
            SimError::LockError(ref msg) => write!(f, "Lock error: {}", msg),
            SimError::InvalidRoute(ref msg) => write!(f, "Invalid route: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}

impl From<shuttle_feed::FeedError> for SimError {
    fn from(err: shuttle_feed::FeedError) -> Self {
        SimError::Encode(err.to_string())
    }
}
