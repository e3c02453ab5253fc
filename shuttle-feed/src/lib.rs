//! Live shuttle position and stop ETAs, pushed over a WebSocket.

mod config;
mod errors;
mod message;
mod state;
mod subscription;

pub use config::{FeedConfig, DEFAULT_ENDPOINT};
pub use errors::FeedError;
pub use message::{decode, encode, BusPosition, FeedMessage};
pub use state::{ShuttleState, KNOWN_STOPS, LOADING};
pub use subscription::{Endpoint, Subscription};
