use std::collections::BTreeMap;

use viewport::{Coordinates, LOCKED_REGION};

/// ETA text shown before the first feed message arrives.
pub const LOADING: &str = "Loading...";

/// Identifiers of the stops the feed reports on.
pub const KNOWN_STOPS: [&str; 2] = ["stop1", "stop2"];

/// Latest snapshot pushed by the feed: where the bus is and when it reaches
/// each stop.
///
/// Snapshots are replaced whole, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ShuttleState {
    pub bus_position: Coordinates,
    pub etas: BTreeMap<String, String>,
}

impl ShuttleState {
    pub fn new(bus_position: Coordinates, etas: BTreeMap<String, String>) -> Self {
        Self { bus_position, etas }
    }

    /// Placeholder shown until the feed delivers something.
    pub fn loading() -> Self {
        let etas = KNOWN_STOPS
            .iter()
            .map(|stop| (stop.to_string(), LOADING.to_string()))
            .collect();

        Self {
            bus_position: LOCKED_REGION.center(),
            etas,
        }
    }

    pub fn eta(&self, stop_id: &str) -> Option<&str> {
        self.etas.get(stop_id).map(String::as_str)
    }
}

impl Default for ShuttleState {
    fn default() -> Self {
        Self::loading()
    }
}
