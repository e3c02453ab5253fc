use std::collections::BTreeMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use shuttle_feed::ShuttleState;

use super::route::Route;

/// Average speed of the shuttle on campus streets, in m/s.
const CRUISE_SPEED: f64 = 7.0;
const ARRIVING: &str = "Arriving";

/// Drives a bus around a route and reports where it is and how far off
/// each stop is.
pub struct Simulation {
    route: Route,
    distance: f64,
    speed: f64,
    rng: StdRng,
}

impl Simulation {
    pub fn new(route: Route) -> Self {
        Self::with_rng(route, StdRng::from_entropy())
    }

    pub fn with_rng(route: Route, rng: StdRng) -> Self {
        Self {
            route,
            distance: 0.0,
            speed: CRUISE_SPEED,
            rng,
        }
    }

    /// Advances the bus by `seconds` of driving, with some traffic noise on
    /// the speed, and returns the resulting snapshot.
    pub fn tick(&mut self, seconds: f64) -> ShuttleState {
        self.speed = CRUISE_SPEED * self.rng.gen_range(0.6..1.4);
        self.distance = (self.distance + self.speed * seconds).rem_euclid(self.route.length());
        self.snapshot()
    }

    /// Current position and ETAs, without moving.
    pub fn snapshot(&self) -> ShuttleState {
        let etas: BTreeMap<String, String> = self
            .route
            .stop_ids()
            .filter_map(|stop_id| {
                let meters = self.route.distance_to_stop(self.distance, stop_id)?;
                Some((stop_id.to_string(), format_eta(meters / self.speed)))
            })
            .collect();

        ShuttleState::new(self.route.position_at(self.distance), etas)
    }
}

/// Human readable ETA for the feed.
pub fn format_eta(seconds: f64) -> String {
    if seconds < 60.0 {
        ARRIVING.to_string()
    } else {
        format!("{} min", (seconds / 60.0).round() as u64)
    }
}
