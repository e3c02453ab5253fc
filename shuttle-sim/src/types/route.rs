use viewport::Coordinates;

use super::sim_error::SimError;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A point the bus drives through. Stops carry the feed's stop id.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub position: Coordinates,
    pub stop_id: Option<String>,
}

impl Waypoint {
    fn street(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Coordinates::new(latitude, longitude),
            stop_id: None,
        }
    }

    fn stop(id: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            position: Coordinates::new(latitude, longitude),
            stop_id: Some(id.to_string()),
        }
    }
}

/// A closed loop: after the last waypoint the bus drives back to the first.
#[derive(Debug, Clone)]
pub struct Route {
    waypoints: Vec<Waypoint>,
    // Distance from the first waypoint to each waypoint, in meters.
    offsets: Vec<f64>,
    length: f64,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, SimError> {
        if waypoints.len() < 2 {
            return Err(SimError::InvalidRoute(
                "a loop needs at least two waypoints".to_string(),
            ));
        }

        let mut offsets = Vec::with_capacity(waypoints.len());
        let mut length = 0.0;
        for (i, waypoint) in waypoints.iter().enumerate() {
            offsets.push(length);
            let next = &waypoints[(i + 1) % waypoints.len()];
            length += distance_meters(waypoint.position, next.position);
        }

        if length <= 0.0 {
            return Err(SimError::InvalidRoute("loop has no length".to_string()));
        }

        Ok(Self {
            waypoints,
            offsets,
            length,
        })
    }

    /// Loop between the two campus stops.
    pub fn campus_loop() -> Result<Self, SimError> {
        Self::new(vec![
            Waypoint::stop("stop1", 43.2629, -79.9180),
            Waypoint::street(43.2612, -79.9215),
            Waypoint::street(43.2640, -79.9262),
            Waypoint::stop("stop2", 43.2654, -79.9300),
            Waypoint::street(43.2668, -79.9240),
            Waypoint::street(43.2650, -79.9195),
        ])
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn stop_ids(&self) -> impl Iterator<Item = &str> {
        self.waypoints
            .iter()
            .filter_map(|waypoint| waypoint.stop_id.as_deref())
    }

    /// Where the bus is after driving `distance` meters from the first
    /// waypoint.
    pub fn position_at(&self, distance: f64) -> Coordinates {
        let distance = distance.rem_euclid(self.length);
        let segment = self
            .offsets
            .iter()
            .rposition(|offset| *offset <= distance)
            .unwrap_or(0);

        let from = &self.waypoints[segment];
        let to = &self.waypoints[(segment + 1) % self.waypoints.len()];
        let segment_length = distance_meters(from.position, to.position);
        if segment_length <= 0.0 {
            return from.position;
        }

        let t = (distance - self.offsets[segment]) / segment_length;
        Coordinates::new(
            from.position.latitude + (to.position.latitude - from.position.latitude) * t,
            from.position.longitude + (to.position.longitude - from.position.longitude) * t,
        )
    }

    /// Meters left to drive from `distance` until the bus reaches `stop_id`.
    pub fn distance_to_stop(&self, distance: f64, stop_id: &str) -> Option<f64> {
        let index = self
            .waypoints
            .iter()
            .position(|waypoint| waypoint.stop_id.as_deref() == Some(stop_id))?;

        Some((self.offsets[index] - distance).rem_euclid(self.length))
    }
}

/// Great-circle distance between two points.
pub fn distance_meters(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}
