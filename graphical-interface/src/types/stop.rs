use viewport::Coordinates;

/// A fixed shuttle stop on campus.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub position: Coordinates,
}

impl Stop {
    pub fn new(id: &str, name: &str, position: Coordinates) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position,
        }
    }
}

/// The two stops served by the shuttle. Ids match the keys of the feed's
/// `etas` map.
pub fn campus_stops() -> Vec<Stop> {
    vec![
        Stop::new("stop1", "Stop A", Coordinates::new(43.2629, -79.9180)),
        Stop::new("stop2", "Stop B", Coordinates::new(43.2654, -79.9300)),
    ]
}
