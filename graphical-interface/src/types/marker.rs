use viewport::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Stop,
    Bus,
}

/// A point drawn on the map with its callout text.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub kind: MarkerKind,
    pub position: Coordinates,
    pub title: String,
    pub label: String,
}
