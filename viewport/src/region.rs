/// A latitude/longitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A map viewport: the center point plus the visible span on each axis.
///
/// Regions are plain values. The controller never edits one in place, it
/// always produces a fresh region from a proposal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl GeoRegion {
    pub const fn new(
        latitude: f64,
        longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
            latitude_delta,
            longitude_delta,
        }
    }

    /// Center point of the region.
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Same span, centered somewhere else.
    pub fn with_center(self, center: Coordinates) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            ..self
        }
    }
}

/// The administrator-chosen box the map may never leave. Its span is also the
/// widest zoom the user can reach.
pub const LOCKED_REGION: GeoRegion = GeoRegion::new(
    43.26252182610375,
    -79.92393298074603,
    0.021165080277782522,
    0.01742396503686905,
);

/// Closest zoom allowed, as a latitude span in degrees.
pub const MIN_LATITUDE_DELTA: f64 = 0.0005;

/// Widest zoom allowed: exactly the locked box.
pub const MAX_LATITUDE_DELTA: f64 = LOCKED_REGION.latitude_delta;

/// Longitude span per degree of latitude span, fixed by the locked box.
pub const ASPECT_RATIO: f64 = LOCKED_REGION.longitude_delta / LOCKED_REGION.latitude_delta;

/// Edges of the rectangle a region center must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockedBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LockedBounds {
    /// Edges of the rectangle centered on `locked` with half its deltas as
    /// half-extents.
    pub fn of(locked: &GeoRegion) -> Self {
        let half_lat = locked.latitude_delta / 2.0;
        let half_lon = locked.longitude_delta / 2.0;

        Self {
            min_lat: locked.latitude - half_lat,
            max_lat: locked.latitude + half_lat,
            min_lon: locked.longitude - half_lon,
            max_lon: locked.longitude + half_lon,
        }
    }

    /// Checks whether a point lies inside the box, edges included.
    pub fn contains(&self, point: Coordinates) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }
}
