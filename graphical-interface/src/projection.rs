//! Conversions between the map widget's view (center, zoom level, size in
//! points) and a [`GeoRegion`].
//!
//! The widget uses Web Mercator tiles of 256 points. The latitude span is
//! scaled by `cos(latitude)` at the center, which is accurate enough across a
//! single campus.

use viewport::{Coordinates, GeoRegion};
use walkers::Position;

const TILE_SIZE: f64 = 256.0;

/// Degrees of longitude covered by one point at `zoom`.
pub fn degrees_per_point(zoom: f64) -> f64 {
    360.0 / (TILE_SIZE * 2f64.powf(zoom))
}

/// Region shown by a map of `width` x `height` points centered on `center`.
pub fn region_from_view(center: Coordinates, zoom: f64, width: f32, height: f32) -> GeoRegion {
    let per_point = degrees_per_point(zoom);

    GeoRegion::new(
        center.latitude,
        center.longitude,
        f64::from(height) * per_point * center.latitude.to_radians().cos(),
        f64::from(width) * per_point,
    )
}

/// Zoom level at which a map `height` points tall shows exactly the
/// region's latitude span. `None` while the map has no size yet.
pub fn zoom_for_region(region: &GeoRegion, height: f32) -> Option<f64> {
    if height <= 0.0 || region.latitude_delta <= 0.0 {
        return None;
    }

    let span_at_zoom_zero =
        f64::from(height) * 360.0 / TILE_SIZE * region.latitude.to_radians().cos();
    Some((span_at_zoom_zero / region.latitude_delta).log2())
}

pub fn to_position(coordinates: Coordinates) -> Position {
    Position::from_lat_lon(coordinates.latitude, coordinates.longitude)
}

pub fn to_coordinates(position: Position) -> Coordinates {
    Coordinates::new(position.lat(), position.lon())
}
