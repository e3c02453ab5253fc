use crate::{
    clamp::clamp,
    region::{Coordinates, GeoRegion, LOCKED_REGION},
};

/// Owns the region the map is displaying.
///
/// The controller has a single state, "displaying region R". Every finished
/// gesture replaces R with the clamped proposal, and the caller is expected to
/// push the returned region back into the map widget.
#[derive(Debug, Clone)]
pub struct ViewportController {
    region: GeoRegion,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    /// Starts out showing the whole locked box.
    pub fn new() -> Self {
        Self {
            region: LOCKED_REGION,
        }
    }

    pub fn region(&self) -> GeoRegion {
        self.region
    }

    /// Accepts the region the map widget reports after a pan or zoom and
    /// returns the region it must display instead.
    pub fn finish_gesture(&mut self, proposed: GeoRegion) -> GeoRegion {
        self.region = clamp(proposed);
        self.region
    }

    /// Zooms around the current center. Factors below one zoom in.
    pub fn zoom_by(&mut self, factor: f64) -> GeoRegion {
        let proposed = GeoRegion {
            latitude_delta: self.region.latitude_delta * factor,
            ..self.region
        };
        self.finish_gesture(proposed)
    }

    /// Moves the center, keeping the current span.
    pub fn pan_to(&mut self, center: Coordinates) -> GeoRegion {
        self.finish_gesture(self.region.with_center(center))
    }

    /// Back to the full locked box.
    pub fn reset(&mut self) -> GeoRegion {
        self.region = LOCKED_REGION;
        self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{LockedBounds, MAX_LATITUDE_DELTA, MIN_LATITUDE_DELTA};

    #[test]
    fn test_starts_on_locked_region() {
        let controller = ViewportController::new();

        assert_eq!(controller.region(), LOCKED_REGION);
    }

    #[test]
    fn test_finish_gesture_stores_clamped_region() {
        let mut controller = ViewportController::new();

        let shown = controller.finish_gesture(GeoRegion::new(90.0, 0.0, 5.0, 5.0));

        assert_eq!(controller.region(), shown);
        assert_eq!(shown.latitude_delta, MAX_LATITUDE_DELTA);
        assert!(LockedBounds::of(&LOCKED_REGION).contains(shown.center()));
    }

    #[test]
    fn test_zoom_by_stops_at_bounds() {
        let mut controller = ViewportController::new();

        for _ in 0..20 {
            controller.zoom_by(0.5);
        }
        assert_eq!(controller.region().latitude_delta, MIN_LATITUDE_DELTA);

        for _ in 0..20 {
            controller.zoom_by(2.0);
        }
        assert_eq!(controller.region().latitude_delta, MAX_LATITUDE_DELTA);
    }

    #[test]
    fn test_pan_to_outside_box_is_clamped() {
        let mut controller = ViewportController::new();
        let bounds = LockedBounds::of(&LOCKED_REGION);

        let shown = controller.pan_to(Coordinates::new(0.0, -180.0));

        assert_eq!(shown.latitude, bounds.min_lat);
        assert_eq!(shown.longitude, bounds.min_lon);
    }

    #[test]
    fn test_reset_returns_to_locked_region() {
        let mut controller = ViewportController::new();
        controller.zoom_by(0.1);

        assert_eq!(controller.reset(), LOCKED_REGION);
    }
}
