use crate::region::{
    GeoRegion, LockedBounds, ASPECT_RATIO, LOCKED_REGION, MAX_LATITUDE_DELTA, MIN_LATITUDE_DELTA,
};

/// Corrects an arbitrary region proposal so it respects the zoom bounds and
/// stays inside the locked box.
///
/// The proposed longitude span is never trusted: it is rebuilt from the
/// clamped latitude span so the aspect ratio of the locked box is kept at
/// every zoom level. The center is clamped per axis, without any geodesic
/// correction.
pub fn clamp(proposed: GeoRegion) -> GeoRegion {
    let latitude_delta = clamp_or(
        proposed.latitude_delta,
        MIN_LATITUDE_DELTA,
        MAX_LATITUDE_DELTA,
        MIN_LATITUDE_DELTA,
    );
    let longitude_delta = latitude_delta * ASPECT_RATIO;

    let bounds = LockedBounds::of(&LOCKED_REGION);
    let latitude = clamp_or(
        proposed.latitude,
        bounds.min_lat,
        bounds.max_lat,
        LOCKED_REGION.latitude,
    );
    let longitude = clamp_or(
        proposed.longitude,
        bounds.min_lon,
        bounds.max_lon,
        LOCKED_REGION.longitude,
    );

    GeoRegion::new(latitude, longitude, latitude_delta, longitude_delta)
}

// `f64::clamp` lets NaN through.
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn region_strategy() -> impl Strategy<Value = GeoRegion> {
        (
            -90.0..90.0f64,
            -180.0..180.0f64,
            -1.0..2.0f64,
            -1.0..2.0f64,
        )
            .prop_map(|(lat, lon, lat_delta, lon_delta)| {
                GeoRegion::new(lat, lon, lat_delta, lon_delta)
            })
    }

    fn valid_region_strategy() -> impl Strategy<Value = GeoRegion> {
        let bounds = LockedBounds::of(&LOCKED_REGION);
        (
            bounds.min_lat..=bounds.max_lat,
            bounds.min_lon..=bounds.max_lon,
            MIN_LATITUDE_DELTA..=MAX_LATITUDE_DELTA,
        )
            .prop_map(|(lat, lon, lat_delta)| {
                GeoRegion::new(lat, lon, lat_delta, lat_delta * ASPECT_RATIO)
            })
    }

    proptest! {
        #[test]
        fn clamp_is_idempotent(region in region_strategy()) {
            let once = clamp(region);
            prop_assert_eq!(clamp(once), once);
        }

        #[test]
        fn clamp_respects_zoom_bounds(region in region_strategy()) {
            let clamped = clamp(region);
            prop_assert!(clamped.latitude_delta >= MIN_LATITUDE_DELTA);
            prop_assert!(clamped.latitude_delta <= MAX_LATITUDE_DELTA);
        }

        #[test]
        fn clamp_keeps_aspect_ratio(region in region_strategy()) {
            let clamped = clamp(region);
            let expected = clamped.latitude_delta * ASPECT_RATIO;
            prop_assert!((clamped.longitude_delta - expected).abs() < TOLERANCE);
        }

        #[test]
        fn clamp_keeps_center_inside_locked_box(region in region_strategy()) {
            let bounds = LockedBounds::of(&LOCKED_REGION);
            prop_assert!(bounds.contains(clamp(region).center()));
        }

        #[test]
        fn clamp_leaves_valid_regions_alone(region in valid_region_strategy()) {
            prop_assert_eq!(clamp(region), region);
        }
    }

    #[test]
    fn test_zoom_in_past_minimum() {
        let proposed = GeoRegion {
            latitude_delta: 0.00001,
            ..LOCKED_REGION
        };

        let clamped = clamp(proposed);

        assert_eq!(clamped.latitude_delta, 0.0005);
        assert!((clamped.longitude_delta - 0.0005 * 0.8233).abs() < 1e-7);
        assert!((clamped.longitude_delta - 0.0005 * ASPECT_RATIO).abs() < TOLERANCE);
    }

    #[test]
    fn test_zoom_out_past_maximum() {
        let proposed = GeoRegion {
            latitude_delta: 1.0,
            longitude_delta: 3.0,
            ..LOCKED_REGION
        };

        let clamped = clamp(proposed);

        assert_eq!(clamped.latitude_delta, 0.021165080277782522);
        assert!((clamped.longitude_delta - 0.01742396503686905).abs() < TOLERANCE);
    }

    #[test]
    fn test_far_away_center_snaps_to_box_edge() {
        let proposed = GeoRegion::new(90.0, 0.0, 0.01, 0.01);
        let bounds = LockedBounds::of(&LOCKED_REGION);

        let clamped = clamp(proposed);

        assert_eq!(clamped.latitude, bounds.max_lat);
        assert_eq!(clamped.longitude, bounds.max_lon);
        assert!((clamped.latitude - (43.26252182610375 + 0.021165080277782522 / 2.0)).abs() < 1e-12);
        assert!((clamped.longitude - (-79.92393298074603 + 0.01742396503686905 / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_deltas_clamp_to_minimum() {
        for delta in [0.0, -5.0, f64::NAN, f64::NEG_INFINITY] {
            let clamped = clamp(GeoRegion {
                latitude_delta: delta,
                ..LOCKED_REGION
            });
            assert_eq!(clamped.latitude_delta, MIN_LATITUDE_DELTA);
        }
    }

    #[test]
    fn test_infinite_delta_clamps_to_maximum() {
        let clamped = clamp(GeoRegion {
            latitude_delta: f64::INFINITY,
            ..LOCKED_REGION
        });

        assert_eq!(clamped.latitude_delta, MAX_LATITUDE_DELTA);
        assert!((clamped.longitude_delta - LOCKED_REGION.longitude_delta).abs() < TOLERANCE);
    }

    #[test]
    fn test_nan_center_falls_back_to_locked_center() {
        let clamped = clamp(GeoRegion::new(f64::NAN, f64::NAN, 0.01, 0.01));

        assert_eq!(clamped.center(), LOCKED_REGION.center());
    }

    #[test]
    fn test_locked_region_is_already_valid() {
        let clamped = clamp(LOCKED_REGION);

        assert_eq!(clamped.center(), LOCKED_REGION.center());
        assert_eq!(clamped.latitude_delta, LOCKED_REGION.latitude_delta);
        assert!((clamped.longitude_delta - LOCKED_REGION.longitude_delta).abs() < TOLERANCE);
    }
}
