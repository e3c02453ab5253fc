//! Keeps a map viewport inside a fixed geographic box.
//!
//! [`clamp`] is the whole algorithm; [`ViewportController`] is the small piece
//! of state a map view keeps around it.

mod clamp;
mod controller;
mod region;

pub use clamp::clamp;
pub use controller::ViewportController;
pub use region::{
    Coordinates, GeoRegion, LockedBounds, ASPECT_RATIO, LOCKED_REGION, MAX_LATITUDE_DELTA,
    MIN_LATITUDE_DELTA,
};
