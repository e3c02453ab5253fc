//! Keeps the walkers [`MapMemory`] on the region the viewport controller
//! owns.
//!
//! The map widget is free to pan and zoom while a gesture is in progress.
//! Once it settles, what it shows becomes a proposal, the controller clamps
//! it, and the corrected region is forced back into the map memory. A resize
//! re-applies the current region, since the same zoom shows a different span
//! on a differently sized map.

use egui::Vec2;
use viewport::{Coordinates, GeoRegion};
use walkers::MapMemory;

use crate::{
    projection::{region_from_view, to_coordinates, to_position, zoom_for_region},
    state::ViewState,
};

const ZOOM_EPSILON: f64 = 1e-6;

/// Outcome of pushing a region into the map memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The map now shows the region at this zoom level.
    Shown(f64),
    /// The map has no size yet. The region is applied on a later frame.
    Unsized,
    /// walkers refused the zoom level.
    ZoomRejected(f64),
}

/// What the user did to the map during the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interaction {
    pub dragging: bool,
    pub drag_stopped: bool,
}

pub struct MapSync {
    last_zoom: f64,
    last_size: Vec2,
    pending: bool,
}

impl MapSync {
    pub fn new(map_memory: &MapMemory) -> Self {
        Self {
            last_zoom: map_memory.zoom(),
            last_size: Vec2::ZERO,
            pending: true,
        }
    }

    /// Runs once per frame, after the map is drawn at `size`.
    ///
    /// Returns `None` when the map memory was left alone.
    pub fn after_frame(
        &mut self,
        map_memory: &mut MapMemory,
        view_state: &mut ViewState,
        size: Vec2,
        interaction: Interaction,
    ) -> Option<Placement> {
        let zoom_changed = (map_memory.zoom() - self.last_zoom).abs() > ZOOM_EPSILON;
        let resized = size != self.last_size && !interaction.dragging;

        if self.pending || resized {
            let region = view_state.viewport.region();
            Some(self.show(map_memory, &region, size))
        } else if interaction.drag_stopped || (zoom_changed && !interaction.dragging) {
            let proposed = proposed_region(map_memory, view_state.viewport.region().center(), size);
            let corrected = view_state.finish_gesture(proposed);
            Some(self.show(map_memory, &corrected, size))
        } else {
            None
        }
    }

    /// Centers the map on `region` and picks the zoom that shows its latitude
    /// span on a map of `size`.
    pub fn show(&mut self, map_memory: &mut MapMemory, region: &GeoRegion, size: Vec2) -> Placement {
        map_memory.center_at(to_position(region.center()));

        let placement = match zoom_for_region(region, size.y) {
            Some(zoom) => match map_memory.set_zoom(zoom) {
                Ok(()) => Placement::Shown(zoom),
                Err(_) => Placement::ZoomRejected(zoom),
            },
            None => Placement::Unsized,
        };

        self.pending = placement == Placement::Unsized;
        self.last_size = size;
        self.last_zoom = map_memory.zoom();
        placement
    }
}

/// Region the map memory currently shows on a map of `size`. A map that was
/// never moved reports no center, so `fallback` stands in.
pub fn proposed_region(map_memory: &MapMemory, fallback: Coordinates, size: Vec2) -> GeoRegion {
    let center = map_memory.detached().map(to_coordinates).unwrap_or(fallback);
    region_from_view(center, map_memory.zoom(), size.x, size.y)
}
