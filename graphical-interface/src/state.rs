use shuttle_feed::ShuttleState;
use viewport::{GeoRegion, ViewportController};

use crate::types::{Marker, MarkerKind, Stop};

/// Label shown for a stop the latest feed message said nothing about.
pub const NO_ESTIMATE: &str = "No estimate";
const BUS_ID: &str = "bus";
const BUS_TITLE: &str = "Shuttle";
const BUS_LABEL: &str = "Current location";

/// Tracks which stop callout is open.
pub struct SelectionState {
    pub stop: Option<String>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        Self { stop: None }
    }

    /// If the provided stop is already selected, it will be deselected.
    /// Otherwise, it will be selected.
    pub fn toggle_stop_selection(&mut self, stop_id: &str) {
        if self.stop.as_deref() == Some(stop_id) {
            self.stop = None;
        } else {
            self.stop = Some(stop_id.to_string());
        }
    }

    pub fn is_selected(&self, stop_id: &str) -> bool {
        self.stop.as_deref() == Some(stop_id)
    }
}

/// Everything the map view displays: the clamped viewport and the latest
/// shuttle snapshot.
///
/// The two halves never touch each other. Feed updates leave the viewport
/// alone and gestures leave the shuttle state alone.
pub struct ViewState {
    pub viewport: ViewportController,
    pub shuttle: ShuttleState,
    pub stops: Vec<Stop>,
}

impl ViewState {
    pub fn new(stops: Vec<Stop>) -> Self {
        Self {
            viewport: ViewportController::new(),
            shuttle: ShuttleState::loading(),
            stops,
        }
    }

    /// Replaces the shuttle snapshot wholesale.
    pub fn apply_update(&mut self, state: ShuttleState) {
        self.shuttle = state;
    }

    /// Clamps the region the map reports after a gesture and returns the one
    /// it has to show.
    pub fn finish_gesture(&mut self, proposed: GeoRegion) -> GeoRegion {
        self.viewport.finish_gesture(proposed)
    }

    /// Centers the map on the last known bus position, keeping the zoom.
    pub fn follow_bus(&mut self) -> GeoRegion {
        self.viewport.pan_to(self.shuttle.bus_position)
    }

    /// Stop markers in stop order, then the bus.
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = self
            .stops
            .iter()
            .map(|stop| Marker {
                id: stop.id.clone(),
                kind: MarkerKind::Stop,
                position: stop.position,
                title: stop.name.clone(),
                label: self
                    .shuttle
                    .eta(&stop.id)
                    .unwrap_or(NO_ESTIMATE)
                    .to_string(),
            })
            .collect();

        markers.push(Marker {
            id: BUS_ID.to_string(),
            kind: MarkerKind::Bus,
            position: self.shuttle.bus_position,
            title: BUS_TITLE.to_string(),
            label: BUS_LABEL.to_string(),
        });

        markers
    }
}
