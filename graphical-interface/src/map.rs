use std::{cell::RefCell, rc::Rc};

use egui::{Context, Vec2};
use logger::{Color, Logger};
use shuttle_feed::{FeedConfig, Subscription};
use viewport::GeoRegion;
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Tiles};

use crate::{
    map_sync::{Interaction, MapSync, Placement},
    plugins,
    projection::to_position,
    state::{SelectionState, ViewState},
    types::{campus_stops, MarkerKind},
    widgets::{self, ControlAction},
};

/// The shuttle map.
///
/// `ShuttleApp` owns the clamped viewport, the latest feed snapshot and the
/// feed subscription. The subscription lives exactly as long as the app:
/// dropping the app closes the channel.
pub struct ShuttleApp {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    map_sync: MapSync,
    selection_state: Rc<RefCell<SelectionState>>,
    view_state: ViewState,
    subscription: Option<Subscription>,
    logger: Logger,
}

impl ShuttleApp {
    /// Creates the app and subscribes to the feed described by `config`.
    pub fn new(egui_ctx: Context, config: FeedConfig, logger: Logger) -> Self {
        let repaint_ctx = egui_ctx.clone();
        let subscription = match Subscription::open(config, logger.clone(), move || {
            repaint_ctx.request_repaint()
        }) {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                let _ = logger.error(&format!("Feed unavailable: {}", e), true);
                None
            }
        };

        let map_memory = MapMemory::default();
        let map_sync = MapSync::new(&map_memory);

        Self {
            tiles: Box::new(HttpTiles::with_options(
                walkers::sources::OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            )),
            map_memory,
            map_sync,
            selection_state: Rc::new(RefCell::new(SelectionState::new())),
            view_state: ViewState::new(campus_stops()),
            subscription,
            logger,
        }
    }

    fn poll_feed(&mut self) {
        if let Some(state) = self.subscription.as_ref().and_then(Subscription::try_latest) {
            self.view_state.apply_update(state);
        }
    }

    fn handle_control(&mut self, action: ControlAction, map_size: Vec2) {
        let region = match (action, action.zoom_factor()) {
            (_, Some(factor)) => self.view_state.viewport.zoom_by(factor),
            (ControlAction::FollowBus, None) => self.view_state.follow_bus(),
            (_, None) => self.view_state.viewport.reset(),
        };
        self.show_region(region, map_size);
    }

    fn show_region(&mut self, region: GeoRegion, map_size: Vec2) {
        let placement = self.map_sync.show(&mut self.map_memory, &region, map_size);
        self.log_placement(placement);
    }

    fn log_placement(&self, placement: Placement) {
        if let Placement::ZoomRejected(zoom) = placement {
            let _ = self
                .logger
                .warn(&format!("Map rejected zoom level {:.2}", zoom), false);
        }
    }
}

impl eframe::App for ShuttleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_feed();

        widgets::header(ctx);
        widgets::footer(ctx);

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let markers = self.view_state.markers();
                let (stops, bus): (Vec<_>, Vec<_>) = markers
                    .into_iter()
                    .partition(|marker| marker.kind == MarkerKind::Stop);

                let my_position = to_position(self.view_state.viewport.region().center());
                let tiles = self.tiles.as_mut();

                let mut map = Map::new(Some(tiles), &mut self.map_memory, my_position)
                    .with_plugin(plugins::Stops::new(&stops, self.selection_state.clone()));
                if let Some(bus) = bus.first() {
                    map = map.with_plugin(plugins::Bus::new(bus));
                }

                let response = ui.add(map);
                let map_size = response.rect.size();

                let interaction = Interaction {
                    dragging: response.dragged(),
                    drag_stopped: response.drag_stopped(),
                };
                if let Some(placement) = self.map_sync.after_frame(
                    &mut self.map_memory,
                    &mut self.view_state,
                    map_size,
                    interaction,
                ) {
                    self.log_placement(placement);
                }

                if let Some(action) = widgets::controls(ctx) {
                    self.handle_control(action, map_size);
                }
            });
    }
}

impl Drop for ShuttleApp {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.close();
            let _ = self.logger.info("Shuttle map closed", Color::Cyan, false);
        }
    }
}
