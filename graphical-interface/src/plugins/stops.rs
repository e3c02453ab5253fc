use std::{cell::RefCell, rc::Rc};

use egui::{Align2, Color32, FontId, Rect, Response, Stroke, Vec2};
use walkers::{Plugin, Projector};

use crate::{projection::to_position, state::SelectionState, types::Marker};

const PIN_RADIUS: f32 = 9.;
const PIN_COLOR: Color32 = Color32::from_rgb(122, 0, 60);

pub struct Stops<'a> {
    markers: &'a [Marker],
    selection_state: Rc<RefCell<SelectionState>>,
}

impl<'a> Stops<'a> {
    pub fn new(markers: &'a [Marker], selection_state: Rc<RefCell<SelectionState>>) -> Self {
        Self {
            markers,
            selection_state,
        }
    }
}

impl Plugin for Stops<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for marker in self.markers {
            draw_stop(ui, projector, marker, &mut self.selection_state.borrow_mut());
        }
    }
}

fn draw_stop(
    ui: &mut egui::Ui,
    projector: &Projector,
    marker: &Marker,
    selection_state: &mut SelectionState,
) {
    let screen_position = projector.project(to_position(marker.position)).to_pos2();

    let clickable_area = Rect::from_center_size(screen_position, Vec2::splat(PIN_RADIUS * 3.));
    let response = ui.allocate_rect(clickable_area, egui::Sense::click());

    let painter = ui.painter();
    let fill = if response.hovered() {
        PIN_COLOR.gamma_multiply(0.7)
    } else {
        PIN_COLOR
    };
    painter.circle(screen_position, PIN_RADIUS, fill, Stroke::new(2., Color32::WHITE));

    painter.text(
        screen_position + Vec2::new(PIN_RADIUS + 4., 0.),
        Align2::LEFT_CENTER,
        &marker.title,
        FontId::proportional(14.),
        Color32::BLACK,
    );

    if selection_state.is_selected(&marker.id) {
        draw_callout(ui, screen_position, &marker.label);
    }

    if response.clicked() {
        selection_state.toggle_stop_selection(&marker.id);
    }
}

// Bubble above the pin holding the ETA.
fn draw_callout(ui: &egui::Ui, anchor: egui::Pos2, text: &str) {
    let painter = ui.painter();
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(16.), Color32::BLACK);

    let offset = Vec2::new(-galley.size().x / 2., -(PIN_RADIUS + 12. + galley.size().y));
    let text_pos = anchor + offset;
    let bubble = Rect::from_min_size(text_pos, galley.size()).expand(6.);

    painter.rect(bubble, 6., Color32::WHITE, Stroke::new(1., Color32::GRAY));
    painter.galley(text_pos, galley, Color32::BLACK);
}
