use egui::{Align2, Color32, FontId, Response, Stroke, Vec2};
use walkers::{Plugin, Projector};

use crate::{projection::to_position, types::Marker};

const BUS_COLOR: Color32 = Color32::from_rgb(253, 191, 87);

pub struct Bus<'a> {
    marker: &'a Marker,
}

impl<'a> Bus<'a> {
    pub fn new(marker: &'a Marker) -> Self {
        Self { marker }
    }
}

impl Plugin for Bus<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        let screen_position = projector.project(to_position(self.marker.position)).to_pos2();
        let painter = ui.painter();

        painter.circle(
            screen_position,
            12.,
            BUS_COLOR,
            Stroke::new(2., Color32::from_rgb(122, 0, 60)),
        );
        painter.text(
            screen_position,
            Align2::CENTER_CENTER,
            "B",
            FontId::proportional(14.),
            Color32::from_rgb(122, 0, 60),
        );
        painter.text(
            screen_position + Vec2::new(0., 16.),
            Align2::CENTER_TOP,
            &self.marker.title,
            FontId::proportional(12.),
            Color32::BLACK,
        );
    }
}
