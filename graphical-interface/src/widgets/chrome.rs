use egui::{Color32, RichText};

const HEADER_FILL: Color32 = Color32::from_rgb(122, 0, 60);
const FOOTER_FILL: Color32 = Color32::from_rgb(253, 191, 87);

/// Title bar across the top of the window.
pub fn header(ctx: &egui::Context) {
    egui::TopBottomPanel::top("header")
        .frame(egui::Frame::none().fill(HEADER_FILL).inner_margin(20.))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("MAC SHUTTLE")
                        .color(Color32::WHITE)
                        .size(20.)
                        .strong(),
                );
            });
        });
}

pub fn footer(ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("footer")
        .frame(egui::Frame::none().fill(FOOTER_FILL).inner_margin(10.))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("© McMaster University 2024")
                        .color(Color32::WHITE)
                        .size(16.),
                );
            });
        });
}
