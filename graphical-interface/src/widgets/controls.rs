/// What the user asked for with the map buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ZoomIn,
    ZoomOut,
    Recenter,
    FollowBus,
}

impl ControlAction {
    /// Latitude span multiplier for zoom actions.
    pub fn zoom_factor(self) -> Option<f64> {
        match self {
            ControlAction::ZoomIn => Some(0.5),
            ControlAction::ZoomOut => Some(2.0),
            ControlAction::Recenter | ControlAction::FollowBus => None,
        }
    }
}

/// Zoom, recenter and follow-bus buttons pinned to the bottom right corner of the map.
pub fn controls(ctx: &egui::Context) -> Option<ControlAction> {
    let mut action = None;
    let button_size = [44.0, 44.0];

    egui::Area::new("map_controls".into())
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -60.0])
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                for (text, candidate) in [
                    ("+", ControlAction::ZoomIn),
                    ("-", ControlAction::ZoomOut),
                    ("Fit", ControlAction::Recenter),
                    ("Bus", ControlAction::FollowBus),
                ] {
                    if ui
                        .add_sized(button_size, egui::Button::new(text).rounding(10.0))
                        .clicked()
                    {
                        action = Some(candidate);
                    }
                }
            });
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_factors() {
        assert_eq!(ControlAction::ZoomIn.zoom_factor(), Some(0.5));
        assert_eq!(ControlAction::ZoomOut.zoom_factor(), Some(2.0));
        assert_eq!(ControlAction::Recenter.zoom_factor(), None);
        assert_eq!(ControlAction::FollowBus.zoom_factor(), None);
    }
}
