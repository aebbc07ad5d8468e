use egui::Ui;
use shared::PlacementMode;

use crate::i18n::t;
use crate::state::AppState;
use crate::ui::toolbar;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let (mode, _) = toolbar::mode_label(state.session.mode());
        ui.weak(format!("{}: {mode}", t("status.mode")));
        ui.separator();

        let history = state.session.history();
        ui.weak(format!(
            "{}: {}/{}",
            t("status.objects"),
            history.visible().count(),
            history.len()
        ));
        ui.separator();
        ui.weak(format!("{}: {}", t("status.surfaces"), state.session.surfaces().len()));
        ui.separator();

        if !state.session.backend().is_running() {
            ui.colored_label(egui::Color32::from_rgb(255, 200, 100), t("status.paused"));
        } else if state.session.selected_template().is_none() {
            ui.colored_label(egui::Color32::YELLOW, t("status.no_template"));
        } else {
            let hint = match state.session.mode() {
                PlacementMode::Freeform => t("hint.freeform"),
                PlacementMode::SurfaceConstrained => t("hint.surface"),
                PlacementMode::ImageAnchored => t("hint.image"),
            };
            ui.label(hint);
        }
        ui.separator();
        ui.weak(t("hint.camera"));

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("ARDraw v0.1");
        });
    });
}
