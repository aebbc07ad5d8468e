//! Toolbar: mode selector, undo/redo and the options popup toggle

use egui::Ui;
use shared::PlacementMode;

use crate::i18n::t;
use crate::state::AppState;

/// Segment label and tooltip of a placement mode
pub fn mode_label(mode: PlacementMode) -> (&'static str, &'static str) {
    match mode {
        PlacementMode::Freeform => (t("mode.freeform"), t("tip.freeform")),
        PlacementMode::SurfaceConstrained => (t("mode.surface"), t("tip.surface")),
        PlacementMode::ImageAnchored => (t("mode.image"), t("tip.image")),
    }
}

// ── Public actions (callable from menus and shortcuts too) ───

pub fn action_set_mode(state: &mut AppState, mode: PlacementMode) {
    if state.session.mode() != mode {
        state.session.set_mode(mode);
    }
}

pub fn action_undo(state: &mut AppState) {
    state.session.undo();
}

pub fn action_redo(state: &mut AppState) {
    state.session.redo();
}

pub fn action_reset_scene(state: &mut AppState) {
    state.session.reset_scene();
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // ── Mode selector (segmented) ──
        let current = state.session.mode();
        for &mode in PlacementMode::all() {
            let (label, tip) = mode_label(mode);
            if ui
                .selectable_label(current == mode, label)
                .on_hover_text(tip)
                .clicked()
            {
                action_set_mode(state, mode);
            }
        }

        ui.separator();

        // ── History buttons ──
        let signals = state.session.affordances();
        if ui
            .add_enabled(signals.can_undo, egui::Button::new(t("tb.undo")))
            .on_hover_text(t("tip.undo"))
            .clicked()
        {
            action_undo(state);
        }
        if ui
            .add_enabled(signals.can_redo, egui::Button::new(t("tb.redo")))
            .on_hover_text(t("tip.redo"))
            .clicked()
        {
            action_redo(state);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .selectable_label(state.show_options, t("tb.options"))
                .clicked()
            {
                state.show_options = !state.show_options;
            }
        });
    });
}
