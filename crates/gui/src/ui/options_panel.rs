//! Options popup: template selection, surface overlay and scene reset

use eframe::egui;

use crate::i18n::{t, template_name};
use crate::state::AppState;
use crate::ui::toolbar;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_options;
    egui::Window::new(t("opt.title"))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 72.0))
        .show(ctx, |ui| {
            ui.label(t("opt.template"));
            let selected = state.session.selected_template().map(|s| s.id.clone());
            let mut choice = None;
            for template in &state.templates {
                let is_selected = selected.as_deref() == Some(template.id.as_str());
                if ui
                    .selectable_label(is_selected, template_name(template))
                    .clicked()
                    && !is_selected
                {
                    choice = Some(template.clone());
                }
            }
            if let Some(template) = choice {
                state.session.select_template(template);
            }
            if selected.is_none() {
                ui.weak(t("opt.none"));
            }

            ui.separator();

            let mut overlay = state.session.overlay_visible();
            if ui.checkbox(&mut overlay, t("opt.overlay")).changed() {
                state.session.set_overlay(overlay);
            }

            ui.separator();

            if ui.button(t("opt.reset")).clicked() {
                toolbar::action_reset_scene(state);
            }
        });
    state.show_options = open;
}
