//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::AppState;
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Show the scene menu
pub fn scene_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.scene"), |ui| {
        if ui.button(t("menu.reset_scene")).clicked() {
            toolbar::action_reset_scene(state);
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        let signals = state.session.affordances();
        if ui
            .add_enabled(signals.can_undo, egui::Button::new(t("menu.undo")))
            .clicked()
        {
            toolbar::action_undo(state);
            ui.close_menu();
        }
        if ui
            .add_enabled(signals.can_redo, egui::Button::new(t("menu.redo")))
            .clicked()
        {
            toolbar::action_redo(state);
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        let mut overlay = state.session.overlay_visible();
        if ui.checkbox(&mut overlay, t("menu.overlay")).changed() {
            state.session.set_overlay(overlay);
        }
        ui.checkbox(&mut state.panels.history, t("menu.history"));
        ui.checkbox(&mut state.panels.status_bar, t("menu.status_bar"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera(state);
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.selectable_label(lang() == Lang::Ru, "Русский").clicked() {
                set_lang(Lang::Ru);
                ui.close_menu();
            }
            if ui.selectable_label(lang() == Lang::En, "English").clicked() {
                set_lang(Lang::En);
                ui.close_menu();
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(400.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_placement_settings(ui, state);
                show_overlay_settings(ui, state);
                show_camera_settings(ui, state);
                show_viewport_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn drag_row(ui: &mut egui::Ui, label: &str, value: &mut f32, speed: f64, range: std::ops::RangeInclusive<f32>, suffix: &str) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(
            egui::DragValue::new(value)
                .speed(speed)
                .range(range)
                .suffix(suffix),
        );
    });
}

fn show_placement_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.placement"));
    let placement = &mut state.settings.placement;
    drag_row(ui, t("settings.forward_offset"), &mut placement.forward_offset, 0.01, 0.05..=2.0, " m");
    drag_row(ui, t("settings.distance_threshold"), &mut placement.distance_threshold, 0.005, 0.0..=1.0, " m");
    drag_row(ui, t("settings.surface_epsilon"), &mut placement.surface_epsilon, 0.001, 0.0..=0.1, " m");
    drag_row(ui, t("settings.unit_scale"), &mut placement.unit_scale, 0.05, 0.01..=10.0, "×");
    ui.add_space(10.0);
}

fn show_overlay_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.overlay"));
    ui.horizontal(|ui| {
        ui.label(t("settings.overlay_color"));
        let [r, g, b] = state.settings.overlay.color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            state.settings.overlay.color = [color.r(), color.g(), color.b()];
        }
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.overlay_opacity"));
        ui.add(egui::Slider::new(&mut state.settings.overlay.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn show_camera_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.camera"));
    let camera = &mut state.settings.camera;
    drag_row(ui, t("settings.fov"), &mut camera.fov_degrees, 0.5, 20.0..=120.0, "°");
    drag_row(ui, t("settings.walk_speed"), &mut camera.walk_speed, 0.05, 0.1..=5.0, " m/s");
    drag_row(ui, t("settings.rotate_sensitivity"), &mut camera.rotate_sensitivity, 0.01, 0.05..=2.0, "");
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.viewport"));
    ui.horizontal(|ui| {
        ui.label(t("settings.bg_color"));
        let [r, g, b] = state.settings.viewport.background_color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            state.settings.viewport.background_color = [color.r(), color.g(), color.b()];
        }
    });
    ui.checkbox(&mut state.settings.viewport.show_grid, t("settings.grid_visible"));
    drag_row(ui, t("settings.grid_size"), &mut state.settings.viewport.grid_size, 0.01, 0.05..=2.0, " m");
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        ui.add(
            egui::DragValue::new(&mut state.settings.viewport.grid_range)
                .speed(1)
                .range(1..=50),
        );
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    drag_row(ui, t("settings.font_size"), &mut state.settings.ui.font_size, 0.5, 8.0..=24.0, " pt");
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.apply_settings();
            state.settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = crate::state::settings::AppSettings::default();
            state.apply_settings();
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
