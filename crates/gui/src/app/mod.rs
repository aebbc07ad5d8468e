//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;
use shared::PlacementMode;

use crate::anchor::SimulatedFeed;
use crate::state::{AppSettings, AppState};
use crate::ui::{history_panel, options_panel, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct ArDrawApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Last logged session version
    last_version: u64,
}

impl ArDrawApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_mode: Option<PlacementMode>) -> Self {
        let mut state = AppState::new(SimulatedFeed::demo(), AppSettings::load());
        if let Some(mode) = initial_mode {
            state.session.set_mode(mode);
        }

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let last_font_size = state.settings.ui.font_size;
        let last_version = state.session.version();

        Self {
            state,
            viewport: ViewportPanel::new(),
            last_font_size,
            last_version,
        }
    }
}

impl eframe::App for ArDrawApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        let current_version = self.state.session.version();
        if current_version != self.last_version {
            let signals = self.state.session.affordances();
            tracing::trace!(
                version = current_version,
                can_undo = signals.can_undo,
                can_redo = signals.can_redo,
                "Session changed"
            );
            self.last_version = current_version;
        }

        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::scene_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Options popup ────────────────────────────────────
        options_panel::show(ctx, &mut self.state);

        // ── Status bar ───────────────────────────────────────
        if self.state.panels.status_bar {
            egui::TopBottomPanel::bottom("status_bar")
                .exact_height(22.0)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
                )
                .show(ctx, |ui| {
                    status_bar::show(ui, &self.state);
                });
        }

        // ── Left panel: placement history ────────────────────
        if self.state.panels.history {
            egui::SidePanel::left("history")
                .default_width(240.0)
                .width_range(160.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    history_panel::show(ui, &self.state);
                });
        }

        // ── Central panel: camera view ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.session.pause();
        self.state.settings.save();
    }
}
