//! Viewport panel: the simulated camera view of the AR scene.
//!
//! Everything is painted with the egui painter by projecting world points
//! through the device camera of the simulated feed.

mod overlays;

pub use ardraw_lib::viewport::camera;

use egui::Ui;
use glam::Vec2;

use crate::state::AppState;
use camera::DeviceCamera;

/// Viewport panel: turns pointer input into touches and camera motion
pub struct ViewportPanel {
    /// A primary-button gesture started inside the viewport and is still down
    touching: bool,
    last_touch: Option<Vec2>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            touching: false,
            last_touch: None,
        }
    }

    /// Put the device camera back at its starting pose
    pub fn reset_camera(&mut self, state: &mut AppState) {
        let fov = state.settings.camera.fov_degrees.to_radians();
        state.session.backend_mut().camera = DeviceCamera { fov, ..DeviceCamera::new() };
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // Hit-testing works in viewport-local pixels
        state.session.backend_mut().viewport = Vec2::new(rect.width(), rect.height());

        self.handle_touch(ui, &response, rect, state);
        self.handle_look(&response, state);

        state.session.poll_feed();

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        let bg = state.settings.viewport.background_color;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(bg[0], bg[1], bg[2]));

        let camera = &state.session.backend().camera;
        if state.settings.viewport.show_grid {
            overlays::draw_grid(&painter, rect, camera, &state.settings.viewport);
        }
        overlays::draw_world(&painter, rect, camera, state.session.backend());
        overlays::draw_surfaces(&painter, rect, camera, state);
        overlays::draw_instances(&painter, rect, camera, state);
        overlays::draw_crosshair(&painter, rect);

        // The simulated camera never stops "moving"
        ui.ctx().request_repaint();
    }

    fn handle_touch(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        let (pressed, down, released, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let local = pos.map(|p| Vec2::new(p.x - rect.min.x, p.y - rect.min.y));

        if pressed && response.hovered() {
            if let Some(point) = local {
                self.touching = true;
                self.last_touch = Some(point);
                state.session.touch_began(point);
            }
        } else if self.touching && down {
            if let Some(point) = local.filter(|p| Some(*p) != self.last_touch) {
                self.last_touch = Some(point);
                state.session.touch_moved(point);
            }
        }

        if self.touching && (released || !down) {
            self.touching = false;
            self.last_touch = None;
            state.session.touch_ended();
        }
    }

    fn handle_look(&mut self, response: &egui::Response, state: &mut AppState) {
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta() * state.settings.camera.rotate_sensitivity;
            state.session.backend_mut().camera.rotate(delta.x, delta.y);
        }
    }
}
