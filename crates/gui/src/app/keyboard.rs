//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::ui::toolbar;

/// Handle keyboard shortcuts and camera walking
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let walk_speed = state.settings.camera.walk_speed;
    ctx.input(|i| {
        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            toolbar::action_undo(state);
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            toolbar::action_redo(state);
        }
        // Escape: close the options popup
        if i.key_pressed(egui::Key::Escape) {
            state.show_options = false;
        }
        if i.modifiers.command {
            return;
        }

        // WASD walk, Q/E down/up
        let axis = |pos: egui::Key, neg: egui::Key| {
            (i.key_down(pos) as i32 - i.key_down(neg) as i32) as f32
        };
        let forward = axis(egui::Key::W, egui::Key::S);
        let right = axis(egui::Key::D, egui::Key::A);
        let up = axis(egui::Key::E, egui::Key::Q);
        if forward != 0.0 || right != 0.0 || up != 0.0 {
            let step = walk_speed * i.stable_dt;
            state
                .session
                .backend_mut()
                .camera
                .walk(forward * step, right * step, up * step);
        }
    });
}
