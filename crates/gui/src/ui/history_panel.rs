//! History panel: placed instances in insertion order, hidden ones greyed out

use egui::Ui;
use shared::InstanceParent;

use crate::i18n::{t, template_name};
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    let history = state.session.history();

    ui.horizontal(|ui| {
        ui.heading(t("hist.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("({})", history.len()));
        });
    });
    ui.separator();

    if history.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("hist.empty"));
        });
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("history_scroll")
        .show(ui, |ui| {
            for instance in history.entries() {
                let p = instance.position();
                let mut text = format!(
                    "#{} {}  ({:.2}, {:.2}, {:.2})",
                    instance.index,
                    template_name(&instance.template),
                    p.x,
                    p.y,
                    p.z
                );
                if let InstanceParent::Anchor { anchor_id } = &instance.parent {
                    text.push_str(&format!("  {} {anchor_id}", t("hist.on_anchor")));
                }

                if instance.visible {
                    ui.label(text);
                } else {
                    ui.weak(format!("{text}  [{}]", t("hist.hidden")));
                }
            }
        });

    if history.has_redoable() {
        ui.separator();
        ui.weak(format!("{}: {}", t("hist.redo_depth"), history.redo_depth()));
    }
}
