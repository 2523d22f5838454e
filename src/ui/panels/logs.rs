use bevy_egui::egui;
use crate::app::AppState;

/// Renders the status history
pub fn render_logs_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(format!("Status Log ({} messages)", state.status.entries.len()));
        ui.checkbox(&mut state.auto_scroll_logs, "auto-scroll");
        if ui.button("clear log").clicked() {
            state.status.clear();
        }
    });

    egui::ScrollArea::vertical()
        .max_height(160.0)
        .id_salt("status_log")
        .auto_shrink([false; 2])
        .stick_to_bottom(state.auto_scroll_logs)
        .show(ui, |ui| {
            for entry in state.status.entries.iter() {
                ui.horizontal(|ui| {
                    ui.label(format!("[{}]", entry.clock_time.format("%H:%M:%S%.3f")));
                    ui.label(&entry.message);
                });
            }
        });
}
