use bevy_egui::egui;
use crate::app::AppState;

/// Renders the title row with the current status and the settings button
pub fn render_status_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Camera Control");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Settings").clicked() {
                state.open_settings();
            }
        });
    });

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Status:");
        ui.strong(state.status.current());
    });

    if let Some(port) = &state.mirror().snapshot().port {
        ui.label(format!("Port: {port}"));
    }
}
