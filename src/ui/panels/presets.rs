use bevy_egui::egui;
use crate::app::AppState;

const PRESET_BUTTON_SIZE: [f32; 2] = [120.0, 40.0];
const PRESETS_PER_ROW: usize = 3;

/// Renders the preset recall buttons. Disabled while no port is open.
pub fn render_presets_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label("Presets");

    let enabled = state.mirror().controls_enabled();
    let presets = state.presets.clone();

    ui.add_enabled_ui(enabled, |ui| {
        egui::Grid::new("preset_recall")
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (i, preset) in presets.iter().enumerate() {
                    if ui
                        .add_sized(PRESET_BUTTON_SIZE, egui::Button::new(&preset.name))
                        .clicked()
                    {
                        state.go_to_preset(preset);
                    }
                    if (i + 1) % PRESETS_PER_ROW == 0 {
                        ui.end_row();
                    }
                }
            });
    });
}
