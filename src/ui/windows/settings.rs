use bevy_egui::egui;
use crate::app::AppState;
use crate::pointer::{ButtonId, MOUSE};

const HOLD_BUTTON_SIZE: [f32; 2] = [100.0, 40.0];

/// Renders the settings window. Returns the hold button under the pointer, if any.
pub fn render_settings_window(ctx: &egui::Context, state: &mut AppState) -> Option<ButtonId> {
    let mut show_settings = state.show_settings;
    let mut hovered = None;

    if show_settings {
        egui::Window::new("Settings")
            .open(&mut show_settings)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                render_port_selection(ui, state);
                ui.separator();

                let enabled = state.mirror().controls().enabled;
                ui.add_enabled_ui(enabled, |ui| {
                    render_camera_toggles(ui, state);
                    ui.separator();

                    hovered = render_hold_buttons(ui, state, enabled);
                    ui.separator();

                    render_set_presets(ui, state);
                });
            });

        state.show_settings = show_settings;
    }

    hovered
}

/// Renders the port dropdown
fn render_port_selection(ui: &mut egui::Ui, state: &mut AppState) {
    let options = state.port_select.options().to_vec();
    let mut selected = state.port_select.selected();

    ui.horizontal(|ui| {
        ui.label("Serial Port:");
        ui.add_enabled_ui(!state.port_select.is_populating(), |ui| {
            egui::ComboBox::from_id_salt("serial_port_select")
                .selected_text(state.port_select.selected_label())
                .show_ui(ui, |ui| {
                    for (i, option) in options.iter().enumerate() {
                        ui.selectable_value(&mut selected, i, option.as_deref().unwrap_or(""));
                    }
                });
        });

        if ui.button("refresh").clicked() {
            state.list_ports();
        }
    });

    state.select_port(selected);
}

fn render_camera_toggles(ui: &mut egui::Ui, state: &mut AppState) {
    let controls = state.mirror().controls();

    ui.horizontal(|ui| {
        let mut power = controls.power;
        if ui.checkbox(&mut power, "Power").changed() {
            state.set_power(power);
        }

        let mut autofocus = controls.autofocus;
        if ui.checkbox(&mut autofocus, "Autofocus").changed() {
            state.set_autofocus(autofocus);
        }
    });
}

/// Renders the pan/tilt and zoom buttons. Movement lasts while the button is held.
fn render_hold_buttons(ui: &mut egui::Ui, state: &mut AppState, enabled: bool) -> Option<ButtonId> {
    let buttons: Vec<(ButtonId, String)> = state
        .hold_buttons
        .iter()
        .map(|hold| (hold.id(), hold.label().to_string()))
        .collect();
    let mut hovered = None;

    ui.label("Hold to move");
    egui::Grid::new("hold_buttons")
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for (i, (id, label)) in buttons.iter().enumerate() {
                let response = ui.add_sized(HOLD_BUTTON_SIZE, egui::Button::new(label));

                if response.hovered() {
                    hovered = Some(*id);
                    if enabled && ui.input(|input| input.pointer.primary_pressed()) {
                        state.press(*id, MOUSE);
                    }
                }

                if i % 2 == 1 {
                    ui.end_row();
                }
            }
        });

    hovered
}

/// Renders the buttons that store the current position into a preset
fn render_set_presets(ui: &mut egui::Ui, state: &mut AppState) {
    let presets = state.presets.clone();

    ui.label("Save position to preset");
    ui.horizontal_wrapped(|ui| {
        for preset in &presets {
            if ui.button(format!("Set {}", preset.name)).clicked() {
                state.ask_set_preset(preset);
            }
        }
    });
}
