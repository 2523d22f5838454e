use bevy_egui::egui;
use crate::app::AppState;

/// Renders the yes/no dialog guarding preset overwrites
pub fn render_confirm_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(question) = state.confirm.question() else {
        return;
    };
    let mut answer = None;

    egui::Window::new("Confirm")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(question);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });

    if let Some(accepted) = answer {
        state.answer_set_preset(accepted);
    }
}

/// Renders failures from the settings window
pub fn render_error_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.error_dialog.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                state.error_dialog = None;
            }
        });
}
