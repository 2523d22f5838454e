pub mod panels;
pub mod windows;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use crate::app::AppState;
use crate::pointer::MOUSE;

/// Main UI system that renders all the egui panels
pub fn ui_system(mut contexts: EguiContexts, state: Option<NonSendMut<AppState>>) {
    let Some(mut state) = state else {
        return;
    };

    let ctx = contexts.ctx_mut();

    // Bottom Panel - Status history
    render_bottom_panel(ctx, &mut state);

    // Central Panel - Status and presets
    render_central_panel(ctx, &mut state);

    let hovered = windows::render_settings_window(ctx, &mut state);
    windows::render_confirm_dialog(ctx, &mut state);
    windows::render_error_dialog(ctx, &mut state);

    // Releases are global so a drag off the button still ends the gesture
    if ctx.input(|input| input.pointer.primary_released()) {
        state.release(MOUSE, hovered);
    }
}

/// Renders the bottom panel with the status log
fn render_bottom_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::bottom("log_panel")
        .frame(egui::Frame {
            inner_margin: egui::Margin::same(8.0),
            fill: ctx.style().visuals.window_fill(),
            ..Default::default()
        })
        .show(ctx, |ui| {
            panels::render_logs_section(ui, state);
        });
}

/// Renders the central panel with main content
fn render_central_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(egui::Frame {
            inner_margin: egui::Margin::same(8.0),
            fill: ctx.style().visuals.window_fill(),
            ..Default::default()
        })
        .show(ctx, |ui| {
            ui.group(|ui| {
                panels::render_status_section(ui, state);
            });

            ui.add_space(8.0);

            ui.group(|ui| {
                panels::render_presets_section(ui, state);
            });
        });
}
