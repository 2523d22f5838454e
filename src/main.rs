use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::EguiPlugin;

mod app;
mod backend;
mod bridge;
mod camera;
mod config;
mod error;
mod gesture;
mod mirror;
mod persistence;
mod pointer;
mod port_select;
mod presets;
mod serial;
mod state;
mod status;
#[cfg(test)]
mod testing;
mod ui;
mod visca;

use config::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};

fn main() -> AppExit {
    let crate_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "error"
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: WINDOW_TITLE.to_string(),
                        resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: format!("wgpu=error,naga=warn,camera_control={crate_level}"),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin)
        .add_systems(Startup, app::setup)
        .add_systems(Update, (app::bridge_system, ui::ui_system).chain())
        .run()
}
