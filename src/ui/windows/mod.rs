pub mod dialogs;
pub mod settings;

pub use dialogs::{render_confirm_dialog, render_error_dialog};
pub use settings::render_settings_window;
