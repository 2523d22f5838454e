pub mod logs;
pub mod presets;
pub mod status;

pub use logs::render_logs_section;
pub use presets::render_presets_section;
pub use status::render_status_section;
