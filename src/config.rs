// Serial port configuration
pub const BAUD_RATE: u32 = 9_600;
pub const SERIAL_TIMEOUT_MS: u64 = 1_000;

// VISCA camera configuration
pub const CAMERA_ADDRESS: u8 = 1;
pub const PAN_SPEED: u8 = 0x08;
pub const TILT_SPEED: u8 = 0x08;

// Persisted settings
pub const SETTINGS_DIR: &str = "camera_control";
pub const SETTINGS_FILE: &str = "config.json";

// Status history limit
pub const MAX_STATUS_MESSAGES: usize = 100;

// Main window
pub const WINDOW_TITLE: &str = "Camera Control";
pub const WINDOW_WIDTH: f32 = 460.0;
pub const WINDOW_HEIGHT: f32 = 560.0;

/// Preset buttons shown on both panels: camera memory slot and label.
pub const PRESETS: [(u8, &str); 6] = [
    (0, "Preset 1"),
    (1, "Preset 2"),
    (2, "Preset 3"),
    (3, "Preset 4"),
    (4, "Preset 5"),
    (5, "Preset 6"),
];

/// Press-and-hold buttons in the settings window: label and direction.
pub const HOLD_BUTTONS: [(&str, &str); 6] = [
    ("Up", "up"),
    ("Down", "down"),
    ("Left", "left"),
    ("Right", "right"),
    ("Zoom in", "in"),
    ("Zoom out", "out"),
];
