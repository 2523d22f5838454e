use super::{Result, ViscaError};

/// Highest pan speed accepted by the pan/tilt drive command.
pub const MAX_PAN_SPEED: u8 = 0x18;
/// Highest tilt speed accepted by the pan/tilt drive command.
pub const MAX_TILT_SPEED: u8 = 0x14;
/// Highest camera memory slot.
pub const MAX_PRESET: u8 = 0x0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Category {
    Camera = 0x04,
    PanTilt = 0x06,
}

pub trait Command {
    const CATEGORY: Category = Category::Camera;
    const ID: u8;
}

/// A command that changes camera state.
pub trait Action: Command {
    fn data(&self) -> Result<Vec<u8>>;
}

/// A command that reads camera state back.
pub trait Inquiry: Command + Sized {
    fn from_payload(payload: &[u8]) -> Result<Self>;
}

fn validate_speed(speed: u8, max: u8) -> Result<u8> {
    if speed > 0 && speed <= max {
        Ok(speed)
    } else {
        Err(ViscaError::InvalidSpeed)
    }
}

fn validate_preset(preset: u8) -> Result<u8> {
    if preset <= MAX_PRESET {
        Ok(preset)
    } else {
        Err(ViscaError::InvalidPreset)
    }
}

fn first_nibble(payload: &[u8]) -> Result<u8> {
    payload
        .first()
        .map(|value| value & 0x0F)
        .ok_or(ViscaError::InvalidResponse)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    On = 0x02,
    Off = 0x03,
}

impl Command for Power {
    const ID: u8 = 0x00;
}

impl Action for Power {
    fn data(&self) -> Result<Vec<u8>> {
        Ok(vec![*self as u8])
    }
}

impl Inquiry for Power {
    fn from_payload(payload: &[u8]) -> Result<Self> {
        match first_nibble(payload)? {
            0x02 => Ok(Self::On),
            0x03 => Ok(Self::Off),
            other => Err(ViscaError::InvalidPowerValue(other)),
        }
    }
}

impl From<bool> for Power {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<Power> for bool {
    fn from(value: Power) -> Self {
        matches!(value, Power::On)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autofocus {
    Auto = 0x02,
    Manual = 0x03,
}

impl Command for Autofocus {
    const ID: u8 = 0x38;
}

impl Action for Autofocus {
    fn data(&self) -> Result<Vec<u8>> {
        Ok(vec![*self as u8])
    }
}

impl Inquiry for Autofocus {
    fn from_payload(payload: &[u8]) -> Result<Self> {
        match first_nibble(payload)? {
            0x02 => Ok(Self::Auto),
            0x03 => Ok(Self::Manual),
            other => Err(ViscaError::InvalidAutofocusValue(other)),
        }
    }
}

impl From<bool> for Autofocus {
    fn from(value: bool) -> Self {
        if value { Self::Auto } else { Self::Manual }
    }
}

impl From<Autofocus> for bool {
    fn from(value: Autofocus) -> Self {
        matches!(value, Autofocus::Auto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zoom {
    Stop = 0x00,
    Tele = 0x02,
    Wide = 0x03,
}

impl Command for Zoom {
    const ID: u8 = 0x07;
}

impl Action for Zoom {
    fn data(&self) -> Result<Vec<u8>> {
        Ok(vec![*self as u8])
    }
}

// Not driven from the UI yet
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Stop = 0x00,
    Far = 0x02,
    Near = 0x03,
}

impl Command for Focus {
    const ID: u8 = 0x08;
}

impl Action for Focus {
    fn data(&self) -> Result<Vec<u8>> {
        Ok(vec![*self as u8])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Set(u8),
    Recall(u8),
}

impl Command for Preset {
    const ID: u8 = 0x3F;
}

impl Action for Preset {
    fn data(&self) -> Result<Vec<u8>> {
        Ok(match *self {
            Self::Set(preset) => vec![0x01, validate_preset(preset)?],
            Self::Recall(preset) => vec![0x02, validate_preset(preset)?],
        })
    }
}

/// Pan/tilt drive. Speeds are `1..=MAX_PAN_SPEED` and `1..=MAX_TILT_SPEED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up(u8),
    Down(u8),
    Left(u8),
    Right(u8),
    Stop,
}

impl Command for Move {
    const CATEGORY: Category = Category::PanTilt;
    const ID: u8 = 0x01;
}

impl Action for Move {
    fn data(&self) -> Result<Vec<u8>> {
        let pan_speed = match *self {
            Self::Left(speed) | Self::Right(speed) => validate_speed(speed, MAX_PAN_SPEED)?,
            _ => 0x00,
        };
        let tilt_speed = match *self {
            Self::Up(speed) | Self::Down(speed) => validate_speed(speed, MAX_TILT_SPEED)?,
            _ => 0x00,
        };
        let pan = match *self {
            Self::Left(_) => 0x01,
            Self::Right(_) => 0x02,
            _ => 0x03,
        };
        let tilt = match *self {
            Self::Up(_) => 0x01,
            Self::Down(_) => 0x02,
            _ => 0x03,
        };

        Ok(vec![pan_speed, tilt_speed, pan, tilt])
    }
}
