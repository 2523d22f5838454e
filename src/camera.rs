use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{PAN_SPEED, TILT_SPEED};
use crate::error::Result;
use crate::serial::SerialLink;
use crate::visca::{Autofocus, Move, Power, Preset, ViscaPort, Zoom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanTilt {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl fmt::Display for PanTilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

impl fmt::Display for ZoomDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::In => "in",
            Self::Out => "out",
        })
    }
}

/// What a hold button drives, parsed from its direction attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldTarget {
    Pan(PanTilt),
    Zoom(ZoomDirection),
}

impl FromStr for HoldTarget {
    type Err = String;

    fn from_str(direction: &str) -> std::result::Result<Self, Self::Err> {
        match direction {
            "up" => Ok(Self::Pan(PanTilt::Up)),
            "down" => Ok(Self::Pan(PanTilt::Down)),
            "left" => Ok(Self::Pan(PanTilt::Left)),
            "right" => Ok(Self::Pan(PanTilt::Right)),
            "in" => Ok(Self::Zoom(ZoomDirection::In)),
            "out" => Ok(Self::Zoom(ZoomDirection::Out)),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// A VISCA camera at a fixed address on an open serial link.
pub struct Camera {
    port: ViscaPort<Box<dyn SerialLink>>,
    address: u8,
}

impl Camera {
    pub fn new(link: Box<dyn SerialLink>, address: u8) -> Self {
        Self {
            port: ViscaPort::new(link),
            address,
        }
    }

    pub fn power(&mut self) -> Result<bool> {
        Ok(self.port.inquire::<Power>(self.address)?.into())
    }

    pub fn set_power(&mut self, on: bool) -> Result<()> {
        Ok(self.port.execute(self.address, Power::from(on))?)
    }

    pub fn autofocus(&mut self) -> Result<bool> {
        Ok(self.port.inquire::<Autofocus>(self.address)?.into())
    }

    pub fn set_autofocus(&mut self, auto: bool) -> Result<()> {
        Ok(self.port.execute(self.address, Autofocus::from(auto))?)
    }

    pub fn pan_tilt(&mut self, direction: PanTilt) -> Result<()> {
        let command = match direction {
            PanTilt::Up => Move::Up(TILT_SPEED),
            PanTilt::Down => Move::Down(TILT_SPEED),
            PanTilt::Left => Move::Left(PAN_SPEED),
            PanTilt::Right => Move::Right(PAN_SPEED),
        };
        Ok(self.port.execute(self.address, command)?)
    }

    pub fn stop_move(&mut self) -> Result<()> {
        Ok(self.port.execute(self.address, Move::Stop)?)
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> Result<()> {
        let command = match direction {
            ZoomDirection::In => Zoom::Tele,
            ZoomDirection::Out => Zoom::Wide,
        };
        Ok(self.port.execute(self.address, command)?)
    }

    pub fn stop_zoom(&mut self) -> Result<()> {
        Ok(self.port.execute(self.address, Zoom::Stop)?)
    }

    pub fn set_preset(&mut self, preset: u8) -> Result<()> {
        Ok(self.port.execute(self.address, Preset::Set(preset))?)
    }

    pub fn go_to_preset(&mut self, preset: u8) -> Result<()> {
        Ok(self.port.execute(self.address, Preset::Recall(preset))?)
    }
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
