use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::config::CAMERA_ADDRESS;
use crate::error::{Error, Result};
use crate::serial::PortProvider;

/// Snapshot of the connection the backend publishes to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    pub port: Option<String>,
    pub ports: Option<Vec<String>>,
    pub status: String,
    #[serde(default)]
    pub power: bool,
    #[serde(default)]
    pub autofocus: bool,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            port: None,
            ports: None,
            status: "Disconnected".to_string(),
            power: false,
            autofocus: false,
        }
    }
}

/// Everything the backend owns about the camera connection.
#[derive(Debug)]
pub struct UiState {
    camera: Option<Camera>,
    port_name: Option<String>,
    ports: Option<Vec<String>>,
    status: String,
    power: bool,
    autofocus: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            camera: None,
            port_name: None,
            ports: None,
            status: "Disconnected".to_string(),
            power: false,
            autofocus: false,
        }
    }
}

impl UiState {
    pub fn snapshot(&self) -> ConnectionState {
        ConnectionState {
            port: self.port_name.clone(),
            ports: self.ports.clone(),
            status: self.status.clone(),
            power: self.power,
            autofocus: self.autofocus,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }

    pub fn camera(&mut self) -> Result<&mut Camera> {
        self.camera.as_mut().ok_or(Error::NoPortSet)
    }

    /// Closes any open port, then opens `path` and reads back power and focus mode.
    /// `None` just disconnects.
    pub fn connect(&mut self, provider: &dyn PortProvider, path: Option<&str>) -> Result<()> {
        self.camera = None;
        self.port_name = None;
        self.power = false;
        self.autofocus = false;
        self.status = "Disconnected".to_string();

        let Some(path) = path else {
            return Ok(());
        };

        let mut camera = Camera::new(provider.open(path)?, CAMERA_ADDRESS);
        let power = camera.power()?;
        // Cameras in standby reject most inquiries
        let autofocus = if power { camera.autofocus()? } else { false };

        self.camera = Some(camera);
        self.port_name = Some(path.to_string());
        self.power = power;
        self.autofocus = autofocus;
        self.status = "Connected".to_string();
        Ok(())
    }

    pub fn refresh_ports(&mut self, provider: &dyn PortProvider) -> Result<Vec<String>> {
        let ports = provider.available_ports()?;
        self.ports = Some(ports.clone());
        Ok(ports)
    }

    pub fn set_power(&mut self, on: bool) -> Result<()> {
        self.camera()?.set_power(on)?;
        self.power = on;
        Ok(())
    }

    pub fn set_autofocus(&mut self, auto: bool) -> Result<()> {
        self.camera()?.set_autofocus(auto)?;
        self.autofocus = auto;
        Ok(())
    }
}
