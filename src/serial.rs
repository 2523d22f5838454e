use std::io::{Read, Write};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, StopBits};

use crate::config::{BAUD_RATE, SERIAL_TIMEOUT_MS};
use crate::error::Result;

/// Byte stream to a camera. Implemented by every `Read + Write + Send` type.
pub trait SerialLink: Read + Write + Send {}

impl<T: Read + Write + Send> SerialLink for T {}

/// Enumerates and opens serial ports.
pub trait PortProvider: Send {
    fn available_ports(&self) -> Result<Vec<String>>;

    fn open(&self, path: &str) -> Result<Box<dyn SerialLink>>;
}

/// Ports of the host machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPorts;

impl PortProvider for SystemPorts {
    fn available_ports(&self) -> Result<Vec<String>> {
        Ok(serialport::available_ports()?
            .into_iter()
            .map(|port| port.port_name)
            .collect())
    }

    fn open(&self, path: &str) -> Result<Box<dyn SerialLink>> {
        let port = serialport::new(path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .flow_control(FlowControl::None)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
            .open()?;

        Ok(Box::new(port))
    }
}
