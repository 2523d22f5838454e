use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};

use bevy::log::debug;

use super::{
    Action, Inquiry, Response, ResponseKind, Result, TERMINATOR, ViscaError, action_packet,
    inquiry_packet,
};

/// A VISCA connection over any byte stream, usually a serial port.
pub struct ViscaPort<T: Read + Write> {
    reader: BufReader<T>,
}

impl<T> ViscaPort<T>
where
    T: Read + Write,
{
    pub fn new(port: T) -> Self {
        Self {
            reader: BufReader::new(port),
        }
    }

    /// Sends a command and waits for the camera to report completion.
    pub fn execute<A: Action>(&mut self, address: u8, action: A) -> Result<()> {
        let packet = action_packet(address, &action)?;
        self.send(&packet)?;
        self.receive_completion(address)?;
        Ok(())
    }

    /// Sends an inquiry and decodes the completion payload.
    pub fn inquire<I: Inquiry>(&mut self, address: u8) -> Result<I> {
        let packet = inquiry_packet::<I>(address)?;
        self.send(&packet)?;
        let response = self.receive_completion(address)?;
        I::from_payload(response.payload())
    }

    fn send(&mut self, packet: &[u8]) -> Result<()> {
        debug!("Sending: {:02X?}", packet);

        let port = self.reader.get_mut();
        port.write_all(packet)?;
        port.flush()?;
        Ok(())
    }

    /// An ack may come first; anything after it other than a completion is an error.
    fn receive_completion(&mut self, address: u8) -> Result<Response> {
        let response = self.receive_response(address)?;
        if response.kind() == ResponseKind::Completion {
            return Ok(response);
        }

        let response = self.receive_response(address)?;
        if response.kind() == ResponseKind::Completion {
            Ok(response)
        } else {
            Err(ViscaError::InvalidResponse)
        }
    }

    /// Reads packets until one from `address` arrives, skipping other cameras on the chain.
    fn receive_response(&mut self, address: u8) -> Result<Response> {
        loop {
            let mut bytes = Vec::new();
            if self.reader.read_until(TERMINATOR, &mut bytes)? == 0 {
                return Err(ViscaError::InvalidResponse);
            }

            debug!("Received: {:02X?}", bytes);

            let response = Response::try_from(bytes)?;
            if response.address() == address {
                return Ok(response);
            }
        }
    }
}

impl<T> fmt::Debug for ViscaPort<T>
where
    T: Read + Write + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViscaPort({:?})", self.reader.get_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeLink;
    use crate::visca::{Autofocus, Move, Power};

    #[test]
    fn test_execute_waits_for_ack_then_completion() {
        let link = FakeLink::replying(b"\x90\x41\xFF\x90\x51\xFF");
        let written = link.written();
        let mut port = ViscaPort::new(link);

        port.execute(1, Move::Up(0x08)).unwrap();

        assert_eq!(
            written.lock().unwrap().as_slice(),
            b"\x81\x01\x06\x01\x00\x08\x03\x01\xFF"
        );
    }

    #[test]
    fn test_execute_accepts_bare_completion() {
        let mut port = ViscaPort::new(FakeLink::replying(b"\x90\x51\xFF"));
        assert!(port.execute(1, Power::On).is_ok());
    }

    #[test]
    fn test_execute_reports_camera_error() {
        let mut port = ViscaPort::new(FakeLink::replying(b"\x90\x41\xFF\x90\x61\x41\xFF"));
        assert!(matches!(
            port.execute(1, Power::On),
            Err(ViscaError::CommandNotExecutable)
        ));
    }

    #[test]
    fn test_execute_rejects_two_acks() {
        let mut port = ViscaPort::new(FakeLink::replying(b"\x90\x41\xFF\x90\x42\xFF"));
        assert!(matches!(
            port.execute(1, Power::Off),
            Err(ViscaError::InvalidResponse)
        ));
    }

    #[test]
    fn test_silent_camera_is_an_error() {
        let mut port = ViscaPort::new(FakeLink::replying(b""));
        assert!(port.execute(1, Power::Off).is_err());
    }

    #[test]
    fn test_inquire_skips_other_addresses() {
        let link = FakeLink::replying(b"\xA0\x50\x03\xFF\x90\x50\x02\xFF");
        let written = link.written();
        let mut port = ViscaPort::new(link);

        assert_eq!(port.inquire::<Autofocus>(1).unwrap(), Autofocus::Auto);
        assert_eq!(written.lock().unwrap().as_slice(), b"\x81\x09\x04\x38\xFF");
    }
}
