use super::{Action, Inquiry, Result, ViscaError};

pub const TERMINATOR: u8 = 0xFF;

const COMMAND: u8 = 0x01;
const INQUIRY: u8 = 0x09;

fn header_for_address(address: u8) -> Result<u8> {
    if (1..=7).contains(&address) {
        Ok(0x80 | address)
    } else {
        Err(ViscaError::InvalidAddress)
    }
}

/// Encodes a command packet for the camera at `address`.
pub fn action_packet<A: Action>(address: u8, action: &A) -> Result<Vec<u8>> {
    let mut bytes = vec![
        header_for_address(address)?,
        COMMAND,
        A::CATEGORY as u8,
        A::ID,
    ];
    bytes.extend(action.data()?);
    bytes.push(TERMINATOR);
    Ok(bytes)
}

/// Encodes an inquiry packet for the camera at `address`.
pub fn inquiry_packet<I: Inquiry>(address: u8) -> Result<Vec<u8>> {
    Ok(vec![
        header_for_address(address)?,
        INQUIRY,
        I::CATEGORY as u8,
        I::ID,
        TERMINATOR,
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Ack,
    Completion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    kind: ResponseKind,
    bytes: Vec<u8>,
}

impl Response {
    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    /// Address of the camera that sent this response.
    pub fn address(&self) -> u8 {
        (self.bytes[0] >> 4) & 0x07
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[2..self.bytes.len() - 1]
    }
}

impl TryFrom<Vec<u8>> for Response {
    type Error = ViscaError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < 3 || bytes[0] & 0x80 == 0 || bytes.last() != Some(&TERMINATOR) {
            return Err(ViscaError::InvalidResponse);
        }

        let kind = match (bytes[1] >> 4) & 0x07 {
            4 => ResponseKind::Ack,
            5 => ResponseKind::Completion,
            6 if bytes.len() >= 4 => {
                return Err(match bytes[2] {
                    0x01 => ViscaError::InvalidMessageLength,
                    0x02 => ViscaError::Syntax,
                    0x03 => ViscaError::CommandBufferFull,
                    0x04 => ViscaError::CommandCanceled,
                    0x05 => ViscaError::NoSocket,
                    0x41 => ViscaError::CommandNotExecutable,
                    _ => ViscaError::Unknown,
                });
            }
            _ => return Err(ViscaError::InvalidResponse),
        };

        Ok(Self { kind, bytes })
    }
}
