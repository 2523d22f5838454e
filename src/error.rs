use thiserror::Error as ThisError;

use crate::visca::ViscaError;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("No port set")]
    NoPortSet,

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    #[error("Camera error: {0}")]
    Visca(#[from] ViscaError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A failed backend call as seen by the front end.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CommandError(pub String);

impl From<Error> for CommandError {
    fn from(error: Error) -> Self {
        Self(error.to_string())
    }
}
