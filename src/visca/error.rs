use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ViscaError {
    #[error("invalid camera address")]
    InvalidAddress,

    #[error("invalid speed")]
    InvalidSpeed,

    #[error("invalid preset")]
    InvalidPreset,

    #[error("invalid message length")]
    InvalidMessageLength,

    #[error("syntax error")]
    Syntax,

    #[error("command buffer full")]
    CommandBufferFull,

    #[error("command canceled")]
    CommandCanceled,

    #[error("no socket")]
    NoSocket,

    #[error("command not executable")]
    CommandNotExecutable,

    #[error("unknown camera error")]
    Unknown,

    #[error("invalid response")]
    InvalidResponse,

    #[error("unexpected power value {0:#04X}")]
    InvalidPowerValue(u8),

    #[error("unexpected autofocus value {0:#04X}")]
    InvalidAutofocusValue(u8),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViscaError>;
