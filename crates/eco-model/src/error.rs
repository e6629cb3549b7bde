use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown sex token: {0}")]
    UnknownSex(String),
    #[error("unknown body surface area formula: {0}")]
    UnknownBsaFormula(String),
    #[error("unknown unit policy: {0}")]
    UnknownUnitPolicy(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, EcoError>;
