//! Error type shared by the simulation core
//!
//! The core has no I/O, so every failure is a precondition violation raised
//! synchronously while building bodies, parameters or clusters

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type SimResult<T> = Result<T, SimError>;
