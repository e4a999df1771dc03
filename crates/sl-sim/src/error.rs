//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or driving the bubble model.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid parameter: {what} = {value}")]
    InvalidParameter { what: &'static str, value: f64 },
}

pub type SimResult<T> = Result<T, SimError>;
