use thiserror::Error;

/// Errors surfaced while building a simulation from configuration data.
///
/// Frame operations (`update`, `reset`, `draw`) never fail; geometric
/// preconditions inside the engine are asserted instead.
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid scene layout: {0}")]
    InvalidLayout(String),
    #[error("failed to parse json: {0}")]
    Parse(#[from] serde_json::Error),
}
