use thiserror::Error;

/// Errors surfaced by the simulation core. Most "errors" in the arena are
/// policy results (no detection, uniform fallback); only configuration
/// mistakes fail fast.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid boundary condition {0:?}, expected \"scarce\" or \"stable\"")]
    InvalidBoundaryCondition(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
