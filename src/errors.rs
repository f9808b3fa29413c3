use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    #[error("Impact solver did not converge after {iterations} iterations (altitude {altitude:.6} miles)")]
    NonConvergence { iterations: usize, altitude: f64 },

    #[error("Burn rate {0} is outside the allowed range")]
    BurnRateOutOfRange(f64),

    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("Session error: {0}")]
    SessionError(String),
}
