use catapult_core::launcher::LauncherError;
use catapult_core::parameters::ParameterError;

/// Errors that can occur while running the simulation harness.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("controller fault: {0}")]
    Controller(#[from] LauncherError),

    #[error("parameter store fault: {0}")]
    Parameter(#[from] ParameterError),

    #[error("invalid rig configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
