//! Parameter management
//!
//! Session configuration for the launcher: a bounded parameter store plus
//! the launcher calibration block. A persistence layer would attach to
//! the store's dirty flag; the core only reads and writes in memory.

pub mod error;
pub mod launcher;
pub mod storage;

pub use error::ParameterError;
pub use launcher::LauncherParams;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
