pub mod primitives;
pub use primitives::*;

pub mod config;
pub use config::MmuConfig;

pub mod error;
pub use error::{VmError, VmResult};
