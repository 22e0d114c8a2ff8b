pub mod arch;
pub mod error;
pub mod optimization;

pub use error::{MlErr, Result};
