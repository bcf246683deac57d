pub mod config;
pub mod error;
pub mod types;

pub use config::BondConfig;
pub use error::{BondError, Result};
