//! Schema module - Configuration, feature vector and report types.

mod config;
mod evolution;
mod residence;

pub use config::*;
pub use evolution::*;
pub use residence::*;
