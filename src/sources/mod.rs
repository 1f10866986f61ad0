//! Configuration source implementations.

mod config_source;
mod env;
mod file;

pub use config_source::ConfigSource;
pub use env::{EnvSource, LegacyEnvSource};
pub use file::FileSource;
