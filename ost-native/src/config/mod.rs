//! Configuration for the native translation layer

pub mod settings;

pub use settings::{LoggingSettings, Settings};
