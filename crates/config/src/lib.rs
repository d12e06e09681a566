// Configuration loading

pub mod settings;

pub use settings::{Config, ConfigError, CONFIG_ENV, LOCAL_CONFIG_FILE};
