pub mod config;

pub use config::{AppConfig, NamingConfig, CONFIG_ENV};
