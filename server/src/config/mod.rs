//! Configuration management: defaults and loading from the environment.

pub mod app_config;

pub use app_config::AppConfig;
