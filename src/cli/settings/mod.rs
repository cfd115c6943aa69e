//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a [`SettingHandler`] that validates input and
//! edits a [`Config`] in memory; [`apply_set`] and [`apply_unset`] wrap them
//! with the load/save round trip.

pub mod error;
pub mod handlers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use std::path::Path;

use crate::core::config::Config;


pub trait SettingHandler: Send + Sync {
    fn key(&self) -> &'static str;

    /// Store `args` (joined with spaces) and return a success message.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    fn unset(&self, config: &mut Config) -> String;
}

fn lookup<'a>(
    registry: &'a SettingRegistry,
    key: &str,
) -> Result<&'a dyn SettingHandler, SettingError> {
    registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))
}

pub fn apply_set(
    registry: &SettingRegistry,
    config_path: &Path,
    key: &str,
    args: &[String],
) -> Result<String, SettingError> {
    let handler = lookup(registry, key)?;
    let mut config =
        Config::load_from_path(config_path).map_err(|e| SettingError::ConfigError(e.to_string()))?;
    let message = handler.set(args, &mut config)?;
    config
        .save_to_path(config_path)
        .map_err(|e| SettingError::ConfigError(e.to_string()))?;
    Ok(message)
}

pub fn apply_unset(
    registry: &SettingRegistry,
    config_path: &Path,
    key: &str,
) -> Result<String, SettingError> {
    let handler = lookup(registry, key)?;
    Config::mutate_at(config_path, |config| Ok(handler.unset(config)))
        .map_err(|e| SettingError::ConfigError(e.to_string()))
}
