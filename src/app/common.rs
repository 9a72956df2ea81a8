use std::path::PathBuf;

use log::{debug, warn};

use crate::Result;
use crate::Settings;
use crate::core::GuestStore;

/// Resolves settings for a command, applying the `--data-dir` override last.
pub fn load_settings(
    config_override: Option<&PathBuf>,
    data_dir_override: Option<&PathBuf>,
) -> Result<Settings> {
    let mut settings = Settings::resolve(config_override.map(PathBuf::as_path))?;
    match &settings.file_path {
        Some(path) => debug!("loaded settings from {}", path.display()),
        None => debug!("no settings file found; using defaults"),
    }
    for warning in &settings.warnings {
        warn!("{warning}");
    }
    if let Some(dir) = data_dir_override {
        settings.data_dir = dir.clone();
    }
    Ok(settings)
}

pub fn guest_store(settings: &Settings) -> GuestStore {
    GuestStore::new(settings.data_dir.clone())
}
