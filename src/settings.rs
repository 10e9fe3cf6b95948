pub use crate::settings_types::*;
use crate::storage_dir;
use bevy::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{error, info};

impl Settings {
    pub fn load() -> Self {
        let path = storage_dir().join("settings.toml");
        if path.exists() {
            Self::load_from(&path).unwrap_or_else(|e| {
                error!("Failed to load settings.toml, using defaults: {:#}", e);
                Settings::default()
            })
        } else {
            info!("Creating default settings at {:?}", path);
            let default_settings = Settings::default();
            default_settings.save();
            default_settings
        }
    }

    /// Reads and validates a settings file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings = toml::from_str::<Settings>(&content)?;
        settings.validate()?;
        info!("Loaded global settings from {:?}", path);
        Ok(settings)
    }

    pub fn save(&self) {
        let path = storage_dir().join("settings.toml");
        if let Err(e) = self.save_to(&path) {
            error!("Failed to write settings.toml: {:#}", e);
        } else {
            info!("Saved global settings to {:?}", path);
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

pub struct SettingsPlugin;

#[derive(Resource)]
struct SettingsSaveTimer(Timer);

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<Settings>() {
            app.insert_resource(Settings::load());
        }
        // Idle until the first change, so startup never rewrites the file.
        let mut timer = Timer::from_seconds(1.0, TimerMode::Once);
        timer.pause();
        app.insert_resource(SettingsSaveTimer(timer));
        app.add_systems(Update, save_settings_on_change);
    }
}

fn save_settings_on_change(
    settings: Res<Settings>,
    mut timer: ResMut<SettingsSaveTimer>,
    time: Res<Time>,
) {
    if settings.is_changed() && !settings.is_added() {
        timer.0.reset();
        timer.0.unpause();
    }

    timer.0.tick(time.delta());

    if timer.0.just_finished() {
        settings.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pointer-intent-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut settings = Settings::default();
        settings.interaction.max_ray_distance = 42.0;

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = temp_path("invalid");
        fs::write(&path, "[interaction]\nmax_ray_distance = -1.0\n").unwrap();

        let result = Settings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert!(result.is_err());
    }
}
