use anyhow::{bail, ensure};
use bevy::prelude::Resource;

pub use game_types::{InteractionSettings, KeyBinding, KeyBindings};
use game_input::{Modifiers, pointer_button_from_name};

#[derive(Resource, serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub interaction: InteractionSettings,
    pub key_bindings: KeyBindings,
}

impl Settings {
    /// Rejects values the pointer engine cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        let interaction = &self.interaction;

        ensure!(
            interaction.aim_trigger_interval_secs.is_finite()
                && interaction.aim_trigger_interval_secs >= 0.0,
            "aim_trigger_interval_secs must be a finite, non-negative number of seconds (got {})",
            interaction.aim_trigger_interval_secs
        );
        ensure!(
            interaction.max_ray_distance.is_finite() && interaction.max_ray_distance > 0.0,
            "max_ray_distance must be positive (got {})",
            interaction.max_ray_distance
        );
        ensure!(
            !interaction.occlusion_layer.trim().is_empty(),
            "occlusion_layer must not be empty"
        );
        ensure!(
            !interaction.player_layer.trim().is_empty(),
            "player_layer must not be empty"
        );
        if pointer_button_from_name(&interaction.pointer_button).is_none() {
            bail!(
                "pointer_button must be Left, Right or Middle (got {:?})",
                interaction.pointer_button
            );
        }

        match Modifiers::from_chord(&self.key_bindings.inspect) {
            Some(modifiers) if !modifiers.is_empty() => {}
            _ => bail!(
                "inspect must be a modifier chord such as \"Shift\" (got {:?})",
                self.key_bindings.inspect
            ),
        }
        for code in &self.key_bindings.toggle_throw {
            if !code.is_empty() && game_input::KeyBinding::from_dom_code(code).is_none() {
                bail!("toggle_throw has an unknown key {:?}", code);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_interaction_values() {
        let mut settings = Settings::default();
        settings.interaction.aim_trigger_interval_secs = -0.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.interaction.max_ray_distance = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.interaction.occlusion_layer = " ".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.interaction.pointer_button = "Back".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_bindings() {
        let mut settings = Settings::default();
        settings.key_bindings.inspect = "Hyper".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.key_bindings.toggle_throw = KeyBinding::single("NotAKey");
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("NotAKey"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut settings = Settings::default();
        settings.interaction.aim_trigger_interval_secs = 0.25;
        settings.key_bindings.toggle_throw = KeyBinding(["KeyT".to_string(), "F2".to_string()]);

        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
