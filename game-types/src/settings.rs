use serde::{Deserialize, Serialize};

/// Tuning for pointer hit-testing and the continuous aim trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Seconds between aim retriggers while the pointer button is held.
    pub aim_trigger_interval_secs: f32,
    /// Maximum distance handed to the ray caster.
    pub max_ray_distance: f32,
    /// Bitmask of physics layers the pointer ray is cast against.
    pub interaction_layers: u32,
    /// Render layer used only for line-of-sight masking; never a target.
    pub occlusion_layer: String,
    /// Entity layer reserved for player characters.
    pub player_layer: String,
    /// Pointer button that drives interactions ("Left", "Right" or "Middle").
    pub pointer_button: String,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            aim_trigger_interval_secs: 0.1,
            max_ray_distance: 10.0,
            interaction_layers: u32::MAX,
            occlusion_layer: "FieldOfView".to_string(),
            player_layer: "Players".to_string(),
            pointer_button: "Left".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyBinding(pub [String; 2]);

impl KeyBinding {
    pub fn single(code: &str) -> Self {
        KeyBinding([code.to_string(), "".to_string()])
    }
}

impl std::ops::Deref for KeyBinding {
    type Target = [String; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a KeyBinding {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for KeyBinding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.0[1].is_empty() {
            serializer.serialize_str(&self.0[0])
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for KeyBinding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Either {
            Single(String),
            Multiple(Vec<String>),
        }

        match Either::deserialize(deserializer)? {
            Either::Single(s) => Ok(KeyBinding([s, "".to_string()])),
            Either::Multiple(v) => {
                let mut bindings = ["".to_string(), "".to_string()];
                for (i, s) in v.into_iter().enumerate().take(2) {
                    bindings[i] = s;
                }
                Ok(KeyBinding(bindings))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Modifier chord that turns a click into an inspect request, e.g. "Shift".
    pub inspect: String,
    pub toggle_throw: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            inspect: "Shift".to_string(),
            toggle_throw: KeyBinding::single("KeyR"),
        }
    }
}
