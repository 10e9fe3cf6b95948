use super::GameAction;
use bevy::input::ButtonInput;
use bevy::input::keyboard::KeyCode;
use bevy::prelude::Resource;
use game_types::KeyBindings;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Parses a chord such as `"Ctrl+Shift"`. Unknown names reject the whole chord.
    pub fn from_chord(chord: &str) -> Option<Self> {
        let mut modifiers = Modifiers::none();
        for part in chord.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            match part {
                "Ctrl" => modifiers.ctrl = true,
                "Shift" => modifiers.shift = true,
                "Alt" => modifiers.alt = true,
                _ => return None,
            }
        }
        Some(modifiers)
    }

    /// Exact match: every modifier is pressed iff it is part of this set.
    pub fn matches(&self, input: &ButtonInput<KeyCode>) -> bool {
        let (ctrl, shift, alt) = Self::pressed(input);
        ctrl == self.ctrl && shift == self.shift && alt == self.alt
    }

    /// Loose match: every modifier in this set is pressed, others are ignored.
    /// An empty set never counts as held.
    pub fn held(&self, input: &ButtonInput<KeyCode>) -> bool {
        if self.is_empty() {
            return false;
        }
        let (ctrl, shift, alt) = Self::pressed(input);
        (!self.ctrl || ctrl) && (!self.shift || shift) && (!self.alt || alt)
    }

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt
    }

    fn pressed(input: &ButtonInput<KeyCode>) -> (bool, bool, bool) {
        (
            input.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
            input.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
            input.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::none(),
        }
    }

    pub fn is_just_pressed(&self, input: &ButtonInput<KeyCode>) -> bool {
        input.just_pressed(self.key) && self.modifiers.matches(input)
    }

    pub fn from_dom_code(code: &str) -> Option<Self> {
        let (chord, key_part) = match code.rsplit_once('+') {
            Some((chord, key)) => (chord, key),
            None => ("", code),
        };
        let modifiers = Modifiers::from_chord(chord)?;
        dom_code_to_keycode(key_part).map(|key| KeyBinding { key, modifiers })
    }
}

#[derive(Resource)]
pub struct InputBindings {
    inspect: Modifiers,
    bindings: HashMap<GameAction, Vec<KeyBinding>>,
}

impl InputBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(GameAction::ToggleThrow, vec![KeyBinding::new(KeyCode::KeyR)]);
        Self {
            inspect: Modifiers::shift(),
            bindings,
        }
    }

    pub fn from_settings(settings: &KeyBindings) -> Self {
        let inspect = Modifiers::from_chord(&settings.inspect).unwrap_or_else(|| {
            tracing::warn!("Invalid inspect modifier {:?}, using Shift", settings.inspect);
            Modifiers::shift()
        });

        let mut bindings = HashMap::new();
        for action in GameAction::all() {
            let codes = match action {
                GameAction::ToggleThrow => &settings.toggle_throw,
            };
            let parsed: Vec<KeyBinding> = codes
                .into_iter()
                .filter(|code| !code.is_empty())
                .filter_map(|code| KeyBinding::from_dom_code(code))
                .collect();
            if !parsed.is_empty() {
                bindings.insert(*action, parsed);
            }
        }

        Self { inspect, bindings }
    }

    pub fn inspect_modifier(&self) -> Modifiers {
        self.inspect
    }

    pub fn inspect_held(&self, input: &ButtonInput<KeyCode>) -> bool {
        self.inspect.held(input)
    }

    pub fn get(&self, action: GameAction) -> Option<&[KeyBinding]> {
        self.bindings.get(&action).map(|v| v.as_slice())
    }

    pub fn is_just_pressed(&self, action: GameAction, input: &ButtonInput<KeyCode>) -> bool {
        self.get(action)
            .is_some_and(|bindings| bindings.iter().any(|kb| kb.is_just_pressed(input)))
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::new()
    }
}

fn dom_code_to_keycode(code: &str) -> Option<KeyCode> {
    match code {
        "KeyA" => Some(KeyCode::KeyA),
        "KeyB" => Some(KeyCode::KeyB),
        "KeyC" => Some(KeyCode::KeyC),
        "KeyD" => Some(KeyCode::KeyD),
        "KeyE" => Some(KeyCode::KeyE),
        "KeyF" => Some(KeyCode::KeyF),
        "KeyG" => Some(KeyCode::KeyG),
        "KeyH" => Some(KeyCode::KeyH),
        "KeyQ" => Some(KeyCode::KeyQ),
        "KeyR" => Some(KeyCode::KeyR),
        "KeyT" => Some(KeyCode::KeyT),
        "KeyV" => Some(KeyCode::KeyV),
        "KeyX" => Some(KeyCode::KeyX),
        "KeyY" => Some(KeyCode::KeyY),
        "KeyZ" => Some(KeyCode::KeyZ),
        "Space" => Some(KeyCode::Space),
        "Tab" => Some(KeyCode::Tab),
        "Backquote" => Some(KeyCode::Backquote),
        "F1" => Some(KeyCode::F1),
        "F2" => Some(KeyCode::F2),
        "F3" => Some(KeyCode::F3),
        "F4" => Some(KeyCode::F4),
        _ => None,
    }
}
