mod direction;
mod settings;

pub use direction::Direction;
pub use settings::{InteractionSettings, KeyBinding, KeyBindings};
