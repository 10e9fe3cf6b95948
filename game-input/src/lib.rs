mod actions;
mod bindings;
mod pointer;

pub use actions::GameAction;
pub use bindings::{InputBindings, KeyBinding, Modifiers};
pub use pointer::{PointerFrameState, pointer_button_from_name};
