pub mod cursor;
pub mod mouse_interaction;
