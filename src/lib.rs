use bevy::prelude::*;

pub mod ecs;
pub mod events;
pub mod interaction;
pub mod plugins;
pub mod scene;
pub mod settings;
pub mod settings_types;

pub fn storage_dir() -> std::path::PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    path.push("PointerIntent");
    let _ = std::fs::create_dir_all(&path);
    path
}

pub struct CoreEventsPlugin;

impl Plugin for CoreEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<events::FacingChangeRequest>()
            .add_message::<events::PointerHoverEvent>()
            .add_message::<events::TooltipUpdate>()
            .add_message::<events::InfoPanelRequest>()
            .add_message::<events::ThrowRequest>()
            .add_message::<events::PointerDragEvent>();
    }
}

/// Settings, messages and the pointer engine. The game still has to insert an
/// [`plugins::mouse_interaction::InteractionWorld`] before anything is resolved.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CoreEventsPlugin,
            settings::SettingsPlugin,
            plugins::mouse_interaction::PointerInteractionPlugin,
            plugins::cursor::CursorPlugin,
        ));
    }
}
