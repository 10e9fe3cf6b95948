use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use game_input::{GameAction, InputBindings, PointerFrameState, pointer_button_from_name};
use glam::Vec2;
use tracing::{info, trace, warn};

use crate::ecs::{GameSet, configure_game_sets};
use crate::events::{
    FacingChangeRequest, HoverPhase, InfoPanelRequest, PointerDragEvent, PointerHoverEvent,
    ThrowRequest, TooltipUpdate,
};
use crate::interaction::{
    GestureClassifier, GestureOutcome, InteractionContext, InteractionHost, InteractionNotice,
    InteractionOutbox, PointerFrame, PointerQuery,
};
use crate::settings_types::Settings;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseInteractionSet;

/// The game's side of the pointer engine.
#[derive(Resource)]
pub struct InteractionWorld(pub Box<dyn InteractionHost>);

impl InteractionWorld {
    pub fn new(host: impl InteractionHost + 'static) -> Self {
        Self(Box::new(host))
    }
}

/// Pointer position in screen pixels and in world units, written by the windowing layer.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct CursorPosition {
    pub screen: Vec2,
    pub world: Vec2,
}

/// Armed by the toggle key; the next press becomes a throw.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowMode(pub bool);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerButton(pub MouseButton);

pub struct PointerInteractionPlugin;

impl Plugin for PointerInteractionPlugin {
    fn build(&self, app: &mut App) {
        configure_game_sets(app);

        let settings = app
            .world()
            .get_resource::<Settings>()
            .cloned()
            .unwrap_or_default();
        let button = pointer_button_from_name(&settings.interaction.pointer_button)
            .unwrap_or_else(|| {
                warn!(
                    "Unknown pointer button {:?}, using Left",
                    settings.interaction.pointer_button
                );
                MouseButton::Left
            });

        app.init_resource::<CursorPosition>()
            .init_resource::<ThrowMode>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(PointerButton(button))
            .insert_resource(InputBindings::from_settings(&settings.key_bindings))
            .insert_resource(GestureClassifier::from_settings(&settings.interaction))
            .add_systems(
                Update,
                (throw_mode_toggle_system, pointer_interaction_system)
                    .chain()
                    .in_set(MouseInteractionSet)
                    .in_set(GameSet::Interaction),
            );
    }
}

#[derive(SystemParam)]
pub struct NoticeWriters<'w> {
    facing: MessageWriter<'w, FacingChangeRequest>,
    hover: MessageWriter<'w, PointerHoverEvent>,
    tooltip: MessageWriter<'w, TooltipUpdate>,
    info_panel: MessageWriter<'w, InfoPanelRequest>,
    throw: MessageWriter<'w, ThrowRequest>,
    drag: MessageWriter<'w, PointerDragEvent>,
}

impl NoticeWriters<'_> {
    fn forward(&mut self, notice: InteractionNotice) {
        match notice {
            InteractionNotice::FacingChanged { direction } => {
                self.facing.write(FacingChangeRequest { direction });
            }
            InteractionNotice::HoverStarted(target) => {
                self.hover.write(PointerHoverEvent {
                    target,
                    phase: HoverPhase::Start,
                });
            }
            InteractionNotice::HoverTick(target) => {
                self.hover.write(PointerHoverEvent {
                    target,
                    phase: HoverPhase::Tick,
                });
            }
            InteractionNotice::HoverEnded(target) => {
                self.hover.write(PointerHoverEvent {
                    target,
                    phase: HoverPhase::End,
                });
            }
            InteractionNotice::TooltipChanged(text) => {
                self.tooltip.write(TooltipUpdate { text });
            }
            InteractionNotice::InfoPanel { position, entries } => {
                self.info_panel.write(InfoPanelRequest { position, entries });
            }
            InteractionNotice::ThrowRequested { target_position } => {
                self.throw.write(ThrowRequest { target_position });
            }
            InteractionNotice::DragStarted { target } => {
                self.drag.write(PointerDragEvent::Started { target });
            }
            InteractionNotice::DragEnded {
                target,
                world_position,
            } => {
                self.drag.write(PointerDragEvent::Ended {
                    target,
                    world_position,
                });
            }
        }
    }
}

pub fn throw_mode_toggle_system(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<InputBindings>,
    mut throw_mode: ResMut<ThrowMode>,
) {
    if bindings.is_just_pressed(GameAction::ToggleThrow, &keys) {
        throw_mode.0 = !throw_mode.0;
        info!(armed = throw_mode.0, "throw mode toggled");
    }
}

pub fn pointer_interaction_system(
    world: Option<Res<InteractionWorld>>,
    mut classifier: ResMut<GestureClassifier>,
    cursor: Res<CursorPosition>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<InputBindings>,
    button: Res<PointerButton>,
    mut throw_mode: ResMut<ThrowMode>,
    time: Res<Time>,
    mut writers: NoticeWriters,
) {
    let Some(world) = world else {
        return;
    };

    let host = world.0.as_ref();
    let mut ui = host.ui();
    ui.throw_mode |= throw_mode.0;
    let ctx = InteractionContext::from_host(host).with_ui(ui);

    let frame = PointerFrame {
        state: PointerFrameState::sample(&buttons, button.0),
        query: PointerQuery {
            screen: cursor.screen,
            world: cursor.world,
        },
        delta: time.delta(),
        inspect_modifier: bindings.inspect_held(&keys),
        released_this_frame: buttons.just_released(button.0),
    };

    let mut outbox = InteractionOutbox::new();
    let outcome = classifier.tick(&ctx, &frame, &mut outbox);
    if outcome != GestureOutcome::Idle {
        trace!(?outcome, "pointer frame");
    }

    for notice in outbox.drain() {
        if matches!(notice, InteractionNotice::ThrowRequested { .. }) {
            throw_mode.0 = false;
        }
        writers.forward(notice);
    }
}
