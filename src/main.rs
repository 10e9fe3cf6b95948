use std::time::Duration;

use anyhow::Context;
use bevy::ecs::message::Messages;
use bevy::input::ButtonState;
use bevy::input::mouse::MouseButtonInput;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use pointer_intent::events::{PointerDragEvent, TooltipUpdate};
use pointer_intent::interaction::{
    AimCapability, AimInteraction, ApplyCapability, CapabilitySet, DragCapability, Interaction,
    InteractionResult,
};
use pointer_intent::plugins::mouse_interaction::{CursorPosition, InteractionWorld};
use pointer_intent::scene::{Bounds, SceneEntity, SceneHost};
use pointer_intent::settings::Settings;

const FRAME: Duration = Duration::from_millis(16);

struct Door;

impl ApplyCapability for Door {
    fn click(&self, interaction: &Interaction) -> InteractionResult {
        tracing::info!(target_id = ?interaction.target, "door toggled");
        InteractionResult::HANDLED
    }
}

struct Crate;

impl DragCapability for Crate {
    fn can_begin_drag(&self) -> bool {
        true
    }

    fn begin_drag(&self, world_position: Vec2) {
        tracing::info!(x = world_position.x, y = world_position.y, "crate picked up");
    }
}

struct Blaster;

impl AimCapability for Blaster {
    fn aim(&self, interaction: &AimInteraction) -> InteractionResult {
        tracing::info!(phase = ?interaction.phase, "blaster fired");
        InteractionResult::HANDLED
    }
}

fn demo_scene(armed: bool) -> SceneHost {
    let mut scene = SceneHost::new();
    scene.spawn(
        SceneEntity::tilemap(1, "Floor", Bounds::new(Vec2::splat(-10.0), Vec2::splat(10.0)))
            .named("Floor"),
    );
    scene.spawn(
        SceneEntity::sprite(2, "Objects", Bounds::centered(Vec2::new(1.0, 0.0), Vec2::splat(0.5)))
            .named("Door")
            .sorted(1, 0)
            .with_capabilities(CapabilitySet::new().with_apply(Door)),
    );
    scene.spawn(
        SceneEntity::sprite(3, "Objects", Bounds::centered(Vec2::new(0.0, 1.0), Vec2::splat(0.4)))
            .named("Crate")
            .sorted(1, 1)
            .with_capabilities(CapabilitySet::new().with_drag(Crate)),
    );
    let blaster = scene.add_item(100, CapabilitySet::new().with_aim(Blaster));
    if armed {
        scene.hold(Some(blaster));
    }
    scene
}

fn report_system(
    mut tooltips: MessageReader<TooltipUpdate>,
    mut drags: MessageReader<PointerDragEvent>,
) {
    for tooltip in tooltips.read() {
        tracing::info!(text = ?tooltip.text, "tooltip");
    }
    for drag in drags.read() {
        tracing::info!(?drag, "drag");
    }
}

fn set_button(app: &mut App, state: ButtonState) {
    app.world_mut()
        .resource_mut::<Messages<MouseButtonInput>>()
        .write(MouseButtonInput {
            button: MouseButton::Left,
            state,
            window: Entity::PLACEHOLDER,
        });
}

fn move_cursor(app: &mut App, world: Vec2) {
    *app.world_mut().resource_mut::<CursorPosition>() = CursorPosition {
        screen: world * 32.0,
        world,
    };
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init()
        .ok();

    let settings = Settings::load();
    settings.validate().context("invalid settings.toml")?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(bevy::input::InputPlugin)
        .insert_resource(settings)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(pointer_intent::CorePlugin)
        .insert_resource(InteractionWorld::new(demo_scene(false)))
        .add_systems(Update, report_system);

    tracing::info!("hovering the door");
    move_cursor(&mut app, Vec2::new(1.0, 0.0));
    run_frames(&mut app, 2);

    tracing::info!("clicking the door");
    set_button(&mut app, ButtonState::Pressed);
    run_frames(&mut app, 1);
    set_button(&mut app, ButtonState::Released);
    run_frames(&mut app, 1);

    tracing::info!("dragging the crate");
    move_cursor(&mut app, Vec2::new(0.0, 1.0));
    set_button(&mut app, ButtonState::Pressed);
    run_frames(&mut app, 3);
    set_button(&mut app, ButtonState::Released);
    run_frames(&mut app, 1);

    tracing::info!("holding fire over empty floor");
    app.insert_resource(InteractionWorld::new(demo_scene(true)));
    move_cursor(&mut app, Vec2::new(-1.0, -1.0));
    set_button(&mut app, ButtonState::Pressed);
    run_frames(&mut app, 20);
    set_button(&mut app, ButtonState::Released);
    run_frames(&mut app, 1);

    Ok(())
}
