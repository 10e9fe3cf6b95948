#![allow(dead_code)]

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use glam::Vec2;
use pointer_intent::interaction::{
    AimCapability, AimInteraction, AimPhase, ApplyCapability, DragCapability, EnclosureCapability,
    HoverObserver, Interaction, InteractionResult, MeleeCapability,
};
use pointer_intent::plugins::mouse_interaction::{CursorPosition, InteractionWorld};
use pointer_intent::scene::SceneHost;
use pointer_intent::settings::Settings;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared, ordered record of capability calls, as `"<label>:<call>"`.
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<String>>>);

impl Calls {
    pub fn push(&self, label: &str, call: &str) {
        self.0.lock().unwrap().push(format!("{}:{}", label, call));
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.all().iter().filter(|e| *e == entry).count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// Answers every capability call with the same result and records it.
pub struct Probe {
    calls: Calls,
    label: &'static str,
    handled: bool,
}

impl Probe {
    pub fn new(calls: &Calls, label: &'static str, handled: bool) -> Self {
        Self {
            calls: calls.clone(),
            label,
            handled,
        }
    }
}

impl MeleeCapability for Probe {
    fn melee(&self, _interaction: &Interaction) -> InteractionResult {
        self.calls.push(self.label, "melee");
        InteractionResult::handled(self.handled)
    }
}

impl ApplyCapability for Probe {
    fn click(&self, _interaction: &Interaction) -> InteractionResult {
        self.calls.push(self.label, "click");
        InteractionResult::handled(self.handled)
    }

    fn drag(&self, _interaction: &Interaction) -> InteractionResult {
        self.calls.push(self.label, "drag");
        InteractionResult::handled(self.handled)
    }
}

impl EnclosureCapability for Probe {
    fn interact(&self, _interaction: &Interaction) -> InteractionResult {
        self.calls.push(self.label, "enclosure");
        InteractionResult::handled(self.handled)
    }
}

impl HoverObserver for Probe {
    fn hover_start(&self) {
        self.calls.push(self.label, "hover_start");
    }

    fn hover_end(&self) {
        self.calls.push(self.label, "hover_end");
    }
}

/// Aim handler answering from a script, then from `fallback`.
pub struct Gun {
    calls: Calls,
    label: &'static str,
    script: Mutex<VecDeque<bool>>,
    fallback: bool,
}

impl Gun {
    pub fn new(calls: &Calls, label: &'static str, fallback: bool) -> Self {
        Self::scripted(calls, label, &[], fallback)
    }

    pub fn scripted(calls: &Calls, label: &'static str, script: &[bool], fallback: bool) -> Self {
        Self {
            calls: calls.clone(),
            label,
            script: Mutex::new(script.iter().copied().collect()),
            fallback,
        }
    }
}

impl AimCapability for Gun {
    fn aim(&self, interaction: &AimInteraction) -> InteractionResult {
        let phase = match interaction.phase {
            AimPhase::Press => "press",
            AimPhase::Hold => "hold",
        };
        self.calls.push(self.label, phase);
        let stop = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);
        InteractionResult::handled(stop)
    }
}

pub struct Grabbable {
    calls: Calls,
    label: &'static str,
    allowed: bool,
}

impl Grabbable {
    pub fn new(calls: &Calls, label: &'static str, allowed: bool) -> Self {
        Self {
            calls: calls.clone(),
            label,
            allowed,
        }
    }
}

impl DragCapability for Grabbable {
    fn can_begin_drag(&self) -> bool {
        self.allowed
    }

    fn begin_drag(&self, _world_position: Vec2) {
        self.calls.push(self.label, "begin_drag");
    }
}

/// A Bevy app running the pointer plugins against a [`SceneHost`].
///
/// The mouse button is driven directly through `ButtonInput`, so edges are
/// cleared after every update the way the input plugin would.
pub struct TestApp {
    app: App,
}

impl TestApp {
    pub fn new(scene: SceneHost) -> Self {
        Self::with_settings(scene, Settings::default())
    }

    pub fn with_settings(scene: SceneHost, settings: Settings) -> Self {
        let mut app = App::new();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)));
        app.add_plugins(MinimalPlugins);
        app.insert_resource(settings);
        app.add_plugins(pointer_intent::CorePlugin);
        app.insert_resource(InteractionWorld::new(scene));

        app.finish();
        app.cleanup();

        Self { app }
    }

    pub fn app(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn update(&mut self) {
        self.app.update();
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
    }

    pub fn advance_time(&mut self, duration: Duration) {
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(duration));
        self.update();
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)));
    }

    pub fn move_cursor(&mut self, world: Vec2) {
        *self.app.world_mut().resource_mut::<CursorPosition>() = CursorPosition {
            screen: world * 32.0,
            world,
        };
    }

    pub fn press(&mut self) {
        self.press_button(MouseButton::Left);
    }

    pub fn release(&mut self) {
        self.release_button(MouseButton::Left);
    }

    /// Press and release within a single frame.
    pub fn tap(&mut self) {
        let mut buttons = self
            .app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>();
        buttons.press(MouseButton::Left);
        buttons.release(MouseButton::Left);
        self.update();
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(button);
        self.update();
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(button);
        self.update();
    }

    pub fn set_frame_time(&mut self, duration: Duration) {
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(duration));
    }

    pub fn hold_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.app
            .world_mut()
            .resource_mut::<Messages<M>>()
            .drain()
            .collect()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }
}
