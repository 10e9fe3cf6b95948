//! The per-frame pointer state machine.
//!
//! One [`GestureClassifier::tick`] per rendered frame turns the sampled
//! button state into at most one of press, hold, release or idle handling.
//! A press walks a fixed fallback order and stops at the first step that
//! responds:
//!
//! 1. inspect (modifier held)
//! 2. throw (throw mode armed)
//! 3. the click chain over everything under the pointer, then the held item
//! 4. legacy triggers
//! 5. the held item's aim handlers
//!
//! Any handled press locks the [`DragGate`] until the button comes back up.

use std::time::Duration;

use bevy::prelude::Resource;
use game_input::PointerFrameState;
use game_types::{Direction, InteractionSettings};
use glam::Vec2;
use tracing::{debug, info, warn};

use super::aim::AimTriggerScheduler;
use super::capability::{Gesture, TargetId};
use super::context::InteractionContext;
use super::dispatch::{DispatchOutcome, InteractionDispatcher};
use super::drag::DragGate;
use super::hit::{HitResolver, LayerMask, PointerQuery};
use super::hover::HoverTracker;
use super::notice::{InspectEntry, InteractionNotice, InteractionOutbox};

const DEFAULT_AIM_INTERVAL: Duration = Duration::from_millis(100);

/// Sampled pointer input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    pub state: PointerFrameState,
    pub query: PointerQuery,
    /// Time since the previous frame.
    pub delta: Duration,
    pub inspect_modifier: bool,
    /// The button also came up this frame. Set alongside a press for taps
    /// shorter than one frame, which `state` reports as the press.
    pub released_this_frame: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressStep {
    Inspect,
    Throw,
    Apply(DispatchOutcome),
    Legacy(TargetId),
    Aim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldStep {
    Aim,
    Interact(DispatchOutcome),
    DragStarted(TargetId),
}

/// Which branch ran this frame and what, if anything, handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A blocking modal is up; only hover ran.
    Suspended,
    Idle,
    /// Press or hold by a spectator: reorientation only.
    Spectating,
    Pressed(Option<PressStep>),
    Held(Option<HoldStep>),
    Released { drag_ended: Option<TargetId> },
}

#[derive(Resource)]
pub struct GestureClassifier {
    resolver: HitResolver,
    dispatcher: InteractionDispatcher,
    aim: AimTriggerScheduler,
    drag: DragGate,
    hover: HoverTracker,
    layers: LayerMask,
}

impl GestureClassifier {
    pub fn new(
        resolver: HitResolver,
        dispatcher: InteractionDispatcher,
        aim_interval: Duration,
        layers: LayerMask,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
            aim: AimTriggerScheduler::new(aim_interval),
            drag: DragGate::new(),
            hover: HoverTracker::new(),
            layers,
        }
    }

    pub fn from_settings(settings: &InteractionSettings) -> Self {
        let aim_interval = Duration::try_from_secs_f32(settings.aim_trigger_interval_secs)
            .unwrap_or_else(|err| {
                warn!(
                    secs = settings.aim_trigger_interval_secs,
                    "Invalid aim trigger interval, using default: {}", err
                );
                DEFAULT_AIM_INTERVAL
            });

        Self::new(
            HitResolver::new(settings.occlusion_layer.clone(), settings.max_ray_distance),
            InteractionDispatcher::new(settings.player_layer.clone()),
            aim_interval,
            LayerMask(settings.interaction_layers),
        )
    }

    pub fn aim(&self) -> &AimTriggerScheduler {
        &self.aim
    }

    pub fn drag_gate(&self) -> &DragGate {
        &self.drag
    }

    pub fn hovered(&self) -> Option<TargetId> {
        self.hover.hovered()
    }

    pub fn tick(
        &mut self,
        ctx: &InteractionContext,
        frame: &PointerFrame,
        outbox: &mut InteractionOutbox,
    ) -> GestureOutcome {
        self.aim.sync_hand(ctx.hands.held_item());

        if ctx.ui.pointer_suspended {
            self.update_hover(ctx, &frame.query, outbox);
            return GestureOutcome::Suspended;
        }

        match frame.state {
            PointerFrameState::ReleasedThisFrame => self.release(frame, outbox),
            PointerFrameState::PressedThisFrame => {
                self.update_facing(ctx, frame.query.world, outbox);
                let outcome = if ctx.actor.spectator {
                    GestureOutcome::Spectating
                } else {
                    let step = self.press(ctx, frame, outbox);
                    if step.is_some() {
                        self.drag.lock();
                    }
                    GestureOutcome::Pressed(step)
                };

                if frame.released_this_frame {
                    self.release(frame, outbox);
                }
                outcome
            }
            PointerFrameState::Held => {
                self.update_facing(ctx, frame.query.world, outbox);
                if ctx.actor.spectator {
                    return GestureOutcome::Spectating;
                }

                GestureOutcome::Held(self.hold(ctx, frame, outbox))
            }
            PointerFrameState::Idle => {
                // A release can go unseen, e.g. while the pointer was suspended.
                if self.aim.is_armed() || !self.drag.allows_new_drag() {
                    debug!("button up with a gesture still open, closing it");
                    self.release(frame, outbox);
                }
                self.update_hover(ctx, &frame.query, outbox);
                GestureOutcome::Idle
            }
        }
    }

    fn press(
        &mut self,
        ctx: &InteractionContext,
        frame: &PointerFrame,
        outbox: &mut InteractionOutbox,
    ) -> Option<PressStep> {
        let query = &frame.query;

        if frame.inspect_modifier {
            let entries: Vec<InspectEntry> = self
                .resolver
                .candidates(ctx, query, self.layers)
                .candidates
                .into_iter()
                .map(|candidate| InspectEntry {
                    name: ctx.entities.display_name(candidate.target),
                    candidate,
                })
                .collect();
            debug!(count = entries.len(), "inspect");
            outbox.send(InteractionNotice::InfoPanel {
                position: query.world,
                entries,
            });
            return Some(PressStep::Inspect);
        }

        if ctx.ui.throw_mode && ctx.hands.slot_permits_placement() {
            info!(x = query.world.x, y = query.world.y, "throw requested");
            outbox.send(InteractionNotice::ThrowRequested {
                target_position: query.world,
            });
            return Some(PressStep::Throw);
        }

        let outcome = self
            .dispatcher
            .dispatch(ctx, &self.resolver, query, self.layers, Gesture::Click);
        if outcome.handled() {
            info!(?outcome, "click handled");
            return Some(PressStep::Apply(outcome));
        }

        let legacy = self
            .resolver
            .resolve_interacting(ctx, query, self.layers, |candidate| {
                self.dispatcher
                    .dispatch_legacy(ctx, candidate.target, query.world)
            });
        if let Some(candidate) = legacy.target {
            info!(entity = candidate.target.0, "legacy trigger handled");
            return Some(PressStep::Legacy(candidate.target));
        }

        if self.aim.press(ctx, query.world) {
            return Some(PressStep::Aim);
        }

        None
    }

    fn hold(
        &mut self,
        ctx: &InteractionContext,
        frame: &PointerFrame,
        outbox: &mut InteractionOutbox,
    ) -> Option<HoldStep> {
        let query = &frame.query;

        if self.aim.hold_tick(frame.delta, query.world) {
            return Some(HoldStep::Aim);
        }

        let outcome = self
            .dispatcher
            .dispatch(ctx, &self.resolver, query, self.layers, Gesture::Drag);
        if outcome.handled() {
            return Some(HoldStep::Interact(outcome));
        }

        if !self.drag.allows_new_drag() {
            return None;
        }

        let scan = self.resolver.candidates(ctx, query, self.layers);
        let (target, drag) = scan.candidates.iter().find_map(|candidate| {
            let drag = ctx
                .entities
                .capabilities(candidate.target)?
                .drag
                .as_ref()?;
            drag.can_begin_drag().then_some((candidate.target, drag))
        })?;

        drag.begin_drag(query.world);
        self.drag.begin(target);
        info!(entity = target.0, "drag started");
        outbox.send(InteractionNotice::DragStarted { target });
        Some(HoldStep::DragStarted(target))
    }

    fn release(&mut self, frame: &PointerFrame, outbox: &mut InteractionOutbox) -> GestureOutcome {
        let drag_ended = self.drag.release();
        if let Some(target) = drag_ended {
            debug!(entity = target.0, "drag ended");
            outbox.send(InteractionNotice::DragEnded {
                target,
                world_position: frame.query.world,
            });
        }
        self.aim.clear();
        GestureOutcome::Released { drag_ended }
    }

    fn update_hover(
        &mut self,
        ctx: &InteractionContext,
        query: &PointerQuery,
        outbox: &mut InteractionOutbox,
    ) {
        let current = self
            .resolver
            .resolve(ctx, query, self.layers)
            .target
            .map(|candidate| candidate.target);
        self.hover.update(ctx, current, outbox);
    }

    fn update_facing(
        &self,
        ctx: &InteractionContext,
        world: Vec2,
        outbox: &mut InteractionOutbox,
    ) -> Option<Direction> {
        if ctx.ui.pointer_over_ui || !ctx.actor.movement_allowed || ctx.actor.restrained {
            return None;
        }

        let offset = world - ctx.actor.position;
        let direction = Direction::toward(offset.x, offset.y)?;
        if direction == ctx.actor.facing {
            return None;
        }

        outbox.send(InteractionNotice::FacingChanged { direction });
        Some(direction)
    }
}
