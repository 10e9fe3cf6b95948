//! The ordered handler chain run against a pointer target.

use glam::Vec2;
use tracing::debug;

use super::capability::{Gesture, Interaction, TargetId};
use super::context::InteractionContext;
use super::hit::{HitResolver, LayerMask, PointerQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A target under the pointer handled the gesture.
    Target(TargetId),
    /// Nothing under the pointer responded; the held item did.
    Hand,
    Unhandled { hit_any: bool },
}

impl DispatchOutcome {
    pub fn handled(&self) -> bool {
        !matches!(self, DispatchOutcome::Unhandled { .. })
    }
}

#[derive(Debug, Clone)]
pub struct InteractionDispatcher {
    player_layer: String,
}

impl InteractionDispatcher {
    pub fn new(player_layer: impl Into<String>) -> Self {
        Self {
            player_layer: player_layer.into(),
        }
    }

    /// Runs the chain over every candidate under the pointer, then falls back
    /// to the held item once if nothing responded.
    pub fn dispatch(
        &self,
        ctx: &InteractionContext,
        resolver: &HitResolver,
        query: &PointerQuery,
        layers: LayerMask,
        gesture: Gesture,
    ) -> DispatchOutcome {
        let resolution = resolver.resolve_interacting(ctx, query, layers, |candidate| {
            self.dispatch_target(ctx, candidate.target, query.world, gesture)
        });

        if let Some(candidate) = resolution.target {
            return DispatchOutcome::Target(candidate.target);
        }

        if self.interact_hand(ctx, query.world, gesture) {
            return DispatchOutcome::Hand;
        }

        DispatchOutcome::Unhandled {
            hit_any: resolution.hit_any,
        }
    }

    pub fn dispatch_target(
        &self,
        ctx: &InteractionContext,
        target: TargetId,
        world_position: Vec2,
        gesture: Gesture,
    ) -> bool {
        let Some(capabilities) = ctx.entities.capabilities(target) else {
            return false;
        };

        let interaction = Interaction {
            target: Some(target),
            hand_item: ctx.hands.held_item(),
            world_position,
            gesture,
        };
        let interactable = ctx.entities.is_interactable(target);

        if !(ctx.reach.is_in_reach(world_position, false) || ctx.actor.hidden) {
            // Objects registered on one tile can protrude visually past the
            // reach radius, so they still get their apply attempt.
            return interactable
                && capabilities
                    .apply
                    .as_ref()
                    .is_some_and(|apply| apply.apply(&interaction).handled);
        }

        if !gesture.is_drag() {
            if let Some(melee) = &capabilities.melee {
                if melee.melee(&interaction).handled {
                    debug!(entity = target.0, "melee handled");
                    return true;
                }
            }
        }

        if let Some(apply) = &capabilities.apply {
            if interactable && apply.apply(&interaction).handled {
                debug!(entity = target.0, ?gesture, "apply handled");
                return true;
            }

            // Player entities carry a second capability for player-to-player interactions.
            if ctx.entities.entity_layer(target) == Some(self.player_layer.as_str()) {
                if let Some(link) = &capabilities.player_link {
                    if link.apply(&interaction).handled {
                        debug!(entity = target.0, ?gesture, "player link handled");
                        return true;
                    }
                }
            }
        }

        if !gesture.is_drag() && ctx.actor.camera_follow == Some(target) {
            if let Some(enclosure) = &capabilities.enclosure {
                if enclosure.interact(&interaction).handled {
                    debug!(entity = target.0, "enclosure handled");
                    return true;
                }
            }
        }

        false
    }

    /// Click through the legacy trigger only, for targets not yet on capability sets.
    pub fn dispatch_legacy(
        &self,
        ctx: &InteractionContext,
        target: TargetId,
        world_position: Vec2,
    ) -> bool {
        if !(ctx.reach.is_in_reach(world_position, false) || ctx.actor.hidden) {
            return false;
        }
        if !ctx.entities.is_interactable(target) {
            return false;
        }
        let Some(legacy) = ctx
            .entities
            .capabilities(target)
            .and_then(|capabilities| capabilities.legacy.as_ref())
        else {
            return false;
        };

        let interaction = Interaction {
            target: Some(target),
            hand_item: ctx.hands.held_item(),
            world_position,
            gesture: Gesture::Click,
        };
        legacy.click(&interaction).handled
    }

    pub fn interact_hand(
        &self,
        ctx: &InteractionContext,
        world_position: Vec2,
        gesture: Gesture,
    ) -> bool {
        let Some(item) = ctx.hands.held_item() else {
            return false;
        };
        if !ctx.actor.interactable {
            return false;
        }
        let Some(apply) = ctx
            .entities
            .capabilities(item)
            .and_then(|capabilities| capabilities.apply.as_ref())
        else {
            return false;
        };

        let handled = apply
            .apply(&Interaction {
                target: None,
                hand_item: Some(item),
                world_position,
                gesture,
            })
            .handled;
        debug!(item = item.0, ?gesture, handled, "hand interaction");
        handled
    }
}
