//! Continuous aim trigger for a held pointer button.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info};

use super::capability::{AimCapability, AimInteraction, AimPhase, TargetId};
use super::context::InteractionContext;

struct AimSession {
    handler: Arc<dyn AimCapability>,
    item: TargetId,
    elapsed: Duration,
}

/// `Idle` until a press-time scan locks a handler in, `Armed` until release
/// or until the held item changes.
pub struct AimTriggerScheduler {
    interval: Duration,
    session: Option<AimSession>,
}

impl AimTriggerScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            session: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.session.is_some()
    }

    pub fn armed_item(&self) -> Option<TargetId> {
        self.session.as_ref().map(|session| session.item)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.session.as_ref().map(|session| session.elapsed)
    }

    /// Tries the held item's aim handlers in order; the first to stop
    /// processing is locked in.
    pub fn press(&mut self, ctx: &InteractionContext, world_position: Vec2) -> bool {
        self.session = None;

        let Some(item) = ctx.hands.held_item() else {
            return false;
        };
        let Some(capabilities) = ctx.entities.capabilities(item) else {
            return false;
        };

        let interaction = AimInteraction {
            hand_item: item,
            world_position,
            phase: AimPhase::Press,
        };
        let Some(handler) = capabilities
            .aim
            .iter()
            .find(|handler| handler.aim(&interaction).stop_processing)
        else {
            return false;
        };

        info!(item = item.0, "aim armed");
        self.session = Some(AimSession {
            handler: Arc::clone(handler),
            item,
            elapsed: Duration::ZERO,
        });
        true
    }

    /// Advances the armed session by one frame. Reports handled for as long
    /// as a session is armed, whatever the handler answered.
    pub fn hold_tick(&mut self, delta: Duration, world_position: Vec2) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        session.elapsed += delta;
        if session.elapsed >= self.interval {
            let result = session.handler.aim(&AimInteraction {
                hand_item: session.item,
                world_position,
                phase: AimPhase::Hold,
            });
            // On failure the timer stays past the interval, so the next tick retries.
            if result.stop_processing {
                session.elapsed = Duration::ZERO;
            } else {
                debug!(item = session.item.0, "aim retrigger refused, retrying next tick");
            }
        }

        true
    }

    /// Clears the session when the hand is empty or holds a different item.
    pub fn sync_hand(&mut self, held: Option<TargetId>) -> bool {
        match self.armed_item() {
            Some(item) if held != Some(item) => {
                debug!(item = item.0, "held item changed, aim cleared");
                self.session = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.session = None;
    }
}
