use tracing::trace;

use super::capability::{HoverObserver, TargetId};
use super::context::InteractionContext;
use super::notice::{InteractionNotice, InteractionOutbox};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverTracker {
    last: Option<TargetId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<TargetId> {
        self.last
    }

    pub fn update(
        &mut self,
        ctx: &InteractionContext,
        current: Option<TargetId>,
        outbox: &mut InteractionOutbox,
    ) {
        if current != self.last {
            if let Some(previous) = self.last {
                observe(ctx, previous, |observer| observer.hover_end());
                outbox.send(InteractionNotice::HoverEnded(previous));
            }
            if let Some(next) = current {
                observe(ctx, next, |observer| observer.hover_start());
                outbox.send(InteractionNotice::HoverStarted(next));
            }
            outbox.send(InteractionNotice::TooltipChanged(
                current.and_then(|target| ctx.entities.display_name(target)),
            ));
            trace!(from = ?self.last, to = ?current, "hover changed");
            self.last = current;
        }

        if let Some(target) = current {
            observe(ctx, target, |observer| observer.hover_tick());
            outbox.send(InteractionNotice::HoverTick(target));
        }
    }
}

fn observe(
    ctx: &InteractionContext,
    target: TargetId,
    call: impl FnOnce(&dyn HoverObserver),
) {
    if let Some(observer) = ctx
        .entities
        .capabilities(target)
        .and_then(|capabilities| capabilities.hover.as_deref())
    {
        call(observer);
    }
}
