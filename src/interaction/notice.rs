use game_types::Direction;
use glam::Vec2;

use super::capability::TargetId;
use super::hit::InteractionCandidate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectEntry {
    pub candidate: InteractionCandidate,
    pub name: Option<String>,
}

/// Side effects of a tick, for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionNotice {
    FacingChanged { direction: Direction },
    HoverStarted(TargetId),
    HoverEnded(TargetId),
    HoverTick(TargetId),
    /// `None` clears the tooltip.
    TooltipChanged(Option<String>),
    InfoPanel {
        position: Vec2,
        entries: Vec<InspectEntry>,
    },
    ThrowRequested { target_position: Vec2 },
    DragStarted { target: TargetId },
    DragEnded { target: TargetId, world_position: Vec2 },
}

#[derive(Debug, Default)]
pub struct InteractionOutbox {
    notices: Vec<InteractionNotice>,
}

impl InteractionOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, notice: InteractionNotice) {
        self.notices.push(notice);
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InteractionNotice> + '_ {
        self.notices.drain(..)
    }
}
