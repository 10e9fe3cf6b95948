use bevy::prelude::Message;
use game_types::Direction;
use glam::Vec2;

use crate::interaction::{InspectEntry, TargetId};

// === Interaction Events ===

/// Emitted when the pointer asks the local actor to turn
#[derive(Debug, Clone, Copy, PartialEq, Message)]
pub struct FacingChangeRequest {
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Start,
    Tick,
    End,
}

/// Emitted for every hover transition and once per idle frame for the hovered target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
pub struct PointerHoverEvent {
    pub target: TargetId,
    pub phase: HoverPhase,
}

/// Emitted when the hovered target changes; `None` hides the tooltip
#[derive(Debug, Clone, PartialEq, Eq, Message)]
pub struct TooltipUpdate {
    pub text: Option<String>,
}

/// Emitted when the inspect modifier is held on press
#[derive(Debug, Clone, PartialEq, Message)]
pub struct InfoPanelRequest {
    pub position: Vec2,
    pub entries: Vec<InspectEntry>,
}

/// Emitted when throw mode is armed and the pointer is pressed
#[derive(Debug, Clone, Copy, PartialEq, Message)]
pub struct ThrowRequest {
    pub target_position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Message)]
pub enum PointerDragEvent {
    Started { target: TargetId },
    Ended { target: TargetId, world_position: Vec2 },
}
