//! Capabilities an entity (or a held item) can expose to the pointer.
//!
//! Every entity declares its capabilities up front in a [`CapabilitySet`];
//! the dispatcher queries that set once per attempt instead of scanning for
//! implementations.

use std::sync::Arc;

use bevy::prelude::Entity;
use glam::Vec2;

/// Stable identity of anything the pointer can target or the hand can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u64);

impl From<Entity> for TargetId {
    fn from(entity: Entity) -> Self {
        TargetId(entity.to_bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Click,
    Drag,
}

impl Gesture {
    pub fn is_drag(self) -> bool {
        self == Gesture::Drag
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub stop_processing: bool,
}

impl InteractionResult {
    pub const IGNORED: Self = Self {
        handled: false,
        stop_processing: false,
    };

    pub const HANDLED: Self = Self {
        handled: true,
        stop_processing: true,
    };

    pub fn handled(handled: bool) -> Self {
        Self {
            handled,
            stop_processing: handled,
        }
    }
}

/// One attempt to interact, as seen by a capability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// Entity under the pointer; `None` when the hand item acts on empty space.
    pub target: Option<TargetId>,
    pub hand_item: Option<TargetId>,
    pub world_position: Vec2,
    pub gesture: Gesture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimPhase {
    Press,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimInteraction {
    pub hand_item: TargetId,
    pub world_position: Vec2,
    pub phase: AimPhase,
}

pub trait MeleeCapability: Send + Sync {
    fn melee(&self, interaction: &Interaction) -> InteractionResult;
}

/// Click-or-drag interaction. Backs generic apply, player links, legacy
/// triggers and the held item's own interaction.
pub trait ApplyCapability: Send + Sync {
    fn click(&self, interaction: &Interaction) -> InteractionResult;

    fn drag(&self, _interaction: &Interaction) -> InteractionResult {
        InteractionResult::IGNORED
    }

    fn apply(&self, interaction: &Interaction) -> InteractionResult {
        match interaction.gesture {
            Gesture::Click => self.click(interaction),
            Gesture::Drag => self.drag(interaction),
        }
    }
}

pub trait EnclosureCapability: Send + Sync {
    fn interact(&self, interaction: &Interaction) -> InteractionResult;
}

pub trait AimCapability: Send + Sync {
    fn aim(&self, interaction: &AimInteraction) -> InteractionResult;
}

pub trait DragCapability: Send + Sync {
    fn can_begin_drag(&self) -> bool;
    fn begin_drag(&self, world_position: Vec2);
}

pub trait HoverObserver: Send + Sync {
    fn hover_start(&self) {}
    fn hover_tick(&self) {}
    fn hover_end(&self) {}
}

#[derive(Clone, Default)]
pub struct CapabilitySet {
    pub melee: Option<Arc<dyn MeleeCapability>>,
    pub apply: Option<Arc<dyn ApplyCapability>>,
    pub player_link: Option<Arc<dyn ApplyCapability>>,
    pub enclosure: Option<Arc<dyn EnclosureCapability>>,
    /// Trigger for targets that have not moved to the capability model yet.
    pub legacy: Option<Arc<dyn ApplyCapability>>,
    /// Aim handlers in declaration order.
    pub aim: Vec<Arc<dyn AimCapability>>,
    pub drag: Option<Arc<dyn DragCapability>>,
    pub hover: Option<Arc<dyn HoverObserver>>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_melee(mut self, melee: impl MeleeCapability + 'static) -> Self {
        self.melee = Some(Arc::new(melee));
        self
    }

    pub fn with_apply(mut self, apply: impl ApplyCapability + 'static) -> Self {
        self.apply = Some(Arc::new(apply));
        self
    }

    pub fn with_player_link(mut self, link: impl ApplyCapability + 'static) -> Self {
        self.player_link = Some(Arc::new(link));
        self
    }

    pub fn with_enclosure(mut self, enclosure: impl EnclosureCapability + 'static) -> Self {
        self.enclosure = Some(Arc::new(enclosure));
        self
    }

    pub fn with_legacy(mut self, legacy: impl ApplyCapability + 'static) -> Self {
        self.legacy = Some(Arc::new(legacy));
        self
    }

    pub fn with_aim(mut self, aim: impl AimCapability + 'static) -> Self {
        self.aim.push(Arc::new(aim));
        self
    }

    pub fn with_drag(mut self, drag: impl DragCapability + 'static) -> Self {
        self.drag = Some(Arc::new(drag));
        self
    }

    pub fn with_hover(mut self, hover: impl HoverObserver + 'static) -> Self {
        self.hover = Some(Arc::new(hover));
        self
    }
}
