//! Collaborators the engine consumes, and the per-frame context that bundles them.

use game_types::Direction;
use glam::Vec2;

use super::capability::{CapabilitySet, TargetId};
use super::hit::{LayerMask, RawHit};
use super::pixel_gate::{AlwaysOpaque, PixelPrecisionGate};

pub trait RayCaster: Send + Sync {
    /// All hits at `point`. Order is unspecified and one entity may appear
    /// several times (one per sub-collider).
    fn cast_all(&self, point: Vec2, max_distance: f32, layers: LayerMask) -> Vec<RawHit>;
}

pub trait VisibilityOracle: Send + Sync {
    fn is_visible(&self, screen_point: Vec2) -> bool;
}

pub trait ReachOracle: Send + Sync {
    fn is_in_reach(&self, position: Vec2, ignore_walls: bool) -> bool;
}

pub trait HandSlotProvider: Send + Sync {
    fn held_item(&self) -> Option<TargetId>;

    /// Whether the active slot allows its item to be placed or thrown.
    fn slot_permits_placement(&self) -> bool {
        self.held_item().is_some()
    }
}

pub trait EntityDirectory: Send + Sync {
    fn capabilities(&self, target: TargetId) -> Option<&CapabilitySet>;

    fn is_interactable(&self, _target: TargetId) -> bool {
        true
    }

    /// Entity layer the target lives on, compared against the reserved player layer.
    fn entity_layer(&self, _target: TargetId) -> Option<&str> {
        None
    }

    fn display_name(&self, _target: TargetId) -> Option<String> {
        None
    }
}

/// Snapshot of the local actor for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorState {
    pub position: Vec2,
    pub facing: Direction,
    /// Spectators can only reorient.
    pub spectator: bool,
    /// Hidden/phased actors bypass the reach check.
    pub hidden: bool,
    pub interactable: bool,
    pub movement_allowed: bool,
    pub restrained: bool,
    pub camera_follow: Option<TargetId>,
}

impl Default for ActorState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            facing: Direction::Down,
            spectator: false,
            hidden: false,
            interactable: true,
            movement_allowed: true,
            restrained: false,
            camera_follow: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    /// A blocking modal is up; only hover runs.
    pub pointer_suspended: bool,
    pub pointer_over_ui: bool,
    pub throw_mode: bool,
}

/// Everything a game has to provide to drive the pointer engine.
pub trait InteractionHost: Send + Sync {
    fn rays(&self) -> &dyn RayCaster;

    fn pixels(&self) -> &dyn PixelPrecisionGate {
        &AlwaysOpaque
    }

    fn visibility(&self) -> Option<&dyn VisibilityOracle> {
        None
    }

    fn reach(&self) -> &dyn ReachOracle;
    fn hands(&self) -> &dyn HandSlotProvider;
    fn entities(&self) -> &dyn EntityDirectory;
    fn actor(&self) -> ActorState;
    fn ui(&self) -> UiState;
}

/// Collaborators and snapshots for a single tick.
#[derive(Clone, Copy)]
pub struct InteractionContext<'a> {
    pub rays: &'a dyn RayCaster,
    pub pixels: &'a dyn PixelPrecisionGate,
    pub visibility: Option<&'a dyn VisibilityOracle>,
    pub reach: &'a dyn ReachOracle,
    pub hands: &'a dyn HandSlotProvider,
    pub entities: &'a dyn EntityDirectory,
    pub actor: ActorState,
    pub ui: UiState,
}

impl<'a> InteractionContext<'a> {
    pub fn from_host(host: &'a dyn InteractionHost) -> Self {
        Self {
            rays: host.rays(),
            pixels: host.pixels(),
            visibility: host.visibility(),
            reach: host.reach(),
            hands: host.hands(),
            entities: host.entities(),
            actor: host.actor(),
            ui: host.ui(),
        }
    }

    pub fn with_ui(mut self, ui: UiState) -> Self {
        self.ui = ui;
        self
    }

    /// A missing oracle permits everything.
    pub fn is_screen_point_visible(&self, screen_point: Vec2) -> bool {
        self.visibility
            .is_none_or(|oracle| oracle.is_visible(screen_point))
    }
}
