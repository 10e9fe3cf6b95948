//! In-memory [`InteractionHost`] over axis-aligned entities.
//!
//! Good enough to drive the engine without a renderer or physics backend:
//! entities are rectangles in world space, an optional opaque sub-rectangle
//! stands in for sprite pixels, and reach is a plain radius around the actor.

use std::collections::HashMap;

use glam::Vec2;

use crate::interaction::{
    ActorState, CapabilitySet, EntityDirectory, HandSlotProvider, InteractionHost, LayerMask,
    PixelPrecisionGate, RawHit, RayCaster, ReachOracle, Renderable, RendererKind, TargetId,
    UiState, VisibilityOracle,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn centered(center: Vec2, half_size: Vec2) -> Self {
        Self::new(center - half_size, center + half_size)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[derive(Clone)]
pub struct SceneEntity {
    pub id: TargetId,
    pub name: Option<String>,
    pub bounds: Bounds,
    pub renderer: Renderable,
    /// Physics layer matched against the ray's layer mask.
    pub physics_layer: u8,
    pub entity_layer: Option<String>,
    pub interactable: bool,
    /// Opaque part of a sprite; `None` means the whole rectangle is opaque.
    pub opaque: Option<Bounds>,
    pub capabilities: CapabilitySet,
}

impl SceneEntity {
    pub fn sprite(id: u64, layer: &str, bounds: Bounds) -> Self {
        Self {
            id: TargetId(id),
            name: None,
            bounds,
            renderer: Renderable {
                layer_name: layer.to_string(),
                sorting_layer_value: 0,
                sorting_order: 0,
                kind: RendererKind::Sprite,
            },
            physics_layer: 0,
            entity_layer: None,
            interactable: true,
            opaque: None,
            capabilities: CapabilitySet::default(),
        }
    }

    pub fn tilemap(id: u64, layer: &str, bounds: Bounds) -> Self {
        let mut entity = Self::sprite(id, layer, bounds);
        entity.renderer.kind = RendererKind::Tilemap;
        entity
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn sorted(mut self, sorting_layer_value: i32, sorting_order: i32) -> Self {
        self.renderer.sorting_layer_value = sorting_layer_value;
        self.renderer.sorting_order = sorting_order;
        self
    }

    pub fn on_physics_layer(mut self, layer: u8) -> Self {
        self.physics_layer = layer;
        self
    }

    pub fn on_entity_layer(mut self, layer: &str) -> Self {
        self.entity_layer = Some(layer.to_string());
        self
    }

    pub fn not_interactable(mut self) -> Self {
        self.interactable = false;
        self
    }

    pub fn with_opaque_area(mut self, opaque: Bounds) -> Self {
        self.opaque = Some(opaque);
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }
}

pub struct SceneHost {
    entities: Vec<SceneEntity>,
    items: HashMap<TargetId, CapabilitySet>,
    pub held: Option<TargetId>,
    pub slot_permits_placement: bool,
    pub reach_radius: f32,
    /// Screen-space area the actor can see; `None` disables the visibility check.
    pub visible_screen: Option<Bounds>,
    pub actor: ActorState,
    pub ui: UiState,
}

impl Default for SceneHost {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            items: HashMap::new(),
            held: None,
            slot_permits_placement: true,
            reach_radius: 1.5,
            visible_screen: None,
            actor: ActorState::default(),
            ui: UiState::default(),
        }
    }
}

impl SceneHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: SceneEntity) -> TargetId {
        let id = entity.id;
        self.entities.retain(|existing| existing.id != id);
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: TargetId) -> Option<&SceneEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Registers an item that can be held, without placing it in the world.
    pub fn add_item(&mut self, id: u64, capabilities: CapabilitySet) -> TargetId {
        let id = TargetId(id);
        self.items.insert(id, capabilities);
        id
    }

    pub fn hold(&mut self, item: Option<TargetId>) {
        self.held = item;
    }
}

impl RayCaster for SceneHost {
    // A flat scene has no depth, so every hit is within `max_distance`.
    fn cast_all(&self, point: Vec2, _max_distance: f32, layers: LayerMask) -> Vec<RawHit> {
        self.entities
            .iter()
            .filter(|entity| layers.contains(entity.physics_layer) && entity.bounds.contains(point))
            .map(|entity| RawHit {
                target: entity.id,
                renderer: entity.renderer.clone(),
            })
            .collect()
    }
}

impl PixelPrecisionGate for SceneHost {
    fn test_opacity(&self, hit: &RawHit, point: Vec2) -> Option<Renderable> {
        let entity = self.entity(hit.target)?;
        entity
            .opaque
            .is_none_or(|opaque| opaque.contains(point))
            .then(|| hit.renderer.clone())
    }
}

impl VisibilityOracle for SceneHost {
    fn is_visible(&self, screen_point: Vec2) -> bool {
        self.visible_screen
            .is_none_or(|area| area.contains(screen_point))
    }
}

impl ReachOracle for SceneHost {
    fn is_in_reach(&self, position: Vec2, _ignore_walls: bool) -> bool {
        self.actor.position.distance(position) <= self.reach_radius
    }
}

impl HandSlotProvider for SceneHost {
    fn held_item(&self) -> Option<TargetId> {
        self.held
    }

    fn slot_permits_placement(&self) -> bool {
        self.held.is_some() && self.slot_permits_placement
    }
}

impl EntityDirectory for SceneHost {
    fn capabilities(&self, target: TargetId) -> Option<&CapabilitySet> {
        self.entity(target)
            .map(|entity| &entity.capabilities)
            .or_else(|| self.items.get(&target))
    }

    fn is_interactable(&self, target: TargetId) -> bool {
        self.entity(target).is_none_or(|entity| entity.interactable)
    }

    fn entity_layer(&self, target: TargetId) -> Option<&str> {
        self.entity(target)?.entity_layer.as_deref()
    }

    fn display_name(&self, target: TargetId) -> Option<String> {
        self.entity(target)?.name.clone()
    }
}

impl InteractionHost for SceneHost {
    fn rays(&self) -> &dyn RayCaster {
        self
    }

    fn pixels(&self) -> &dyn PixelPrecisionGate {
        self
    }

    fn visibility(&self) -> Option<&dyn VisibilityOracle> {
        self.visible_screen
            .is_some()
            .then_some(self as &dyn VisibilityOracle)
    }

    fn reach(&self) -> &dyn ReachOracle {
        self
    }

    fn hands(&self) -> &dyn HandSlotProvider {
        self
    }

    fn entities(&self) -> &dyn EntityDirectory {
        self
    }

    fn actor(&self) -> ActorState {
        self.actor
    }

    fn ui(&self) -> UiState {
        self.ui
    }
}
