//! Hit resolution: which entity is under the pointer, in priority order.

use std::collections::HashSet;

use glam::Vec2;
use tracing::debug;

use super::capability::TargetId;
use super::context::InteractionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    pub fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

impl From<u32> for LayerMask {
    fn from(bits: u32) -> Self {
        LayerMask(bits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    Sprite,
    Tilemap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    pub layer_name: String,
    pub sorting_layer_value: i32,
    pub sorting_order: i32,
    pub kind: RendererKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    pub target: TargetId,
    pub renderer: Renderable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionCandidate {
    pub target: TargetId,
    pub render_layer: String,
    pub sorting_layer_value: i32,
    pub sorting_order: i32,
    pub is_tilemap: bool,
}

/// Ordering key for candidates; larger sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetPriorityKey {
    /// 1 for sprites, 0 for tilemaps: sprites always sit on top of tiles.
    pub kind_rank: u8,
    pub sorting_layer_value: i32,
    pub sorting_order: i32,
}

impl InteractionCandidate {
    fn new(target: TargetId, renderer: Renderable) -> Self {
        Self {
            target,
            is_tilemap: renderer.kind == RendererKind::Tilemap,
            render_layer: renderer.layer_name,
            sorting_layer_value: renderer.sorting_layer_value,
            sorting_order: renderer.sorting_order,
        }
    }

    pub fn priority_key(&self) -> TargetPriorityKey {
        TargetPriorityKey {
            kind_rank: if self.is_tilemap { 0 } else { 1 },
            sorting_layer_value: self.sorting_layer_value,
            sorting_order: self.sorting_order,
        }
    }
}

/// Pointer position in both spaces for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerQuery {
    pub screen: Vec2,
    pub world: Vec2,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// At least one raw hit existed, whether or not anything responded.
    pub hit_any: bool,
    pub target: Option<InteractionCandidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateScan {
    pub hit_any: bool,
    /// Sorted by priority, one entry per target, occlusion layer removed.
    pub candidates: Vec<InteractionCandidate>,
}

#[derive(Debug, Clone)]
pub struct HitResolver {
    occlusion_layer: String,
    max_distance: f32,
}

impl HitResolver {
    pub fn new(occlusion_layer: impl Into<String>, max_distance: f32) -> Self {
        Self {
            occlusion_layer: occlusion_layer.into(),
            max_distance,
        }
    }

    pub fn candidates(
        &self,
        ctx: &InteractionContext,
        query: &PointerQuery,
        layers: LayerMask,
    ) -> CandidateScan {
        if !ctx.is_screen_point_visible(query.screen) {
            debug!(x = query.screen.x, y = query.screen.y, "pointer outside visible area");
            return CandidateScan::default();
        }

        let hits = ctx.rays.cast_all(query.world, self.max_distance, layers);
        let hit_any = !hits.is_empty();

        let mut candidates: Vec<InteractionCandidate> = hits
            .iter()
            .filter_map(|hit| {
                let renderer = match hit.renderer.kind {
                    RendererKind::Tilemap => hit.renderer.clone(),
                    RendererKind::Sprite => ctx.pixels.test_opacity(hit, query.world)?,
                };
                Some(InteractionCandidate::new(hit.target, renderer))
            })
            .filter(|candidate| candidate.render_layer != self.occlusion_layer)
            .collect();

        candidates.sort_by(|a, b| {
            b.priority_key()
                .cmp(&a.priority_key())
                .then(a.target.cmp(&b.target))
        });

        let mut seen = HashSet::new();
        candidates.retain(|candidate| seen.insert(candidate.target));

        CandidateScan {
            hit_any,
            candidates,
        }
    }

    /// Top candidate under the pointer, without interacting.
    pub fn resolve(
        &self,
        ctx: &InteractionContext,
        query: &PointerQuery,
        layers: LayerMask,
    ) -> Resolution {
        let scan = self.candidates(ctx, query, layers);
        Resolution {
            hit_any: scan.hit_any,
            target: scan.candidates.into_iter().next(),
        }
    }

    /// Walks candidates in priority order until `interact` reports one as handled.
    pub fn resolve_interacting<F>(
        &self,
        ctx: &InteractionContext,
        query: &PointerQuery,
        layers: LayerMask,
        mut interact: F,
    ) -> Resolution
    where
        F: FnMut(&InteractionCandidate) -> bool,
    {
        let scan = self.candidates(ctx, query, layers);
        let target = scan.candidates.into_iter().find(|candidate| {
            let handled = interact(candidate);
            debug!(entity = candidate.target.0, handled, "interaction attempt");
            handled
        });

        Resolution {
            hit_any: scan.hit_any,
            target,
        }
    }
}
