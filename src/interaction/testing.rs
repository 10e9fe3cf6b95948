//! Scriptable collaborators for unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use glam::Vec2;

use super::capability::*;
use super::context::*;
use super::hit::{LayerMask, RawHit, Renderable, RendererKind};
use super::pixel_gate::PixelPrecisionGate;

pub(crate) fn sprite_hit(id: u64, layer: &str, sorting_layer: i32, order: i32) -> RawHit {
    RawHit {
        target: TargetId(id),
        renderer: Renderable {
            layer_name: layer.to_string(),
            sorting_layer_value: sorting_layer,
            sorting_order: order,
            kind: RendererKind::Sprite,
        },
    }
}

pub(crate) fn tile_hit(id: u64, layer: &str, sorting_layer: i32, order: i32) -> RawHit {
    let mut hit = sprite_hit(id, layer, sorting_layer, order);
    hit.renderer.kind = RendererKind::Tilemap;
    hit
}

#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, entry: String) {
        if let Ok(mut log) = self.0.lock() {
            log.push(entry);
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

/// Records every call as `"<label>:<call>"` and answers with a fixed result.
pub(crate) struct Recorder {
    pub log: CallLog,
    pub label: &'static str,
    pub result: InteractionResult,
}

impl Recorder {
    pub fn new(log: &CallLog, label: &'static str, handled: bool) -> Self {
        Self {
            log: log.clone(),
            label,
            result: InteractionResult::handled(handled),
        }
    }

    fn note(&self, call: &str) {
        self.log.record(format!("{}:{}", self.label, call));
    }
}

impl MeleeCapability for Recorder {
    fn melee(&self, _interaction: &Interaction) -> InteractionResult {
        self.note("melee");
        self.result
    }
}

impl ApplyCapability for Recorder {
    fn click(&self, _interaction: &Interaction) -> InteractionResult {
        self.note("click");
        self.result
    }

    fn drag(&self, _interaction: &Interaction) -> InteractionResult {
        self.note("drag");
        self.result
    }
}

impl EnclosureCapability for Recorder {
    fn interact(&self, _interaction: &Interaction) -> InteractionResult {
        self.note("enclosure");
        self.result
    }
}

impl HoverObserver for Recorder {
    fn hover_start(&self) {
        self.note("hover_start");
    }

    fn hover_tick(&self) {
        self.note("hover_tick");
    }

    fn hover_end(&self) {
        self.note("hover_end");
    }
}

/// Aim handler that pops scripted results, then repeats `fallback`.
pub(crate) struct ScriptedAim {
    pub log: CallLog,
    pub label: &'static str,
    pub script: Mutex<VecDeque<bool>>,
    pub fallback: bool,
}

impl ScriptedAim {
    pub fn always(log: &CallLog, label: &'static str, stop: bool) -> Self {
        Self::scripted(log, label, &[], stop)
    }

    pub fn scripted(log: &CallLog, label: &'static str, script: &[bool], fallback: bool) -> Self {
        Self {
            log: log.clone(),
            label,
            script: Mutex::new(script.iter().copied().collect()),
            fallback,
        }
    }
}

impl AimCapability for ScriptedAim {
    fn aim(&self, interaction: &AimInteraction) -> InteractionResult {
        let phase = match interaction.phase {
            AimPhase::Press => "press",
            AimPhase::Hold => "hold",
        };
        self.log.record(format!("{}:{}", self.label, phase));
        let stop = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(self.fallback);
        InteractionResult::handled(stop)
    }
}

pub(crate) struct DragRecorder {
    pub log: CallLog,
    pub label: &'static str,
    pub allowed: bool,
}

impl DragCapability for DragRecorder {
    fn can_begin_drag(&self) -> bool {
        self.allowed
    }

    fn begin_drag(&self, _world_position: Vec2) {
        self.log.record(format!("{}:begin_drag", self.label));
    }
}

pub(crate) struct TestWorld {
    pub hits: Vec<RawHit>,
    pub transparent: HashSet<TargetId>,
    pub visible: Option<bool>,
    pub in_reach: bool,
    pub held: Option<TargetId>,
    pub permits_placement: bool,
    pub capabilities: HashMap<TargetId, CapabilitySet>,
    pub layers: HashMap<TargetId, String>,
    pub names: HashMap<TargetId, String>,
    pub not_interactable: HashSet<TargetId>,
    pub actor: ActorState,
    pub ui: UiState,
    pub log: CallLog,
    casts: AtomicUsize,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            hits: Vec::new(),
            transparent: HashSet::new(),
            visible: None,
            in_reach: true,
            held: None,
            permits_placement: true,
            capabilities: HashMap::new(),
            layers: HashMap::new(),
            names: HashMap::new(),
            not_interactable: HashSet::new(),
            actor: ActorState::default(),
            ui: UiState::default(),
            log: CallLog::default(),
            casts: AtomicUsize::new(0),
        }
    }

    pub fn context(&self) -> InteractionContext<'_> {
        InteractionContext::from_host(self)
    }

    pub fn insert(&mut self, id: u64, capabilities: CapabilitySet) {
        self.capabilities.insert(TargetId(id), capabilities);
    }

    pub fn ray_casts(&self) -> usize {
        self.casts.load(Ordering::Relaxed)
    }
}

impl RayCaster for TestWorld {
    fn cast_all(&self, _point: Vec2, _max_distance: f32, _layers: LayerMask) -> Vec<RawHit> {
        self.casts.fetch_add(1, Ordering::Relaxed);
        self.hits.clone()
    }
}

impl PixelPrecisionGate for TestWorld {
    fn test_opacity(&self, hit: &RawHit, _point: Vec2) -> Option<Renderable> {
        (!self.transparent.contains(&hit.target)).then(|| hit.renderer.clone())
    }
}

impl VisibilityOracle for TestWorld {
    fn is_visible(&self, _screen_point: Vec2) -> bool {
        self.visible.unwrap_or(true)
    }
}

impl ReachOracle for TestWorld {
    fn is_in_reach(&self, _position: Vec2, _ignore_walls: bool) -> bool {
        self.in_reach
    }
}

impl HandSlotProvider for TestWorld {
    fn held_item(&self) -> Option<TargetId> {
        self.held
    }

    fn slot_permits_placement(&self) -> bool {
        self.held.is_some() && self.permits_placement
    }
}

impl EntityDirectory for TestWorld {
    fn capabilities(&self, target: TargetId) -> Option<&CapabilitySet> {
        self.capabilities.get(&target)
    }

    fn is_interactable(&self, target: TargetId) -> bool {
        !self.not_interactable.contains(&target)
    }

    fn entity_layer(&self, target: TargetId) -> Option<&str> {
        self.layers.get(&target).map(String::as_str)
    }

    fn display_name(&self, target: TargetId) -> Option<String> {
        self.names.get(&target).cloned()
    }
}

impl InteractionHost for TestWorld {
    fn rays(&self) -> &dyn RayCaster {
        self
    }

    fn pixels(&self) -> &dyn PixelPrecisionGate {
        self
    }

    fn visibility(&self) -> Option<&dyn VisibilityOracle> {
        self.visible.map(|_| self as &dyn VisibilityOracle)
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
