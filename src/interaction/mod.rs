//! Pointer interaction resolution: what is under the cursor, who gets to
//! respond, and how presses, holds and drags play out over time.

mod aim;
mod capability;
mod context;
mod dispatch;
mod drag;
mod gesture;
mod hit;
mod hover;
mod notice;
mod pixel_gate;

#[cfg(test)]
mod testing;

pub use aim::AimTriggerScheduler;
pub use capability::{
    AimCapability, AimInteraction, AimPhase, ApplyCapability, CapabilitySet, DragCapability,
    EnclosureCapability, Gesture, HoverObserver, Interaction, InteractionResult, MeleeCapability,
    TargetId,
};
pub use context::{
    ActorState, EntityDirectory, HandSlotProvider, InteractionContext, InteractionHost,
    ReachOracle, RayCaster, UiState, VisibilityOracle,
};
pub use dispatch::{DispatchOutcome, InteractionDispatcher};
pub use drag::DragGate;
pub use gesture::{GestureClassifier, GestureOutcome, HoldStep, PointerFrame, PressStep};
pub use hit::{
    CandidateScan, HitResolver, InteractionCandidate, LayerMask, PointerQuery, RawHit,
    Renderable, RendererKind, Resolution, TargetPriorityKey,
};
pub use hover::HoverTracker;
pub use notice::{InspectEntry, InteractionNotice, InteractionOutbox};
pub use pixel_gate::{AlwaysOpaque, PixelPrecisionGate};
