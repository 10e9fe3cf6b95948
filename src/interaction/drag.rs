use super::capability::TargetId;

/// Keeps a handled click from turning into a drag on the same press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGate {
    drag_allowed: bool,
    active: Option<TargetId>,
}

impl Default for DragGate {
    fn default() -> Self {
        Self {
            drag_allowed: true,
            active: None,
        }
    }
}

impl DragGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A press-time handler responded; no drag until the button comes back up.
    pub fn lock(&mut self) {
        self.drag_allowed = false;
    }

    /// Re-allows dragging and hands back the drag that was in progress, if any.
    pub fn release(&mut self) -> Option<TargetId> {
        self.drag_allowed = true;
        self.active.take()
    }

    pub fn begin(&mut self, target: TargetId) {
        self.active = Some(target);
    }

    pub fn is_drag_allowed(&self) -> bool {
        self.drag_allowed
    }

    pub fn active(&self) -> Option<TargetId> {
        self.active
    }

    pub fn allows_new_drag(&self) -> bool {
        self.drag_allowed && self.active.is_none()
    }
}
