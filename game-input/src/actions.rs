#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Arms or disarms throw mode for the next pointer press.
    ToggleThrow,
}

impl GameAction {
    pub fn all() -> &'static [GameAction] {
        &[GameAction::ToggleThrow]
    }
}
