use bevy::input::ButtonInput;
use bevy::input::mouse::MouseButton;

/// What the pointer button did this frame, derived from one sample of the button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerFrameState {
    #[default]
    Idle,
    PressedThisFrame,
    Held,
    ReleasedThisFrame,
}

impl PointerFrameState {
    /// A press reported in the same frame as a release wins; the release is
    /// still visible through `just_released` for closing the gesture.
    pub fn sample(buttons: &ButtonInput<MouseButton>, button: MouseButton) -> Self {
        if buttons.just_pressed(button) {
            PointerFrameState::PressedThisFrame
        } else if buttons.just_released(button) {
            PointerFrameState::ReleasedThisFrame
        } else if buttons.pressed(button) {
            PointerFrameState::Held
        } else {
            PointerFrameState::Idle
        }
    }
}

pub fn pointer_button_from_name(name: &str) -> Option<MouseButton> {
    match name {
        "Left" => Some(MouseButton::Left),
        "Right" => Some(MouseButton::Right),
        "Middle" => Some(MouseButton::Middle),
        _ => None,
    }
}
