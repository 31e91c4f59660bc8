use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for the window.
///
/// Holds "is down" information and the pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are lost while unfocused; avoid stuck keys/buttons.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                repeat,
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        let inserted = self.keys_down.insert(*key);
                        if inserted || *repeat {
                            frame.keys_pressed.push(*key);
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                match delta {
                    MouseWheelDelta::Line { y, .. } => frame.wheel_lines += y,
                    MouseWheelDelta::Pixel { y, .. } => frame.add_wheel_pixels(*y),
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            repeat,
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn press_and_release_are_recorded_once() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();

        let l = Key::Letter('L');
        s.apply_event(&mut f, key(l, KeyState::Pressed, false));
        s.apply_event(&mut f, key(l, KeyState::Pressed, false));
        assert_eq!(f.keys_pressed, vec![l]);
        assert!(s.key_down(l));

        s.apply_event(&mut f, key(l, KeyState::Released, false));
        assert!(!s.key_down(l));
    }

    #[test]
    fn repeats_count_as_presses() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::ArrowUp, KeyState::Pressed, false));
        s.apply_event(&mut f, key(Key::ArrowUp, KeyState::Pressed, true));
        assert_eq!(f.keys_pressed, vec![Key::ArrowUp, Key::ArrowUp]);
    }

    #[test]
    fn pointer_delta_accumulates_from_second_sample() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, moved(10.0, 10.0));
        assert_eq!(f.pointer_delta, (0.0, 0.0));
        s.apply_event(&mut f, moved(13.0, 8.0));
        s.apply_event(&mut f, moved(15.0, 9.0));
        assert_eq!(f.pointer_delta, (5.0, -1.0));
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Letter('S'), KeyState::Pressed, false));
        s.apply_event(
            &mut f,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 0.0,
                y: 0.0,
                modifiers: Modifiers::default(),
            }),
        );
        s.apply_event(&mut f, InputEvent::Focused(false));
        assert!(s.keys_down.is_empty());
        assert!(s.buttons_down.is_empty());
    }

    #[test]
    fn wheel_accumulates_lines_and_pixels() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        let m = Modifiers::default();
        s.apply_event(&mut f, InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 }, modifiers: m });
        s.apply_event(&mut f, InputEvent::MouseWheel { delta: MouseWheelDelta::Pixel { x: 0.0, y: 40.0 }, modifiers: m });
        assert!((f.wheel_lines - 2.0).abs() < 1e-6);

        f.clear();
        assert_eq!(f.wheel_lines, 0.0);
    }
}
