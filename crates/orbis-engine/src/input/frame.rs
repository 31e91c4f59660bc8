use super::types::Key;

/// Logical pixels treated as one wheel "line" for pixel-precise touchpads.
const PIXELS_PER_LINE: f32 = 40.0;

/// Input accumulated over one frame.
///
/// `InputState` holds what is currently down; `InputFrame` holds what
/// happened since the last frame and is cleared after each one.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame in arrival order, auto-repeat included.
    pub keys_pressed: Vec<Key>,

    /// Pointer motion in logical pixels.
    pub pointer_delta: (f32, f32),

    /// Vertical wheel motion in lines (positive = away from user).
    pub wheel_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.pointer_delta = (0.0, 0.0);
        self.wheel_lines = 0.0;
    }

    pub(super) fn add_wheel_pixels(&mut self, dy: f32) {
        self.wheel_lines += dy / PIXELS_PER_LINE;
    }
}
