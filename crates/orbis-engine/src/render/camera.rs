//! Orbit camera.
//!
//! The eye sits on a sphere around `target`; left-drag rotates it, the wheel
//! changes the distance. Angles accumulate in yaw/pitch and the eye is
//! recomputed from them, so repeated drags never drift off the sphere.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Mat3, Mat4, Vec3};

use crate::input::{InputFrame, InputState, MouseButton};

/// Pitch stays just short of the poles so `look_at` keeps a valid up vector.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Tunable camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub target: Vec3,
    /// Initial eye distance from `target`.
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Radians per logical pixel of drag.
    pub rotate_sensitivity: f32,
    /// Fractional distance change per wheel line.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            fovy: 45f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
            rotate_sensitivity: 0.005,
            zoom_step: 0.1,
            min_distance: 1.2,
            max_distance: 50.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    yaw: f32,
    pitch: f32,
    distance: f32,
    aspect: f32,
}

impl OrbitCamera {
    /// Creates a camera looking at `config.target` from +Z.
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        Self {
            distance: config
                .distance
                .clamp(config.min_distance, config.max_distance),
            config,
            yaw: 0.0,
            pitch: 0.0,
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the projection aspect ratio. Non-positive values are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.aspect = aspect;
        }
    }

    /// Applies one frame of pointer input.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame) {
        if input.button_down(MouseButton::Left) {
            let (dx, dy) = frame.pointer_delta;
            self.rotate(dx, dy);
        }

        if frame.wheel_lines != 0.0 {
            self.zoom(frame.wheel_lines);
        }
    }

    /// Rotates by a pointer drag in logical pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let sens = self.config.rotate_sensitivity;
        self.yaw -= dx * sens;
        self.pitch = (self.pitch - dy * sens).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zooms by `lines` wheel lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - self.config.zoom_step).powf(lines);
        self.distance = (self.distance * factor)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    pub fn eye(&self) -> Vec3 {
        let rot = Mat3::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        self.config.target + rot * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.config.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fovy,
            self.aspect,
            self.config.znear,
            self.config.zfar,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Modifiers, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(CameraConfig::default(), 16.0 / 9.0)
    }

    #[test]
    fn starts_on_positive_z() {
        let c = camera();
        assert!(c.eye().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-6));
    }

    #[test]
    fn target_projects_to_screen_center() {
        let c = camera();
        let clip = c.view_projection() * c.config().target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth {}", ndc.z);
    }

    #[test]
    fn rotation_keeps_distance() {
        let mut c = camera();
        c.rotate(120.0, -45.0);
        assert!((c.eye().length() - 5.0).abs() < 1e-4);
        assert!(c.eye().x.abs() > 0.1);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut c = camera();
        c.rotate(0.0, -1.0e6);
        assert!((c.pitch() - PITCH_LIMIT).abs() < 1e-6);
        c.rotate(0.0, 1.0e6);
        assert!((c.pitch() + PITCH_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = camera();
        c.zoom(2.0);
        assert!(c.distance() < 5.0);
        c.zoom(1000.0);
        assert_eq!(c.distance(), c.config().min_distance);
        c.zoom(-1000.0);
        assert_eq!(c.distance(), c.config().max_distance);
    }

    #[test]
    fn aspect_changes_projection_and_rejects_zero() {
        let mut c = camera();
        let before = c.projection();
        c.set_aspect(1.0);
        assert_ne!(before, c.projection());
        c.set_aspect(0.0);
        assert_eq!(c.aspect(), 1.0);
    }

    #[test]
    fn drag_only_rotates_while_left_button_is_held() {
        let mut c = camera();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0 }));
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 50.0, y: 0.0 }));
        c.update(&state, &frame);
        assert_eq!(c.yaw(), 0.0);

        frame.clear();
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 50.0,
                y: 0.0,
                modifiers: Modifiers::default(),
            }),
        );
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 90.0, y: 0.0 }));
        c.update(&state, &frame);
        assert!(c.yaw() < 0.0);
    }
}
