use super::CameraState;
use crate::app::updatable::Updatable;

/// Trackball-style camera input: drag to rotate or pan, wheel to zoom.
/// Zoom eases toward its target in `update`, once per frame.
pub struct CameraController {
    state: CameraState,
    zoom_target: f32,
    left_mouse_pressed: bool,
    middle_mouse_pressed: bool,
    right_mouse_pressed: bool,
    alt_pressed: bool,
    shift_pressed: bool,
    control_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 100.0;

impl CameraController {
    pub fn new(state: CameraState) -> Self {
        let zoom_target = state.distance;
        Self {
            state,
            zoom_target,
            left_mouse_pressed: false,
            middle_mouse_pressed: false,
            right_mouse_pressed: false,
            alt_pressed: false,
            shift_pressed: false,
            control_pressed: false,
            last_mouse_pos: None,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn set_target(&mut self, target: [f32; 3]) {
        self.state.target = target;
        self.state.default_target = target;
    }

    /// Handle mouse button press/release
    pub fn on_mouse_button(&mut self, button: winit::event::MouseButton, pressed: bool) {
        match button {
            winit::event::MouseButton::Left => {
                self.left_mouse_pressed = pressed;
                if !pressed {
                    self.last_mouse_pos = None;
                }
            }
            winit::event::MouseButton::Middle => {
                self.middle_mouse_pressed = pressed;
                if !pressed {
                    self.last_mouse_pos = None;
                }
            }
            winit::event::MouseButton::Right => {
                self.right_mouse_pressed = pressed;
                if !pressed {
                    self.last_mouse_pos = None;
                }
            }
            _ => {}
        }
    }

    /// Handle modifier keys (Shift, Alt, Control)
    pub fn on_modifiers(&mut self, shift: bool, alt: bool, control: bool) {
        self.shift_pressed = shift;
        self.alt_pressed = alt;
        self.control_pressed = control;
    }

    /// Handle mouse movement with camera transformations
    pub fn on_mouse_move(&mut self, position: (f64, f64)) -> bool {
        let should_pan =
            self.middle_mouse_pressed || (self.shift_pressed && self.right_mouse_pressed);
        let should_rotate =
            self.right_mouse_pressed || (self.alt_pressed && self.left_mouse_pressed);

        let mut handled = false;

        if should_pan {
            if let Some(last_pos) = self.last_mouse_pos {
                let delta_x = position.0 - last_pos.0;
                let delta_y = position.1 - last_pos.1;
                self.pan(delta_x as f32, -delta_y as f32);
                handled = true;
            }
            self.last_mouse_pos = Some(position);
        } else if should_rotate {
            if let Some(last_pos) = self.last_mouse_pos {
                let delta_x = position.0 - last_pos.0;
                let delta_y = position.1 - last_pos.1;
                self.rotate(delta_x as f32, delta_y as f32);
                handled = true;
            }
            self.last_mouse_pos = Some(position);
        } else {
            self.last_mouse_pos = None;
        }

        handled
    }

    /// Rotate camera around target
    fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.state.yaw -= delta_x * 0.01;
        self.state.pitch += delta_y * 0.01;
        self.state.pitch = self.state.pitch.clamp(-1.5, 1.5);
    }

    /// Pan camera (move target)
    fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = nalgebra_glm::vec3(
            self.state.yaw.cos() * self.state.pitch.cos(),
            self.state.pitch.sin(),
            self.state.yaw.sin() * self.state.pitch.cos(),
        );
        let right = nalgebra_glm::normalize(&nalgebra_glm::cross(
            &forward,
            &nalgebra_glm::vec3(0.0, 1.0, 0.0),
        ));
        let up = nalgebra_glm::cross(&right, &forward);

        // Pan speed based on distance
        let pan_speed = self.state.distance * 0.001;

        self.state.target[0] += right.x * delta_x * pan_speed - up.x * delta_y * pan_speed;
        self.state.target[1] += right.y * delta_x * pan_speed - up.y * delta_y * pan_speed;
        self.state.target[2] += right.z * delta_x * pan_speed - up.z * delta_y * pan_speed;
    }

    /// Wheel zoom: moves the target distance, `update` eases toward it
    pub fn zoom(&mut self, delta: f32) {
        let zoom_factor = 1.0 - delta * 0.1;
        self.zoom_target = (self.zoom_target * zoom_factor).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Reset camera to defaults
    pub fn reset(&mut self) {
        self.state.reset();
        self.zoom_target = self.state.distance;
        self.last_mouse_pos = None;
    }
}

impl Updatable for CameraController {
    fn update(&mut self, dt: f32) {
        // Exponential ease toward the wheel target; frame-rate independent
        let t = 1.0 - (-12.0 * dt).exp();
        self.state.distance += (self.zoom_target - self.state.distance) * t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_drag_rotates_around_the_target() {
        let mut controller = CameraController::new(CameraState::default());
        let yaw = controller.state().yaw;

        controller.on_mouse_button(winit::event::MouseButton::Right, true);
        controller.on_mouse_move((100.0, 100.0));
        assert!(controller.on_mouse_move((150.0, 100.0)));
        assert!((controller.state().yaw - (yaw - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn zoom_eases_toward_the_wheel_target() {
        let mut controller = CameraController::new(CameraState::new(0.0, 0.0, 10.0, [0.0; 3]));
        controller.zoom(1.0);
        // Target moved, distance not yet
        assert_eq!(controller.state().distance, 10.0);
        for _ in 0..200 {
            controller.update(1.0 / 60.0);
        }
        assert!((controller.state().distance - 9.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_target_is_clamped() {
        let mut controller = CameraController::new(CameraState::new(0.0, 0.0, 10.0, [0.0; 3]));
        for _ in 0..100 {
            controller.zoom(5.0);
        }
        for _ in 0..500 {
            controller.update(1.0 / 60.0);
        }
        assert!(controller.state().distance >= ZOOM_MIN - 1e-4);
    }
}
