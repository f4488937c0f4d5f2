/// Orbit camera state, Y-up. The eye is derived from yaw/pitch/distance
/// around the target.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: [f32; 3],
    pub default_yaw: f32,
    pub default_pitch: f32,
    pub default_distance: f32,
    pub default_target: [f32; 3],
}

impl CameraState {
    pub fn new(yaw: f32, pitch: f32, distance: f32, target: [f32; 3]) -> Self {
        Self {
            yaw,
            pitch,
            distance,
            target,
            default_yaw: yaw,
            default_pitch: pitch,
            default_distance: distance,
            default_target: target,
        }
    }

    pub fn reset(&mut self) {
        self.yaw = self.default_yaw;
        self.pitch = self.default_pitch;
        self.distance = self.default_distance;
        self.target = self.default_target;
    }

    pub fn eye(&self) -> [f32; 3] {
        [
            self.target[0] + self.distance * self.yaw.cos() * self.pitch.cos(),
            self.target[1] + self.distance * self.pitch.sin(),
            self.target[2] + self.distance * self.yaw.sin() * self.pitch.cos(),
        ]
    }

}

impl Default for CameraState {
    fn default() -> Self {
        // Eye lands near (8, 8, 8) looking at the origin
        Self::new(std::f32::consts::FRAC_PI_4, 0.6155, 13.86, [0.0, 0.0, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_sits_on_the_diagonal() {
        let state = CameraState::default();
        let eye = state.eye();
        for axis in eye {
            assert!((axis - 8.0).abs() < 0.05, "eye {eye:?}");
        }
    }

    #[test]
    fn reset_restores_construction_values() {
        let mut state = CameraState::new(0.1, 0.2, 5.0, [1.0, 2.0, 3.0]);
        state.yaw = 2.0;
        state.distance = 50.0;
        state.target = [9.0, 9.0, 9.0];
        state.reset();
        assert_eq!(state.yaw, 0.1);
        assert_eq!(state.distance, 5.0);
        assert_eq!(state.target, [1.0, 2.0, 3.0]);
    }
}
