//! Orbit-style placement driver
//!
//! Keeps the camera on a sphere around a target point. Input devices are
//! the host's business: it translates mouse drags and wheel ticks into the
//! deltas passed to [`OrbitControls::orbit`], [`OrbitControls::zoom`] and
//! [`OrbitControls::pan`], then calls [`OrbitControls::apply`] once per
//! frame to write the camera's placement.

use glam::{Mat4, Vec3};

use crate::Camera;

/// Default orbit distance from the target
pub const DEFAULT_ORBIT_DISTANCE: f32 = 600.0;
/// Default world units moved per unit of zoom input
pub const DEFAULT_ZOOM_SPEED: f32 = 10.0;

/// Limits applied to every orbit update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_distance: 0.1,
            max_distance: None,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}

/// Orbit controls: yaw and pitch around `target` at `distance`
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Point the camera looks at
    pub target: Vec3,
    /// Distance from the target
    distance: f32,
    /// Rotation about the world Y axis, radians
    yaw: f32,
    /// Elevation above the target's horizontal plane, radians
    pitch: f32,
    /// Radians per unit of orbit input
    pub rotate_speed: f32,
    /// World units per unit of zoom input
    pub zoom_speed: f32,
    /// World units per unit of pan input, scaled by distance
    pub pan_speed: f32,
    pub bounds: OrbitBounds,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: DEFAULT_ORBIT_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
            rotate_speed: 1.0,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            pan_speed: 0.001,
            bounds: OrbitBounds::default(),
        }
    }
}

impl OrbitControls {
    /// Create controls at the default distance, looking at the origin
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the orbit distance, clamped to the bounds
    pub fn set_distance(&mut self, distance: f32) {
        let max = self.bounds.max_distance.unwrap_or(f32::MAX);
        self.distance = distance.clamp(self.bounds.min_distance, max);
    }

    /// Set the orbit angles, clamping pitch to the bounds
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
    }

    /// Orbit around the target point
    ///
    /// - `delta_yaw`: Horizontal rotation (positive = rotate right)
    /// - `delta_pitch`: Vertical rotation (positive = rotate up)
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.set_angles(
            self.yaw + delta_yaw * self.rotate_speed,
            self.pitch + delta_pitch * self.rotate_speed,
        );
    }

    /// Zoom in/out
    ///
    /// - `delta`: Positive = zoom in, negative = zoom out
    pub fn zoom(&mut self, delta: f32) {
        self.set_distance(self.distance - delta * self.zoom_speed);
    }

    /// Pan the target (and so the camera) in the view plane
    ///
    /// Movement is scaled by distance for a consistent feel at all zoom
    /// levels.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let placement = self.placement();
        let right = placement.transform_vector3(Vec3::X);
        let up = placement.transform_vector3(Vec3::Y);
        let scale = self.distance * self.pan_speed;

        self.target += (right * delta_x + up * delta_y) * scale;
    }

    /// Reset to the default orbit, keeping speeds and bounds
    pub fn reset(&mut self) {
        self.target = Vec3::ZERO;
        self.set_distance(DEFAULT_ORBIT_DISTANCE);
        self.set_angles(0.0, 0.0);
    }

    /// Camera position implied by the current orbit
    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.yaw.sin() * self.pitch.cos(),
                self.distance * self.pitch.sin(),
                self.distance * self.yaw.cos() * self.pitch.cos(),
            )
    }

    /// Local-to-parent placement looking from `eye()` at `target`
    pub fn placement(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y).inverse()
    }

    /// Write the orbit placement into the camera
    pub fn apply(&self, camera: &mut Camera) {
        camera.set_placement(self.placement());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_orbit_looks_down_negative_z() {
        let controls = OrbitControls::default();
        let mut camera = Camera::new();
        controls.apply(&mut camera);

        assert_abs_diff_eq!(camera.position().z, DEFAULT_ORBIT_DISTANCE, epsilon = 1e-3);
        assert_abs_diff_eq!(camera.forward().z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut controls = OrbitControls::default();
        controls.orbit(0.3, 0.2);

        assert_abs_diff_eq!(
            (controls.eye() - controls.target).length(),
            DEFAULT_ORBIT_DISTANCE,
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut controls = OrbitControls::default();
        controls.orbit(0.0, 10.0);
        assert_eq!(controls.pitch(), controls.bounds.max_pitch);
    }

    #[test]
    fn test_zoom_uses_speed_and_bounds() {
        let mut controls = OrbitControls::default();
        controls.zoom(1.0);
        assert_abs_diff_eq!(controls.distance(), 590.0, epsilon = 1e-4);

        controls.zoom(1000.0);
        assert_eq!(controls.distance(), controls.bounds.min_distance);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut controls = OrbitControls::default();
        controls.pan(1.0, 0.0);
        assert!(controls.target.x > 0.0);
        assert_abs_diff_eq!(controls.target.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_reset() {
        let mut controls = OrbitControls::default();
        controls.orbit(1.0, 0.5);
        controls.zoom(5.0);
        controls.reset();
        assert_eq!(controls, OrbitControls::default());
    }
}
