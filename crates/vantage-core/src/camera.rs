//! Camera slots written by the projection engine
//!
//! The camera computes nothing on its own. It holds the two things a host
//! renderer needs: a projection matrix and a local-to-parent placement.
//! Everything else is derived from those on demand.

use glam::{Mat4, Vec3};

/// A camera with a projection slot and a placement slot
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera-space to clip-space matrix
    projection: Mat4,
    /// Local-to-parent rigid transform
    placement: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        // Identity projection shows nothing useful until the engine runs
        Self {
            projection: Mat4::IDENTITY,
            placement: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    /// Create a camera with identity projection and placement
    pub fn new() -> Self {
        Self::default()
    }

    /// Projection matrix (perspective or orthographic)
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Local-to-parent placement
    pub fn placement(&self) -> Mat4 {
        self.placement
    }

    /// Get the view matrix (parent to camera transform)
    pub fn view_matrix(&self) -> Mat4 {
        self.placement.inverse()
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Camera position in parent space
    pub fn position(&self) -> Vec3 {
        self.placement.transform_point3(Vec3::ZERO)
    }

    /// Get the forward direction (normalized)
    pub fn forward(&self) -> Vec3 {
        self.placement.transform_vector3(Vec3::NEG_Z).normalize()
    }

    /// Get the right direction (normalized)
    pub fn right(&self) -> Vec3 {
        self.placement.transform_vector3(Vec3::X).normalize()
    }

    /// Get the up direction (normalized)
    pub fn up(&self) -> Vec3 {
        self.placement.transform_vector3(Vec3::Y).normalize()
    }

    /// Overwrite the projection slot
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection = matrix;
    }

    /// Overwrite the placement slot
    pub fn set_placement(&mut self, placement: Mat4) {
        self.placement = placement;
    }

    /// Pack the camera for upload to a uniform buffer
    pub fn uniform(&self) -> CameraUniform {
        let eye = self.position();
        CameraUniform {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
        }
    }
}

/// GPU-ready camera data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Eye position with `w = 1`, padded to a full vec4 for uniform layout
    pub view_position: [f32; 4],

    /// Column-major view-projection matrix
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Camera::default().uniform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_camera_defaults_to_identity() {
        let camera = Camera::new();
        assert_eq!(camera.projection_matrix(), Mat4::IDENTITY);
        assert_eq!(camera.view_matrix(), Mat4::IDENTITY);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_view_matrix_inverts_placement() {
        let mut camera = Camera::new();
        camera.set_placement(Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)));

        let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert_abs_diff_eq!(origin_in_view.z, -10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(camera.position().z, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_view_projection_combines_slots() {
        let mut camera = Camera::new();
        let projection = Mat4::from_scale(Vec3::splat(2.0));
        let placement = Mat4::from_translation(Vec3::X);
        camera.set_projection(projection);
        camera.set_placement(placement);

        assert_eq!(camera.view_projection_matrix(), projection * placement.inverse());
    }

    #[test]
    fn test_uniform_layout() {
        let mut camera = Camera::new();
        camera.set_placement(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));

        let uniform = camera.uniform();
        assert_eq!(uniform.view_position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 80);
    }
}
