//! Projection matrix derivation
//!
//! Every function here is a pure, total function over validated
//! [`ProjectionParameters`]. Nothing is cached: each call recomputes the
//! matrix from its inputs, so identical inputs give bit-identical output.
//!
//! ## Conventions
//!
//! - Right-handed camera space, camera looking down -Z
//! - OpenGL clip cube: `[-1, 1]` on all three axes after the divide
//! - `glam::Mat4` is column-major; use [`to_row_major`] for hosts that
//!   expect `rows[r][c]`

use glam::{Mat4, Quat, Vec3, Vec4};

use crate::{Projection, ProjectionMode, ProjectionParameters};

/// Pitch of the isometric viewpoint in degrees (`-atan(1/sqrt(2))`)
pub const ISOMETRIC_PITCH_DEGREES: f32 = -35.264;
/// Yaw of the isometric viewpoint in degrees
pub const ISOMETRIC_YAW_DEGREES: f32 = 45.0;
/// Roll of the isometric viewpoint in degrees
pub const ISOMETRIC_ROLL_DEGREES: f32 = 0.0;
/// Distance of the isometric camera from its parent origin
pub const ISOMETRIC_DISTANCE: f32 = 550.0;

/// Result of one recomputation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionOutput {
    /// Camera-space to clip-space matrix
    pub matrix: Mat4,
    /// Local-to-parent placement the camera must adopt (Isometric only)
    pub placement: Option<Mat4>,
}

impl ProjectionOutput {
    /// The projection matrix as `rows[r][c]`
    pub fn row_major(&self) -> [[f32; 4]; 4] {
        to_row_major(&self.matrix)
    }
}

/// Derive the projection for `mode` from the current parameters
pub fn compute_projection(mode: ProjectionMode, params: &ProjectionParameters) -> ProjectionOutput {
    derive(&params.projection(mode))
}

/// Derive the matrix (and placement override, if any) for a projection
pub fn derive(projection: &Projection) -> ProjectionOutput {
    match *projection {
        Projection::Perspective {
            fov_degrees,
            aspect,
            near,
            far,
        } => ProjectionOutput {
            matrix: FrustumBounds::symmetric(fov_degrees, aspect, near, far).matrix(),
            placement: None,
        },
        Projection::Orthographic {
            width,
            height,
            near,
            far,
        } => ProjectionOutput {
            matrix: OrthoVolume::new(width, height, near, far).matrix(),
            placement: None,
        },
        Projection::Isometric {
            width,
            height,
            near,
            far,
        } => ProjectionOutput {
            matrix: OrthoVolume::new(width, height, near, far).matrix(),
            placement: Some(isometric_placement()),
        },
    }
}

/// Aspect ratio the rendering viewport must use for `mode`
///
/// Always read live from `params`; a viewport with a different aspect
/// would visibly stretch the image.
pub fn viewport_aspect_ratio(mode: ProjectionMode, params: &ProjectionParameters) -> f32 {
    match mode {
        ProjectionMode::Perspective => params.aspect_ratio,
        ProjectionMode::Orthographic | ProjectionMode::Isometric => {
            params.ortho_width / params.ortho_height
        }
    }
}

/// Side planes of a perspective frustum, measured on the near plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl FrustumBounds {
    /// Symmetric frustum from a vertical field of view and aspect ratio
    pub fn symmetric(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let top = near * (fov_degrees.to_radians() / 2.0).tan();
        let right = top * aspect;
        Self {
            left: -right,
            right,
            bottom: -top,
            top,
            near,
            far,
        }
    }

    /// OpenGL-style frustum matrix
    pub fn matrix(&self) -> Mat4 {
        let Self {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;

        #[rustfmt::skip]
        let rows = [
            [2.0 * n / (r - l), 0.0,               (r + l) / (r - l),  0.0],
            [0.0,               2.0 * n / (t - b), (t + b) / (t - b),  0.0],
            [0.0,               0.0,               -(f + n) / (f - n), -2.0 * f * n / (f - n)],
            [0.0,               0.0,               -1.0,               0.0],
        ];
        from_row_major(rows)
    }
}

/// Axis-aligned orthographic view box
///
/// Spans `[-width/2, width/2] x [-height/2, height/2]` across the view and
/// `[near, far]` along the view direction (camera-space z in
/// `[-far, -near]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoVolume {
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoVolume {
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self {
            width,
            height,
            near,
            far,
        }
    }

    /// Offset that moves the middle of the depth range onto the origin
    pub fn translation(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, (self.far + self.near) / 2.0)
    }

    /// Per-axis scale into the clip cube, before the depth flip
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            2.0 / self.width,
            2.0 / self.height,
            2.0 / (self.far - self.near),
        )
    }

    /// `scale * translation`, with z negated so that -Z looks into the cube
    pub fn matrix(&self) -> Mat4 {
        let scale = self.scale() * Vec3::new(1.0, 1.0, -1.0);
        Mat4::from_scale(scale) * Mat4::from_translation(self.translation())
    }
}

/// Rotation of the isometric viewpoint: yaw about Y, then pitch about X
pub fn isometric_rotation() -> Quat {
    Quat::from_rotation_y(ISOMETRIC_YAW_DEGREES.to_radians())
        * Quat::from_rotation_x(ISOMETRIC_PITCH_DEGREES.to_radians())
        * Quat::from_rotation_z(ISOMETRIC_ROLL_DEGREES.to_radians())
}

/// Fixed local-to-parent placement used in Isometric mode
///
/// `rotation * translation`: the camera backs away `ISOMETRIC_DISTANCE`
/// along its own +Z, then the whole rig is rotated, leaving it on the
/// `(1, 1, 1)` diagonal looking at the parent origin.
pub fn isometric_placement() -> Mat4 {
    Mat4::from_quat(isometric_rotation())
        * Mat4::from_translation(Vec3::new(0.0, 0.0, ISOMETRIC_DISTANCE))
}

/// Transform a camera-space point and perform the homogeneous divide
///
/// Returns `None` when the point lies on the camera plane (`w == 0`).
pub fn project_point(matrix: &Mat4, point: Vec3) -> Option<Vec3> {
    let clip = *matrix * Vec4::new(point.x, point.y, point.z, 1.0);
    if clip.w.abs() <= f32::EPSILON {
        return None;
    }
    Some(clip.truncate() / clip.w)
}

/// Build a matrix from `rows[r][c]`
pub fn from_row_major(rows: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(&rows).transpose()
}

/// Read a matrix back as `rows[r][c]`
pub fn to_row_major(matrix: &Mat4) -> [[f32; 4]; 4] {
    matrix.transpose().to_cols_array_2d()
}
