//! # Vantage Core
//!
//! Camera projection engine for perspective, orthographic and isometric
//! viewing.
//!
//! The engine turns a handful of human-tunable numbers
//! ([`ProjectionParameters`]) and a [`ProjectionMode`] into the 4x4 matrix
//! that maps camera space into clip space, plus the aspect ratio the
//! render viewport must use. Isometric mode additionally pins the camera
//! to a fixed placement.
//!
//! ## Quick Start
//!
//! ```rust
//! use vantage_core::prelude::*;
//!
//! let params = ProjectionParameters::default();
//! let output = compute_projection(ProjectionMode::Perspective, &params);
//! let aspect = viewport_aspect_ratio(ProjectionMode::Perspective, &params);
//!
//! assert!(output.placement.is_none());
//! assert_eq!(aspect, params.aspect_ratio);
//! ```
//!
//! Hosts that want the whole edit → recompute → resize sequence managed
//! for them use [`ProjectionRig`].
//!
//! ## Units and Conventions
//!
//! - **Angles**: parameters are in **degrees**; orbit controls use radians
//! - **Coordinate system**: Right-handed, Y-up, camera looks down -Z
//! - **Clip space**: OpenGL cube `[-1, 1]^3`
//! - **Matrices**: `glam::Mat4` (column-major); row-major access through
//!   [`projection::to_row_major`]

pub mod camera;
pub mod mode;
pub mod orbit;
pub mod params;
pub mod projection;
pub mod rig;
pub mod viewport;

mod error;

pub use camera::{Camera, CameraUniform};
pub use error::{Error, Result};
pub use mode::ProjectionMode;
pub use orbit::{OrbitBounds, OrbitControls};
pub use params::{Parameter, Projection, ProjectionParameters};
pub use projection::{ProjectionOutput, compute_projection, viewport_aspect_ratio};
pub use rig::ProjectionRig;
pub use viewport::{FittedSurface, Surface, Viewport};

/// Prelude module for convenient imports
pub mod prelude {
    // Engine
    pub use crate::projection::{
        FrustumBounds, OrthoVolume, ProjectionOutput, compute_projection, derive,
        isometric_placement, project_point, viewport_aspect_ratio,
    };

    // Parameters
    pub use crate::{Parameter, Projection, ProjectionMode, ProjectionParameters};

    // Host integration
    pub use crate::{Camera, FittedSurface, OrbitControls, ProjectionRig, Surface, Viewport};

    // Math (re-export glam)
    pub use glam::{Mat4, Quat, Vec3, Vec4};

    // Error handling
    pub use crate::{Error, Result};
}
