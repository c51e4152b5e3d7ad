//! Editable projection parameters and their validation
//!
//! `ProjectionParameters` is the record a UI edits. It is always fully
//! populated, so switching modes never loses values entered for another
//! mode. Validation happens here, at the mutation boundary, so the
//! derivation in [`crate::projection`] can trust its inputs.

use serde::{Deserialize, Serialize};

use crate::projection::{compute_projection, viewport_aspect_ratio};
use crate::{Error, ProjectionMode, Result};

/// Default vertical field of view in degrees
pub const DEFAULT_VERTICAL_FOV_DEGREES: f32 = 60.0;
/// Default perspective aspect ratio (roughly 16:9)
pub const DEFAULT_ASPECT_RATIO: f32 = 1.777;
/// Default near clip distance
pub const DEFAULT_NEAR_CLIP: f32 = 1.0;
/// Default far clip distance
pub const DEFAULT_FAR_CLIP: f32 = 2000.0;
/// Default orthographic view width in world units
pub const DEFAULT_ORTHO_WIDTH: f32 = 800.0;
/// Default orthographic view height in world units
pub const DEFAULT_ORTHO_HEIGHT: f32 = 450.196;

/// Human-tunable inputs to the projection engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParameters {
    /// Vertical field of view in degrees (Perspective)
    pub vertical_fov_degrees: f32,
    /// Width / height of the frustum (Perspective)
    pub aspect_ratio: f32,
    /// Near clip distance along the view direction
    pub near_clip: f32,
    /// Far clip distance along the view direction
    pub far_clip: f32,
    /// Width of the orthographic view volume (Orthographic, Isometric)
    pub ortho_width: f32,
    /// Height of the orthographic view volume (Orthographic, Isometric)
    pub ortho_height: f32,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            vertical_fov_degrees: DEFAULT_VERTICAL_FOV_DEGREES,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            near_clip: DEFAULT_NEAR_CLIP,
            far_clip: DEFAULT_FAR_CLIP,
            ortho_width: DEFAULT_ORTHO_WIDTH,
            ortho_height: DEFAULT_ORTHO_HEIGHT,
        }
    }
}

impl ProjectionParameters {
    /// Check every field against its documented domain
    pub fn validate(&self) -> Result<()> {
        validate_value(Parameter::Fov, self.vertical_fov_degrees)?;
        validate_value(Parameter::Aspect, self.aspect_ratio)?;
        validate_value(Parameter::Near, self.near_clip)?;
        validate_value(Parameter::Far, self.far_clip)?;
        validate_value(Parameter::OrthoWidth, self.ortho_width)?;
        validate_value(Parameter::OrthoHeight, self.ortho_height)?;

        if self.near_clip >= self.far_clip {
            return Err(Error::InvalidGeometry(format!(
                "near clip ({}) must be less than far clip ({})",
                self.near_clip, self.far_clip
            )));
        }

        // Finite inputs at the edge of f32 range can still overflow the
        // derived matrix, so every mode is derived and checked once
        for mode in ProjectionMode::ALL {
            let matrix_ok = compute_projection(mode, self).matrix.is_finite();
            let aspect = viewport_aspect_ratio(mode, self);
            if !matrix_ok || !aspect.is_normal() {
                return Err(Error::InvalidGeometry(format!(
                    "parameters overflow the {mode} projection"
                )));
            }
        }

        Ok(())
    }

    /// Read a single field
    pub fn get(&self, parameter: Parameter) -> f32 {
        match parameter {
            Parameter::Fov => self.vertical_fov_degrees,
            Parameter::Aspect => self.aspect_ratio,
            Parameter::Near => self.near_clip,
            Parameter::Far => self.far_clip,
            Parameter::OrthoWidth => self.ortho_width,
            Parameter::OrthoHeight => self.ortho_height,
        }
    }

    /// Return a copy with one field replaced, validated as a whole
    ///
    /// `self` is left untouched, so a rejected edit keeps the previous
    /// values in force.
    pub fn with(&self, parameter: Parameter, value: f32) -> Result<Self> {
        let mut candidate = *self;
        match parameter {
            Parameter::Fov => candidate.vertical_fov_degrees = value,
            Parameter::Aspect => candidate.aspect_ratio = value,
            Parameter::Near => candidate.near_clip = value,
            Parameter::Far => candidate.far_clip = value,
            Parameter::OrthoWidth => candidate.ortho_width = value,
            Parameter::OrthoHeight => candidate.ortho_height = value,
        }
        candidate.validate()?;
        Ok(candidate)
    }

    /// Apply a validated edit in place
    pub fn set(&mut self, parameter: Parameter, value: f32) -> Result<()> {
        *self = self.with(parameter, value)?;
        Ok(())
    }

    /// Build the tagged projection for `mode`
    ///
    /// Only the fields meaningful to the chosen mode are carried over.
    pub fn projection(&self, mode: ProjectionMode) -> Projection {
        let near = self.near_clip;
        let far = self.far_clip;
        match mode {
            ProjectionMode::Perspective => Projection::Perspective {
                fov_degrees: self.vertical_fov_degrees,
                aspect: self.aspect_ratio,
                near,
                far,
            },
            ProjectionMode::Orthographic => Projection::Orthographic {
                width: self.ortho_width,
                height: self.ortho_height,
                near,
                far,
            },
            ProjectionMode::Isometric => Projection::Isometric {
                width: self.ortho_width,
                height: self.ortho_height,
                near,
                far,
            },
        }
    }
}

fn validate_value(parameter: Parameter, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidGeometry(format!(
            "{parameter} must be finite, got {value}"
        )));
    }

    match parameter {
        Parameter::Fov if value <= 0.0 || value >= 180.0 => {
            Err(Error::DegenerateFieldOfView(value))
        }
        Parameter::Fov => Ok(()),
        _ if value <= 0.0 => Err(Error::InvalidGeometry(format!(
            "{parameter} must be positive, got {value}"
        ))),
        _ => Ok(()),
    }
}

/// Names one editable field of [`ProjectionParameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Fov,
    Aspect,
    Near,
    Far,
    OrthoWidth,
    OrthoHeight,
}

impl Parameter {
    pub const ALL: [Self; 6] = [
        Self::Fov,
        Self::Aspect,
        Self::Near,
        Self::Far,
        Self::OrthoWidth,
        Self::OrthoHeight,
    ];

    /// Parse a parameter name
    ///
    /// Accepts case-insensitive names, with short aliases for the
    /// orthographic dimensions ("width", "height").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fov" | "vertical_fov" | "vertical_fov_degrees" => Some(Self::Fov),
            "aspect" | "aspect_ratio" => Some(Self::Aspect),
            "near" | "near_clip" => Some(Self::Near),
            "far" | "far_clip" => Some(Self::Far),
            "ortho_width" | "width" => Some(Self::OrthoWidth),
            "ortho_height" | "height" => Some(Self::OrthoHeight),
            _ => None,
        }
    }

    /// Whether editing this field changes the output in `mode`
    pub fn applies_to(self, mode: ProjectionMode) -> bool {
        match self {
            Self::Near | Self::Far => true,
            Self::Fov | Self::Aspect => mode == ProjectionMode::Perspective,
            Self::OrthoWidth | Self::OrthoHeight => mode.is_orthographic(),
        }
    }
}

impl std::str::FromStr for Parameter {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownParameter(s.to_string()))
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fov => "fov",
            Self::Aspect => "aspect",
            Self::Near => "near",
            Self::Far => "far",
            Self::OrthoWidth => "ortho_width",
            Self::OrthoHeight => "ortho_height",
        };
        write!(f, "{name}")
    }
}

/// A projection with only the inputs its mode needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        width: f32,
        height: f32,
        near: f32,
        far: f32,
    },
    Isometric {
        width: f32,
        height: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// The mode this projection was built for
    pub fn mode(&self) -> ProjectionMode {
        match self {
            Self::Perspective { .. } => ProjectionMode::Perspective,
            Self::Orthographic { .. } => ProjectionMode::Orthographic,
            Self::Isometric { .. } => ProjectionMode::Isometric,
        }
    }

    /// Aspect ratio implied by the view volume
    pub fn aspect_ratio(&self) -> f32 {
        match *self {
            Self::Perspective { aspect, .. } => aspect,
            Self::Orthographic { width, height, .. } | Self::Isometric { width, height, .. } => {
                width / height
            }
        }
    }
}
