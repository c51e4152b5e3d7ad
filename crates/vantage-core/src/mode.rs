//! Projection mode selector

use serde::{Deserialize, Serialize};

use crate::Error;

/// Which derivation branch the projection engine runs
///
/// Exactly one mode is active at a time. Switching is instantaneous: the
/// next recomputation simply takes the other branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Symmetric frustum driven by vertical field of view and aspect ratio
    #[default]
    Perspective,

    /// Parallel projection of a width x height box
    Orthographic,

    /// Orthographic projection seen from the fixed isometric viewpoint
    Isometric,
}

impl ProjectionMode {
    /// All modes, in the order a UI would list them
    pub const ALL: [Self; 3] = [Self::Perspective, Self::Orthographic, Self::Isometric];

    /// Parse a mode from a string
    ///
    /// Accepts case-insensitive names: "perspective" (or "persp"),
    /// "orthographic" (or "ortho"), "isometric" (or "iso").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "perspective" | "persp" => Some(Self::Perspective),
            "orthographic" | "ortho" => Some(Self::Orthographic),
            "isometric" | "iso" => Some(Self::Isometric),
            _ => None,
        }
    }

    /// Get all available mode names
    pub fn all_names() -> &'static [&'static str] {
        &["perspective", "orthographic", "isometric"]
    }

    /// Whether this mode uses the orthographic view volume
    pub fn is_orthographic(self) -> bool {
        matches!(self, Self::Orthographic | Self::Isometric)
    }

    /// Whether this mode pins the camera to a fixed placement
    pub fn overrides_placement(self) -> bool {
        matches!(self, Self::Isometric)
    }
}

impl std::str::FromStr for ProjectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

impl std::fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Perspective => "perspective",
            Self::Orthographic => "orthographic",
            Self::Isometric => "isometric",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!(ProjectionMode::parse("perspective"), Some(ProjectionMode::Perspective));
        assert_eq!(ProjectionMode::parse("ORTHO"), Some(ProjectionMode::Orthographic));
        assert_eq!(ProjectionMode::parse(" iso "), Some(ProjectionMode::Isometric));
        assert_eq!(ProjectionMode::parse("fisheye"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "fisheye".parse::<ProjectionMode>().unwrap_err();
        assert_eq!(err, Error::UnknownMode("fisheye".to_string()));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in ProjectionMode::ALL {
            assert_eq!(ProjectionMode::parse(&mode.to_string()), Some(mode));
        }
    }

    #[test]
    fn test_default_is_perspective() {
        assert_eq!(ProjectionMode::default(), ProjectionMode::Perspective);
        assert!(!ProjectionMode::Perspective.is_orthographic());
        assert!(ProjectionMode::Isometric.is_orthographic());
        assert!(ProjectionMode::Isometric.overrides_placement());
        assert!(!ProjectionMode::Orthographic.overrides_placement());
    }
}
