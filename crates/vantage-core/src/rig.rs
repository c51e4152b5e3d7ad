//! Host integration for the projection engine
//!
//! The engine itself takes parameters by value and returns matrices by
//! value. `ProjectionRig` is the layer that owns the live state a host
//! application needs around it: the active mode, the editable parameters,
//! the camera, the orbit controls and the render surface. Every accepted
//! edit runs the same sequence: derive the projection, write it into the
//! camera, then resize the surface to the projection's aspect ratio.
//!
//! ## Placement ownership
//!
//! The camera's placement slot has two writers. The orbit controls write it
//! on every [`ProjectionRig::update`]; Isometric mode pins it to a fixed
//! viewpoint. While Isometric is active, orbit updates are suppressed so the
//! two never fight over the slot.

use tracing::{debug, info, warn};

use crate::projection::{ProjectionOutput, compute_projection, viewport_aspect_ratio};
use crate::viewport::{FittedSurface, Surface, Viewport};
use crate::{Camera, OrbitControls, Parameter, ProjectionMode, ProjectionParameters, Result};

/// Live projection state for one camera and one render surface
#[derive(Debug, Clone)]
pub struct ProjectionRig<S: Surface = FittedSurface> {
    mode: ProjectionMode,
    params: ProjectionParameters,
    camera: Camera,
    orbit: OrbitControls,
    surface: S,
    surface_size: (u32, u32),
}

impl ProjectionRig<FittedSurface> {
    /// Create a rig backed by a [`FittedSurface`] of the given size
    pub fn headless(width: u32, height: u32) -> Self {
        Self::new(FittedSurface::new(width, height), (width, height))
    }
}

impl Default for ProjectionRig<FittedSurface> {
    fn default() -> Self {
        Self::headless(1280, 720)
    }
}

impl<S: Surface> ProjectionRig<S> {
    /// Create a rig with default parameters in Perspective mode
    ///
    /// The projection is computed and the orbit placement applied
    /// immediately, so the camera is usable before the first frame.
    pub fn new(surface: S, surface_size: (u32, u32)) -> Self {
        let mut rig = Self {
            mode: ProjectionMode::default(),
            params: ProjectionParameters::default(),
            camera: Camera::new(),
            orbit: OrbitControls::new(),
            surface,
            surface_size,
        };
        rig.orbit.apply(&mut rig.camera);
        rig.recompute();
        rig
    }

    /// Create a rig from stored settings, rejecting invalid parameters
    pub fn with_parameters(
        surface: S,
        surface_size: (u32, u32),
        mode: ProjectionMode,
        params: ProjectionParameters,
    ) -> Result<Self> {
        params.validate()?;

        let mut rig = Self {
            mode,
            params,
            camera: Camera::new(),
            orbit: OrbitControls::new(),
            surface,
            surface_size,
        };
        if rig.orbit_enabled() {
            rig.orbit.apply(&mut rig.camera);
        }
        rig.recompute();
        Ok(rig)
    }

    // ========================================================================
    // State access
    // ========================================================================

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn parameters(&self) -> &ProjectionParameters {
        &self.params
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    /// Mutable orbit controls, for feeding input deltas
    ///
    /// Changes reach the camera on the next [`update`](Self::update),
    /// unless Isometric mode is active.
    pub fn orbit_mut(&mut self) -> &mut OrbitControls {
        &mut self.orbit
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// Current drawable region of the surface
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    /// Aspect ratio the surface is fitted to
    pub fn viewport_aspect_ratio(&self) -> f32 {
        viewport_aspect_ratio(self.mode, &self.params)
    }

    /// Whether orbit input currently reaches the camera
    pub fn orbit_enabled(&self) -> bool {
        !self.mode.overrides_placement()
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Switch projection mode and recompute
    ///
    /// Leaving Isometric hands the placement back to the orbit controls
    /// straight away.
    pub fn set_mode(&mut self, mode: ProjectionMode) -> ProjectionOutput {
        if mode != self.mode {
            info!(from = %self.mode, to = %mode, "switching projection mode");
            let was_pinned = self.mode.overrides_placement();
            self.mode = mode;
            if was_pinned && self.orbit_enabled() {
                self.orbit.apply(&mut self.camera);
            }
        }
        self.recompute()
    }

    /// Edit one parameter and recompute
    ///
    /// Invalid values are rejected and the previous parameters stay in
    /// force; nothing is recomputed in that case.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) -> Result<ProjectionOutput> {
        let candidate = self.params.with(parameter, value).inspect_err(|err| {
            warn!(%parameter, value, %err, "rejected parameter edit");
        })?;

        self.params = candidate;
        Ok(self.recompute())
    }

    /// Replace the whole parameter record and recompute
    pub fn set_parameters(&mut self, params: ProjectionParameters) -> Result<ProjectionOutput> {
        params.validate().inspect_err(|err| {
            warn!(%err, "rejected parameter record");
        })?;

        self.params = params;
        Ok(self.recompute())
    }

    /// Restore default parameters and orbit, keeping the active mode
    pub fn reset(&mut self) -> ProjectionOutput {
        self.params = ProjectionParameters::default();
        self.orbit.reset();
        if self.orbit_enabled() {
            self.orbit.apply(&mut self.camera);
        }
        self.recompute()
    }

    /// Derive the projection, write it into the camera, refit the surface
    pub fn recompute(&mut self) -> ProjectionOutput {
        let output = compute_projection(self.mode, &self.params);

        self.camera.set_projection(output.matrix);
        if let Some(placement) = output.placement {
            self.camera.set_placement(placement);
        }

        let aspect = self.viewport_aspect_ratio();
        let (width, height) = self.surface_size;
        self.surface.resize(width, height, aspect);

        debug!(mode = %self.mode, aspect, "recomputed projection");
        output
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Handle a surface resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
        let aspect = self.viewport_aspect_ratio();
        self.surface.resize(width, height, aspect);
    }

    /// Per-frame update: let the orbit controls drive the placement
    ///
    /// Skipped in Isometric mode, where the placement is fixed.
    pub fn update(&mut self) {
        if self.orbit_enabled() {
            self.orbit.apply(&mut self.camera);
        }
    }
}
