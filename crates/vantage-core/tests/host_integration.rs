//! Host-facing behaviour of `ProjectionRig` with a custom surface

#![allow(clippy::unwrap_used)]

use vantage_core::prelude::*;

/// Surface that records every resize request
#[derive(Debug, Default)]
struct RecordingSurface {
    calls: Vec<(u32, u32, f32)>,
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32, desired_aspect: f32) {
        self.calls.push((width, height, desired_aspect));
    }

    fn viewport(&self) -> Viewport {
        self.calls
            .last()
            .map(|&(w, h, aspect)| Viewport::fit(w, h, aspect))
            .unwrap_or_default()
    }
}

#[test]
fn every_edit_resizes_the_surface() {
    let mut rig = ProjectionRig::new(RecordingSurface::default(), (1024, 768));
    assert_eq!(rig.surface().calls.len(), 1);

    rig.set_parameter(Parameter::Aspect, 1.25).unwrap();
    rig.set_mode(ProjectionMode::Orthographic);
    rig.set_parameter(Parameter::OrthoWidth, 450.196).unwrap();

    let calls = &rig.surface().calls;
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[1], (1024, 768, 1.25));
    assert_eq!(calls[2], (1024, 768, 800.0 / 450.196));
    assert_eq!(calls[3], (1024, 768, 1.0));
}

#[test]
fn rejected_edit_does_not_resize() {
    let mut rig = ProjectionRig::new(RecordingSurface::default(), (1024, 768));
    assert!(rig.set_parameter(Parameter::Fov, 200.0).is_err());
    assert!(rig.set_parameter(Parameter::OrthoHeight, -1.0).is_err());
    assert_eq!(rig.surface().calls.len(), 1);
}

#[test]
fn window_resize_keeps_projection_aspect() {
    let mut rig = ProjectionRig::new(RecordingSurface::default(), (1024, 768));
    rig.resize(2560, 1080);

    assert_eq!(rig.surface_size(), (2560, 1080));
    assert_eq!(rig.surface().calls.last(), Some(&(2560, 1080, 1.777)));

    let viewport = rig.viewport();
    assert!(viewport.x > 0.0);
    assert_eq!(viewport.height, 1080.0);
}

#[test]
fn stored_settings_restore_mode_and_parameters() {
    let params = ProjectionParameters {
        ortho_width: 640.0,
        ortho_height: 480.0,
        ..Default::default()
    };
    let rig = ProjectionRig::with_parameters(
        RecordingSurface::default(),
        (800, 600),
        ProjectionMode::Isometric,
        params,
    )
    .unwrap();

    assert_eq!(rig.mode(), ProjectionMode::Isometric);
    assert_eq!(rig.surface().calls, vec![(800, 600, 640.0 / 480.0)]);
    assert_eq!(rig.camera().placement(), isometric_placement());
    assert_eq!(rig.viewport_aspect_ratio(), 640.0 / 480.0);
    assert_eq!(
        rig.camera().projection_matrix(),
        OrthoVolume::new(640.0, 480.0, 1.0, 2000.0).matrix()
    );
}

#[test]
fn reset_restores_defaults_but_keeps_mode() {
    let mut rig = ProjectionRig::headless(1280, 720);
    rig.set_mode(ProjectionMode::Orthographic);
    rig.set_parameter(Parameter::OrthoWidth, 100.0).unwrap();
    rig.orbit_mut().orbit(0.5, 0.5);
    rig.update();

    rig.reset();
    assert_eq!(rig.mode(), ProjectionMode::Orthographic);
    assert_eq!(rig.parameters(), &ProjectionParameters::default());
    assert_eq!(rig.camera().placement(), OrbitControls::default().placement());
}
