//! Fitting the drawable region to the projection's aspect ratio

/// Drawable rectangle inside a render surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport covering the whole surface
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Largest centred rectangle of the given aspect ratio
    ///
    /// Wider surfaces get bars left and right (pillarbox), taller ones get
    /// bars top and bottom (letterbox). A degenerate surface or aspect falls
    /// back to the full surface.
    pub fn fit(width: u32, height: u32, aspect: f32) -> Self {
        if width == 0 || height == 0 || !aspect.is_finite() || aspect <= 0.0 {
            return Self::full(width, height);
        }

        let surface_width = width as f32;
        let surface_height = height as f32;

        if surface_width / surface_height > aspect {
            let fitted_width = surface_height * aspect;
            Self {
                x: (surface_width - fitted_width) / 2.0,
                y: 0.0,
                width: fitted_width,
                height: surface_height,
            }
        } else {
            let fitted_height = surface_width / aspect;
            Self {
                x: 0.0,
                y: (surface_height - fitted_height) / 2.0,
                width: surface_width,
                height: fitted_height,
            }
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// Render surface that can be resized to a target aspect ratio
pub trait Surface {
    /// Resize to `width` x `height`, constraining drawing to `desired_aspect`
    fn resize(&mut self, width: u32, height: u32, desired_aspect: f32);

    /// Current drawable region
    fn viewport(&self) -> Viewport;
}

/// A surface that only tracks its size and fitted viewport
///
/// Useful for headless hosts and tests; windowed hosts implement
/// [`Surface`] on their own renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSurface {
    pub width: u32,
    pub height: u32,
    viewport: Viewport,
}

impl FittedSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            viewport: Viewport::full(width, height),
        }
    }
}

impl Default for FittedSurface {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl Surface for FittedSurface {
    fn resize(&mut self, width: u32, height: u32, desired_aspect: f32) {
        self.width = width;
        self.height = height;
        self.viewport = Viewport::fit(width, height, desired_aspect);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pillarbox_on_wide_surface() {
        let viewport = Viewport::fit(2000, 1000, 1.0);
        assert_eq!(viewport.width, 1000.0);
        assert_eq!(viewport.height, 1000.0);
        assert_eq!(viewport.x, 500.0);
        assert_eq!(viewport.y, 0.0);
    }

    #[test]
    fn test_letterbox_on_tall_surface() {
        let viewport = Viewport::fit(1600, 1600, 16.0 / 9.0);
        assert_eq!(viewport.width, 1600.0);
        assert_abs_diff_eq!(viewport.height, 900.0, epsilon = 1e-3);
        assert_abs_diff_eq!(viewport.y, 350.0, epsilon = 1e-3);
        assert_abs_diff_eq!(viewport.aspect_ratio(), 16.0 / 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_inputs_use_full_surface() {
        assert_eq!(Viewport::fit(640, 480, 0.0), Viewport::full(640, 480));
        assert_eq!(Viewport::fit(640, 480, f32::NAN), Viewport::full(640, 480));
        assert_eq!(Viewport::fit(0, 480, 1.0), Viewport::full(0, 480));
    }

    #[test]
    fn test_fitted_surface_tracks_resize() {
        let mut surface = FittedSurface::default();
        surface.resize(1000, 500, 1.0);
        assert_eq!(surface.width, 1000);
        assert_eq!(surface.viewport().width, 500.0);
    }
}
