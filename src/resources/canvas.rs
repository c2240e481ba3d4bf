//! Render-surface dimensions derived from [`EngineConfig`].

use crate::components::vector::Vector;
use crate::resources::engineconfig::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Landscape (or square) ratios keep the configured width, portrait
    /// ratios keep the configured height; the other side follows the ratio.
    ///
    /// Degenerate sizes are not rejected and yield NaN or infinite dimensions.
    pub fn from_config(config: &EngineConfig) -> Self {
        let aspect = config.effective_aspect_ratio();
        if aspect >= 1.0 {
            Self::new(config.width, config.width / aspect)
        } else {
            Self::new(config.height * aspect, config.height)
        }
    }

    pub fn center(&self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn landscape_keeps_width() {
        let cfg = EngineConfig::new().with_size(800.0, 800.0).with_aspect_ratio(2.0);
        assert_eq!(Canvas::from_config(&cfg), Canvas::new(800.0, 400.0));
    }

    #[test]
    fn portrait_keeps_height() {
        let cfg = EngineConfig::new()
            .with_size(1920.0, 800.0)
            .with_aspect_ratio(9.0 / 16.0);
        assert_eq!(Canvas::from_config(&cfg), Canvas::new(450.0, 800.0));
    }

    #[test]
    fn derived_ratio_reproduces_requested_size() {
        let cfg = EngineConfig::new().with_size(640.0, 360.0);
        let canvas = Canvas::from_config(&cfg);
        assert!(approx_eq(canvas.width, 640.0));
        assert!(approx_eq(canvas.height, 360.0));
        assert_eq!(canvas.center(), Vector::new(canvas.width / 2.0, canvas.height / 2.0));
    }

    #[test]
    fn zero_height_is_not_validated() {
        let cfg = EngineConfig::new().with_size(100.0, 0.0);
        let canvas = Canvas::from_config(&cfg);
        // aspect = inf, so the height collapses to 100 / inf
        assert_eq!(canvas.width, 100.0);
        assert_eq!(canvas.height, 0.0);
    }
}
