//! The scalar overlay driver: owns the heatmap pixel buffer and decides
//! when the rasterizer runs.

use std::time::Instant;

use tracing::debug;

use field_model::{project_scalar_samples, Projection, ScalarKind, Viewport};
use field_render::{
    fill_scalar_field, temperature_scale, wind_speed_scale, ColorScale,
};

use crate::config::OverlayConfig;
use crate::schedule::Debouncer;
use crate::source::DataSource;

/// Driver for an interpolated scalar field overlay (temperature by
/// default, any [`ScalarKind`] in principle).
///
/// Owns an RGBA buffer sized to the viewport. Redraws on new data, on a
/// debounced viewport change, on becoming visible, and on a forecast hour
/// change; hiding clears the buffer to fully transparent.
pub struct ScalarOverlay {
    kind: ScalarKind,
    scale: ColorScale,
    viewport: Viewport,
    pixels: Vec<u8>,
    visible: bool,
    config: OverlayConfig,
    debounce: Debouncer,
    pending_viewport: Option<Viewport>,
    render_count: u64,
}

impl ScalarOverlay {
    pub fn new(kind: ScalarKind, scale: ColorScale, viewport: Viewport, config: OverlayConfig) -> Self {
        let debounce = Debouncer::new(config.debounce_window());
        Self {
            kind,
            scale,
            viewport,
            pixels: vec![0; viewport.rgba_len()],
            visible: false,
            config,
            debounce,
            pending_viewport: None,
            render_count: 0,
        }
    }

    /// The temperature overlay, the instantiation the map actually ships.
    pub fn temperature(viewport: Viewport, config: OverlayConfig) -> Self {
        Self::new(ScalarKind::Temperature, temperature_scale(), viewport, config)
    }

    /// A wind speed heatmap; unused by the map today but exercised by the
    /// snapshot tool.
    pub fn wind_speed(viewport: Viewport, config: OverlayConfig) -> Self {
        Self::new(ScalarKind::WindSpeed, wind_speed_scale(), viewport, config)
    }

    /// Toggle visibility. Becoming visible renders immediately; hiding
    /// clears the buffer and drops any pending debounce.
    pub fn set_visible(&mut self, visible: bool, source: &DataSource, projection: &dyn Projection) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;

        if visible {
            self.render(source, projection);
        } else {
            self.pixels.fill(0);
            self.debounce.cancel();
            self.pending_viewport = None;
        }
    }

    /// New observations or forecast data arrived.
    pub fn on_data(&mut self, source: &DataSource, projection: &dyn Projection) {
        if self.visible {
            self.render(source, projection);
        }
    }

    /// The selected forecast hour changed. The hour lives in the source;
    /// the driver only needs to redraw.
    pub fn on_hour_changed(&mut self, source: &DataSource, projection: &dyn Projection) {
        self.on_data(source, projection);
    }

    /// A viewport pan/zoom/resize event. Coalesced by the trailing-edge
    /// debounce; the render happens in [`Self::tick`] once the burst ends.
    pub fn viewport_changed(&mut self, viewport: Viewport, now: Instant) {
        self.pending_viewport = Some(viewport);
        self.debounce.trigger(now);
    }

    /// Poll the debouncer. Applies the last viewport of a burst and
    /// re-renders; returns whether a render happened.
    pub fn tick(&mut self, now: Instant, source: &DataSource, projection: &dyn Projection) -> bool {
        if !self.debounce.fire(now) {
            return false;
        }

        if let Some(viewport) = self.pending_viewport.take() {
            self.viewport = viewport;
            self.pixels = vec![0; viewport.rgba_len()];
        }
        if self.visible {
            self.render(source, projection);
            return true;
        }
        false
    }

    fn render(&mut self, source: &DataSource, projection: &dyn Projection) {
        if self.viewport.is_empty() {
            return;
        }

        let observations = source.current();
        let samples = project_scalar_samples(&observations, self.kind, projection);

        debug!(
            kind = ?self.kind,
            samples = samples.len(),
            render = self.render_count + 1,
            "rendering scalar overlay"
        );

        self.pixels.fill(0);
        fill_scalar_field(
            &mut self.pixels,
            self.viewport,
            &samples,
            &self.scale,
            &self.config.heatmap,
        );
        self.render_count += 1;
    }

    /// The RGBA buffer the host composites.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Diagnostic counter: how many times the rasterizer actually ran.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}
