//! The wind overlay driver: owns the particle system and its per-frame
//! loop, pausing it whenever the work would be invisible or wrong.
//!
//! The simulation stops (not merely hides) when the overlay is toggled
//! off, pauses while the hosting page is hidden, and pauses while the
//! viewport is actively moving, since advecting particles against a stale
//! projection draws trails over the wrong geography. All three conditions
//! feed one [`RunState`] derivation; every transition goes through
//! [`WindOverlay::sync`].

use std::time::Instant;

use tracing::{debug, warn};

use field_model::{Projection, Viewport};
use field_render::{ParticleSystem, WindField};

use crate::config::OverlayConfig;
use crate::schedule::{Debouncer, FrameScheduler, ScheduleToken};
use crate::source::DataSource;
use crate::state::{OverlayInputs, RunState};

/// Driver for the animated wind vector-field overlay.
pub struct WindOverlay<S: FrameScheduler> {
    scheduler: S,
    system: ParticleSystem,
    inputs: OverlayInputs,
    token: Option<ScheduleToken>,
    config: OverlayConfig,
    debounce: Debouncer,
    pending_viewport: Option<Viewport>,
}

impl<S: FrameScheduler> WindOverlay<S> {
    /// Build the driver around a host-supplied scheduler. Pass a seed for
    /// deterministic particle spawns in tests and the snapshot tool.
    pub fn new(viewport: Viewport, config: OverlayConfig, scheduler: S, seed: Option<u64>) -> Self {
        let system = ParticleSystem::new(
            viewport,
            config.device_class,
            config.particles.clone(),
            seed,
        );
        let debounce = Debouncer::new(config.debounce_window());

        Self {
            scheduler,
            system,
            inputs: OverlayInputs::new(),
            token: None,
            config,
            debounce,
            pending_viewport: None,
        }
    }

    /// Toggle the overlay on or off. Enabling computes a fresh wind field
    /// and starts the loop; disabling stops the loop and clears the trail.
    pub fn set_enabled(&mut self, enabled: bool, source: &DataSource, projection: &dyn Projection) {
        self.inputs.enabled = enabled;
        if enabled {
            self.recompute_wind_field(source, projection);
        }
        self.sync();
    }

    /// The hosting page became visible or hidden.
    pub fn set_page_visible(&mut self, visible: bool) {
        self.inputs.page_visible = visible;
        self.sync();
    }

    /// The viewport started moving (drag or zoom gesture).
    pub fn movement_started(&mut self) {
        self.inputs.viewport_moving = true;
        self.sync();
    }

    /// The movement gesture ended. The wind field is recomputed against
    /// the fresh projection before the simulation resumes.
    pub fn movement_ended(&mut self, source: &DataSource, projection: &dyn Projection) {
        self.inputs.viewport_moving = false;
        if self.inputs.enabled {
            self.recompute_wind_field(source, projection);
        }
        self.sync();
    }

    /// New observations or forecast data arrived.
    pub fn on_data(&mut self, source: &DataSource, projection: &dyn Projection) {
        if self.inputs.enabled {
            self.recompute_wind_field(source, projection);
        }
    }

    /// The selected forecast hour changed.
    pub fn on_hour_changed(&mut self, source: &DataSource, projection: &dyn Projection) {
        self.on_data(source, projection);
    }

    /// A viewport resize event, coalesced by the trailing-edge debounce.
    pub fn viewport_changed(&mut self, viewport: Viewport, now: Instant) {
        self.pending_viewport = Some(viewport);
        self.debounce.trigger(now);
    }

    /// Poll the debouncer; applies the last viewport of a burst, respawns
    /// the pool and recomputes the wind field. Returns whether it fired.
    pub fn tick(&mut self, now: Instant, source: &DataSource, projection: &dyn Projection) -> bool {
        if !self.debounce.fire(now) {
            return false;
        }
        if let Some(viewport) = self.pending_viewport.take() {
            self.system.resize(viewport);
        }
        if self.inputs.enabled {
            self.recompute_wind_field(source, projection);
        }
        true
    }

    /// The host's frame callback. Steps the simulation once and requests
    /// the next frame. A failed tick is logged and skipped; the loop keeps
    /// going.
    pub fn on_frame(&mut self) {
        self.token = None;
        if !self.run_state().is_running() {
            return;
        }

        if let Err(err) = self.system.step() {
            warn!(error = %err, "skipping failed simulation tick");
        }
        self.token = Some(self.scheduler.schedule());
    }

    /// Reconcile the loop with the current inputs. Idempotent: calling it
    /// while already running never creates a second loop, because at most
    /// one token is ever outstanding.
    fn sync(&mut self) {
        let state = self.run_state();
        debug!(?state, "wind overlay state");

        match state {
            RunState::Running => {
                if self.token.is_none() {
                    self.token = Some(self.scheduler.schedule());
                }
            }
            RunState::PausedByVisibility | RunState::PausedByMovement => {
                self.cancel_frame();
            }
            RunState::Stopped => {
                self.cancel_frame();
                self.debounce.cancel();
                self.pending_viewport = None;
                self.system.clear();
                self.system.clear_wind_field();
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(token) = self.token.take() {
            self.scheduler.cancel(token);
        }
    }

    fn recompute_wind_field(&mut self, source: &DataSource, projection: &dyn Projection) {
        let observations = source.current();
        self.system.set_wind_field(WindField::from_observations(
            &observations,
            projection,
            self.config.wind_field.clone(),
        ));
    }

    pub fn run_state(&self) -> RunState {
        self.inputs.run_state()
    }

    /// Straight-alpha RGBA trail buffer for the host to composite.
    pub fn trail_rgba(&self) -> Vec<u8> {
        self.system.trail_rgba()
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
