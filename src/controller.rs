//! Fire controller - the render loop step
//!
//! Owns the renderer, the debouncer and the consumer end of the edge queue.
//! Being the only owner of the frame buffer, random stream and debounce
//! state, it serialises flicker frames and flame-ups without any locking.

use embassy_time::Instant;
use log::{debug, info, warn};

use crate::StripDriver;
use crate::channel::EdgeReceiver;
use crate::color::Rgb;
use crate::config::{ConfigError, FireConfig};
use crate::debounce::{SensorDebouncer, SignalPin};
use crate::entropy::Entropy;
use crate::frame_scheduler::{FlickerScheduler, FrameResult};
use crate::renderer::FireRenderer;
use crate::trigger::FlameUpPolicy;

/// Result of handling one queued edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// Debounced to the active level and the big flame played
    FlameUp,
    /// Debounced to the active level but the roll lost
    Skipped,
    /// Debounced back to the idle level
    Bounce,
    /// The signal never settled
    Unsettled,
    /// Arrived while the previous flame-up was still pausing
    HeldOff,
    /// Reported for a pin other than the sensor's
    OtherPin,
}

/// Counters for what the controller has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    pub frames: u32,
    pub flame_ups: u32,
    pub ambient_flares: u32,
    pub bounces: u32,
    pub skipped: u32,
    pub held_off: u32,
    pub other_pin: u32,
}

/// Drives the fire: flicker frames on schedule, flame-ups on sensor edges
pub struct FireController<'a, D, E, P, const MAX_LEDS: usize, const QUEUE_SIZE: usize>
where
    D: StripDriver,
    E: Entropy,
    P: SignalPin,
{
    // External dependencies
    renderer: FireRenderer<D, E, MAX_LEDS>,
    debouncer: SensorDebouncer<P>,
    edges: EdgeReceiver<'a, QUEUE_SIZE>,

    // Configuration
    signal_pin: u8,
    base_color: Rgb,
    flame_up: FlameUpPolicy,
    ambient_flare: Option<FlameUpPolicy>,

    // Internal state
    scheduler: FlickerScheduler,
    edges_resume_at: Instant,
    stats: ControllerStats,
}

impl<'a, D, E, P, const MAX_LEDS: usize, const QUEUE_SIZE: usize>
    FireController<'a, D, E, P, MAX_LEDS, QUEUE_SIZE>
where
    D: StripDriver,
    E: Entropy,
    P: SignalPin,
{
    /// Validate the configuration and wire everything together
    pub fn new(
        driver: D,
        pin: P,
        entropy: E,
        edges: EdgeReceiver<'a, QUEUE_SIZE>,
        config: &FireConfig,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        config.validate(MAX_LEDS)?;
        let renderer = FireRenderer::new(driver, entropy, config)?;
        let debouncer = SensorDebouncer::new(pin, config.debounce, now)?;
        info!(
            "fire on {} LEDs, sensor on GPIO {}",
            config.strip_length, config.signal_pin
        );

        Ok(Self {
            renderer,
            debouncer,
            edges,
            signal_pin: config.signal_pin,
            base_color: config.base_color,
            flame_up: config.flame_up,
            ambient_flare: config.ambient_flare,
            scheduler: FlickerScheduler::new(config.flicker),
            edges_resume_at: now,
            stats: ControllerStats::default(),
        })
    }

    /// Process one loop iteration
    ///
    /// Handles every queued edge first (a flame-up blocks here until its
    /// clear has been flushed), then renders a flicker frame if one is due.
    /// Once the previous frame has been shown for its interval, the ambient
    /// flare is rolled before the next frame replaces it.
    ///
    /// `now` is the caller's time base; the flame-up hold-off and the
    /// frame deadlines are all measured in it. The caller sleeps for the
    /// returned duration before ticking again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        self.process_edges(now);

        if !self.scheduler.is_due(now) {
            return self.scheduler.pending(now);
        }

        if self.stats.frames > 0 {
            self.roll_ambient_flare();
        }
        self.render_flicker();
        self.scheduler.advance(now, self.renderer.entropy_mut())
    }

    /// Handle all pending edge events (blocking while debouncing and flaming)
    pub fn process_edges(&mut self, now: Instant) {
        while let Some(edge) = self.edges.try_receive() {
            debug!("edge on pin {} at {} ms", edge.pin, edge.at.as_millis());
            let outcome = if edge.pin == self.signal_pin {
                self.handle_edge(now)
            } else {
                self.stats.other_pin += 1;
                EdgeOutcome::OtherPin
            };
            debug!("edge handled: {:?}", outcome);
        }
    }

    fn handle_edge(&mut self, now: Instant) -> EdgeOutcome {
        if now < self.edges_resume_at {
            self.stats.held_off += 1;
            return EdgeOutcome::HeldOff;
        }

        let level = match self.debouncer.debounce() {
            Ok(level) => level,
            Err(err) => {
                warn!("{}", err);
                return EdgeOutcome::Unsettled;
            }
        };

        if !self.debouncer.is_active(level) {
            info!("debounced, no vibration");
            self.stats.bounces += 1;
            return EdgeOutcome::Bounce;
        }

        info!("vibration detected");
        let Some(plan) = self.flame_up.roll(self.renderer.entropy_mut()) else {
            self.stats.skipped += 1;
            return EdgeOutcome::Skipped;
        };

        // Failed writes are logged by the renderer
        let _ = self.renderer.big_flame(plan.request);
        self.stats.flame_ups += 1;

        // Edges queued while the flame was showing belong to the same shake
        let discarded = self.edges.discard_pending();
        if discarded > 0 {
            debug!("discarded {} edges queued during the flame", discarded);
        }
        self.edges_resume_at = now + plan.request.duration + plan.pause;
        EdgeOutcome::FlameUp
    }

    fn render_flicker(&mut self) {
        let _ = self.renderer.draw(self.base_color);
        self.stats.frames += 1;
    }

    fn roll_ambient_flare(&mut self) {
        let Some(policy) = self.ambient_flare else {
            return;
        };
        if let Some(plan) = policy.roll(self.renderer.entropy_mut()) {
            debug!("ambient flare for {} ms", plan.request.duration.as_millis());
            let _ = self.renderer.big_flame(plan.request);
            self.stats.ambient_flares += 1;
        }
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    pub fn renderer(&self) -> &FireRenderer<D, E, MAX_LEDS> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut FireRenderer<D, E, MAX_LEDS> {
        &mut self.renderer
    }

    pub fn debouncer(&self) -> &SensorDebouncer<P> {
        &self.debouncer
    }

    /// Change the base color of subsequent flicker frames
    pub fn set_base_color(&mut self, color: Rgb) {
        self.base_color = color;
    }

    /// Clear the strip and release the driver
    ///
    /// Also happens automatically when the controller is dropped.
    pub fn shutdown(mut self) {
        self.renderer.shutdown();
    }
}
