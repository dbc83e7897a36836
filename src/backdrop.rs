use crate::config::MotionPreference;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::particle::{initialize, Parameters, Particle, Particles, Viewport};
use crate::physics::{advance, Pointer};
use crate::render::{render, ColorPair, Surface};
use crate::schedule::{FrameHandle, FrameScheduler};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Stopped,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// One animated particle backdrop: the particle set plus the loop driving it.
///
/// The backdrop never owns a timer. It asks its scheduler for a frame and
/// waits for the host to hand that frame back through [`Backdrop::on_frame`].
/// At most one frame is outstanding at any time.
pub struct Backdrop<S: FrameScheduler> {
    parameters: Parameters,
    viewport: Viewport,
    particles: Particles,
    pointer: Pointer,
    state: State,
    pending: Option<FrameHandle>,
    scheduler: S,
    resize: Debouncer<Viewport>,
    rng: StdRng,
    frames: u64,
}

impl<S: FrameScheduler> Backdrop<S> {
    pub fn new(viewport: Viewport, parameters: Parameters, scheduler: S, mut rng: StdRng) -> Self {
        let particles = initialize(viewport, &parameters, &mut rng);
        let resize = Debouncer::new(parameters.resize_debounce);
        Backdrop {
            parameters,
            viewport,
            particles,
            pointer: Pointer::Absent,
            state: State::Stopped,
            pending: None,
            scheduler,
            resize,
            rng,
            frames: 0,
        }
    }

    /// Returns `false` when the loop was already running.
    pub fn start(&mut self) -> bool {
        if self.state == State::Running {
            return false;
        }
        self.state = State::Running;
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.schedule());
        }
        debug!("backdrop started");
        true
    }

    /// Returns `false` when the loop was already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == State::Stopped {
            return false;
        }
        self.state = State::Stopped;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        debug!("backdrop stopped after {} frames", self.frames);
        true
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Visible => self.start(),
            Visibility::Hidden => self.stop(),
        };
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Pointer::At { x, y };
    }

    pub fn pointer_left(&mut self) {
        self.pointer = Pointer::Absent;
    }

    /// Records a new viewport size. It takes effect through
    /// [`Backdrop::settle`] once resizing has been quiet for the debounce
    /// interval.
    pub fn resize(&mut self, viewport: Viewport, now: Instant) {
        self.resize.push(viewport, now);
    }

    /// Applies a pending resize whose debounce interval has elapsed. The
    /// particle set is regenerated for the new size, not rescaled.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.resize.take_due(now) {
            Some(viewport) => {
                self.viewport = viewport;
                self.particles = initialize(viewport, &self.parameters, &mut self.rng);
                debug!(
                    "resized to {}x{}, {} particles",
                    viewport.width,
                    viewport.height,
                    self.particles.len()
                );
                true
            }
            None => false,
        }
    }

    /// Runs one frame if `handle` is the outstanding one, then schedules the
    /// next. Stale or cancelled handles are ignored and return `false`.
    pub fn on_frame<C: Surface + ?Sized>(
        &mut self,
        handle: FrameHandle,
        surface: &mut C,
        colors: &ColorPair,
    ) -> bool {
        if self.state != State::Running || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        advance(&mut self.particles, self.pointer, self.viewport, &self.parameters);
        render(surface, &self.particles, self.viewport, colors, &self.parameters);
        self.frames += 1;

        self.pending = Some(self.scheduler.schedule());
        true
    }

    /// Draws the current particles without advancing them.
    pub fn redraw<C: Surface + ?Sized>(&self, surface: &mut C, colors: &ColorPair) {
        render(surface, &self.particles, self.viewport, colors, &self.parameters);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Sets up a running backdrop, or nothing at all.
///
/// With reduced motion neither `acquire_context` nor the scheduler is
/// touched. A failed context acquisition is final: the caller gets `None`
/// and the effect simply stays off.
pub fn init<S, F>(
    motion: MotionPreference,
    acquire_context: F,
    parameters: Parameters,
    scheduler: S,
) -> Option<Backdrop<S>>
where
    S: FrameScheduler,
    F: FnOnce() -> Result<Viewport>,
{
    init_with_rng(motion, acquire_context, parameters, scheduler, StdRng::from_entropy())
}

pub fn init_with_rng<S, F>(
    motion: MotionPreference,
    acquire_context: F,
    parameters: Parameters,
    scheduler: S,
    rng: StdRng,
) -> Option<Backdrop<S>>
where
    S: FrameScheduler,
    F: FnOnce() -> Result<Viewport>,
{
    if motion.is_reduced() {
        info!("reduced motion requested, backdrop disabled");
        return None;
    }

    let viewport = match acquire_context() {
        Ok(viewport) => viewport,
        Err(err) => {
            warn!("backdrop disabled: {}", err);
            return None;
        }
    };

    let mut backdrop = Backdrop::new(viewport, parameters, scheduler, rng);
    info!(
        "backdrop ready: {}x{}, {} particles",
        viewport.width,
        viewport.height,
        backdrop.particles.len()
    );
    backdrop.start();
    Some(backdrop)
}
