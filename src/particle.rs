use rand::Rng;
use std::convert::TryFrom;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

pub type Particles = Vec<Particle>;

/// Size of the drawable surface in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

/// Tuning constants of the backdrop. These are fixed at build time; the
/// struct exists so a session owns its own copy and tests can bend them.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    pub max_particles: usize,
    /// Square pixels of viewport per particle.
    pub density: u64,
    pub base_speed: f32,
    /// Per-axis velocity cap, as a multiple of `base_speed`.
    pub speed_limit: f32,
    pub damping: f32,
    pub connection_distance: f32,
    pub pointer_radius: f32,
    pub repulsion: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub dot_opacity: f32,
    pub line_opacity: f32,
    pub line_width: f32,
    pub resize_debounce: Duration,
}

impl Parameters {
    pub const DEFAULT: Parameters = Parameters {
        max_particles: 80,
        density: 12_000,
        base_speed: 0.5,
        speed_limit: 2.0,
        damping: 0.999,
        connection_distance: 120.0,
        pointer_radius: 150.0,
        repulsion: 0.15,
        radius_min: 1.0,
        radius_max: 2.5,
        dot_opacity: 0.8,
        line_opacity: 0.35,
        line_width: 1.0,
        resize_debounce: Duration::from_millis(200),
    };

    pub fn velocity_limit(&self) -> f32 {
        self.base_speed * self.speed_limit
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters::DEFAULT
    }
}

pub fn particle_count(viewport: Viewport, parameters: &Parameters) -> usize {
    let fit = viewport.area() / parameters.density.max(1);
    usize::try_from(fit).map_or(parameters.max_particles, |fit| {
        fit.min(parameters.max_particles)
    })
}

/// Builds a fresh particle set for `viewport`.
pub fn initialize<R: Rng + ?Sized>(
    viewport: Viewport,
    parameters: &Parameters,
    rng: &mut R,
) -> Particles {
    let count = particle_count(viewport, parameters);
    let width = viewport.width as f32;
    let height = viewport.height as f32;
    let half_speed = parameters.base_speed / 2.0;

    // a non-zero count implies a non-empty viewport
    (0..count)
        .map(|_| Particle {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            vx: rng.gen_range(-half_speed..=half_speed),
            vy: rng.gen_range(-half_speed..=half_speed),
            radius: rng.gen_range(parameters.radius_min..=parameters.radius_max),
        })
        .collect()
}
