use crate::particle::{Parameters, Particle, Viewport};

/// Last known pointer position over the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pointer {
    Absent,
    At { x: f32, y: f32 },
}

impl Default for Pointer {
    fn default() -> Self {
        Pointer::Absent
    }
}

/// Advances every particle by one frame.
///
/// Pointer repulsion is applied first, then the position is integrated with
/// the resulting velocity. The velocity is clamped and damped afterwards, so
/// the clamp bounds what the next frame moves by. Positions wrap around the
/// viewport edges.
pub fn advance(
    particles: &mut [Particle],
    pointer: Pointer,
    viewport: Viewport,
    parameters: &Parameters,
) {
    let width = viewport.width as f32;
    let height = viewport.height as f32;
    let limit = parameters.velocity_limit();

    for particle in particles.iter_mut() {
        if let Pointer::At { x, y } = pointer {
            let dx = particle.x - x;
            let dy = particle.y - y;
            let distance = (dx * dx + dy * dy).sqrt();
            // a particle sitting on the pointer has no direction to flee in
            if distance > 0.0 && distance < parameters.pointer_radius {
                particle.vx += dx / distance * parameters.repulsion;
                particle.vy += dy / distance * parameters.repulsion;
            }
        }

        particle.x += particle.vx;
        particle.y += particle.vy;

        particle.vx = particle.vx.max(-limit).min(limit) * parameters.damping;
        particle.vy = particle.vy.max(-limit).min(limit) * parameters.damping;

        particle.x = wrap(particle.x, width);
        particle.y = wrap(particle.y, height);
    }
}

/// Wraps `v` into `[0, max)`.
pub fn wrap(v: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    if v >= 0.0 && v < max {
        return v;
    }
    let wrapped = v - (v / max).floor() * max;
    // rounding can land exactly on `max` for tiny negative inputs
    if wrapped >= max || wrapped < 0.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::initialize;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            radius: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn pointer_below_pushes_particle_up() {
        let parameters = Parameters::default();
        let viewport = Viewport::new(800, 600);
        let mut particles = vec![still(100.0, 100.0)];

        advance(
            &mut particles,
            Pointer::At { x: 100.0, y: 140.0 },
            viewport,
            &parameters,
        );

        assert!(particles[0].vy < 0.0);
        assert_eq!(particles[0].vx, 0.0);
    }

    #[test]
    fn particle_on_pointer_gets_no_push() {
        let parameters = Parameters::default();
        let mut particles = vec![still(100.0, 100.0)];

        advance(
            &mut particles,
            Pointer::At { x: 100.0, y: 100.0 },
            Viewport::new(800, 600),
            &parameters,
        );

        assert_eq!(particles[0], still(100.0, 100.0));
    }

    #[test]
    fn absent_or_distant_pointer_applies_no_force() {
        let parameters = Parameters::default();
        let viewport = Viewport::new(800, 600);
        for &pointer in [Pointer::Absent, Pointer::At { x: 500.0, y: 500.0 }].iter() {
            let mut particles = vec![still(100.0, 100.0)];
            advance(&mut particles, pointer, viewport, &parameters);
            assert_eq!(particles[0], still(100.0, 100.0));
        }
    }

    #[test]
    fn leaving_an_edge_reenters_the_opposite_one() {
        let parameters = Parameters::default();
        let viewport = Viewport::new(800, 600);
        let mut particles = vec![
            Particle {
                x: 0.2,
                y: 300.0,
                vx: -0.5,
                vy: 0.0,
                radius: 1.0,
            },
            Particle {
                x: 400.0,
                y: 599.9,
                vx: 0.0,
                vy: 0.5,
                radius: 1.0,
            },
        ];

        advance(&mut particles, Pointer::Absent, viewport, &parameters);

        assert!(particles[0].x > 799.0 && particles[0].x < 800.0);
        assert_eq!(particles[0].y, 300.0);
        assert!(particles[0].vx < 0.0);
        assert!(particles[1].y >= 0.0 && particles[1].y < 1.0);
        assert_eq!(particles[1].x, 400.0);
        assert!(particles[1].vy > 0.0);
    }

    #[test]
    fn velocity_is_clamped_then_damped() {
        let parameters = Parameters::default();
        let mut particles = vec![Particle {
            x: 10.0,
            y: 10.0,
            vx: 30.0,
            vy: -30.0,
            radius: 1.0,
        }];

        advance(&mut particles, Pointer::Absent, Viewport::new(800, 600), &parameters);

        let limit = parameters.velocity_limit() * parameters.damping;
        assert!((particles[0].vx - limit).abs() < 1e-6);
        assert!((particles[0].vy + limit).abs() < 1e-6);
        assert!((particles[0].x - 40.0).abs() < 1e-4);
    }

    #[test]
    fn invariants_hold_over_many_frames() {
        let parameters = Parameters::default();
        let viewport = Viewport::new(640, 480);
        let mut rng = StdRng::seed_from_u64(1234);
        let mut particles = initialize(viewport, &parameters, &mut rng);
        let limit = parameters.velocity_limit();

        for frame in 0..2_000 {
            let pointer = if frame % 7 == 0 {
                Pointer::Absent
            } else {
                Pointer::At {
                    x: rng.gen_range(-50.0..690.0),
                    y: rng.gen_range(-50.0..530.0),
                }
            };
            advance(&mut particles, pointer, viewport, &parameters);

            for particle in &particles {
                assert!(particle.x >= 0.0 && particle.x < 640.0, "{:?}", particle);
                assert!(particle.y >= 0.0 && particle.y < 480.0, "{:?}", particle);
                assert!(particle.vx.abs() <= limit);
                assert!(particle.vy.abs() <= limit);
            }
        }
    }

    #[test]
    fn wrap_stays_half_open() {
        assert_eq!(wrap(-f32::EPSILON / 4.0, 800.0), 0.0);
        assert_eq!(wrap(800.0, 800.0), 0.0);
        assert!((wrap(-0.5, 800.0) - 799.5).abs() < 1e-4);
        assert_eq!(wrap(12.0, 0.0), 0.0);
    }
}
