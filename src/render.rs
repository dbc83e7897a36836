use crate::particle::{Parameters, Particle, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.max(0.0).min(1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

/// The two theme colors the backdrop draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
    pub dot: Rgb,
    pub line: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// A 2D drawable the renderer paints onto.
pub trait Surface {
    fn clear(&mut self, viewport: Viewport);
    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32);
    fn dot(&mut self, center: Point, radius: f32, color: Rgba);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
    },
    Dot {
        center: Point,
        radius: f32,
        color: Rgba,
    },
}

/// Surface that records draw commands for later replay. Clearing it drops
/// whatever was recorded before.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
    }

    pub fn dots(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Dot { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, viewport: Viewport) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn dot(&mut self, center: Point, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Dot {
            center,
            radius,
            color,
        });
    }
}

/// Draws one frame: connection lines first, then the particles on top.
///
/// Pairs are tested exhaustively, which stays cheap only while
/// `max_particles` is small.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    viewport: Viewport,
    colors: &ColorPair,
    parameters: &Parameters,
) {
    surface.clear(viewport);

    let threshold = parameters.connection_distance;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < threshold {
                let alpha = parameters.line_opacity * (1.0 - distance / threshold);
                surface.line(
                    Point::new(a.x, a.y),
                    Point::new(b.x, b.y),
                    colors.line.with_alpha(alpha),
                    parameters.line_width,
                );
            }
        }
    }

    let fill = colors.dot.with_alpha(parameters.dot_opacity);
    for particle in particles {
        surface.dot(Point::new(particle.x, particle.y), particle.radius, fill);
    }
}
