use std::f64::consts::TAU;

use rand::Rng;

use crate::catalog::CatalogItem;

pub const SPEED_MIN: f64 = 0.1;
pub const SPEED_MAX: f64 = 0.3;
pub const RADIUS_MIN: f64 = 2.0;
pub const RADIUS_MAX: f64 = 5.0;
pub const WRAP_MARGIN: f64 = 10.0;
pub const HOVER_DISTANCE: f64 = 20.0;
pub const HOVER_RADIUS_SCALE: f64 = 3.0;
pub const REST_ALPHA: f64 = 150.0;
pub const HOVER_ALPHA: f64 = 255.0;
pub const DEFAULT_SMOOTHING: f64 = 0.1;
pub const LABEL_OFFSET: f64 = 5.0;
pub const LABEL_SIZE_PX: f64 = 14.0;
pub const CANVAS_CORNER_RADIUS_PX: f64 = 15.0;

pub const STAR_COLOR: Rgba = Rgba::new(141, 153, 255, REST_ALPHA);
pub const TRAIL_COLOR: Rgba = Rgba::new(2, 3, 20, 50.0);
pub const LABEL_COLOR: Rgba = Rgba::new(255, 255, 255, 255.0);

/// Colour with alpha on the 0..=255 scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn css(&self) -> String {
        let alpha = (self.a.clamp(0.0, 255.0) / 255.0 * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Drawing surface used by [`ConstellationField::draw`].
pub trait StarCanvas {
    fn fill_background(&mut self, color: Rgba);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
    /// Text centered horizontally on `x`, with its bottom edge on `y`.
    fn fill_label(&mut self, text: &str, x: f64, y: f64, size_px: f64, color: Rgba);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorSettings {
    pub smoothing: f64,
    pub hover_distance: f64,
    pub hover_radius_scale: f64,
    pub rest_alpha: f64,
    pub hover_alpha: f64,
    pub wrap_margin: f64,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            hover_distance: HOVER_DISTANCE,
            hover_radius_scale: HOVER_RADIUS_SCALE,
            rest_alpha: REST_ALPHA,
            hover_alpha: HOVER_ALPHA,
            wrap_margin: WRAP_MARGIN,
        }
    }
}

impl AnimatorSettings {
    fn smoothing_factor(&self) -> f64 {
        if self.smoothing.is_finite() {
            self.smoothing.clamp(f64::EPSILON, 1.0)
        } else {
            DEFAULT_SMOOTHING
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub index: usize,
    pub pos: (f64, f64),
    pub vel: (f64, f64),
    pub base_radius: f64,
    pub radius: f64,
    pub alpha: f64,
}

impl Particle {
    pub fn spawn<R: Rng>(
        index: usize,
        width: f64,
        height: f64,
        settings: &AnimatorSettings,
        rng: &mut R,
    ) -> Self {
        let x = rng.random::<f64>() * width.max(0.0);
        let y = rng.random::<f64>() * height.max(0.0);
        let heading = rng.random::<f64>() * TAU;
        let speed = SPEED_MIN + rng.random::<f64>() * (SPEED_MAX - SPEED_MIN);
        let base_radius = RADIUS_MIN + rng.random::<f64>() * (RADIUS_MAX - RADIUS_MIN);
        Self {
            index,
            pos: (x, y),
            vel: (heading.cos() * speed, heading.sin() * speed),
            base_radius,
            radius: base_radius,
            alpha: settings.rest_alpha,
        }
    }

    fn advance(&mut self, width: f64, height: f64, margin: f64) {
        self.pos.0 += self.vel.0;
        self.pos.1 += self.vel.1;
        self.pos.0 = wrap_axis(self.pos.0, width, margin);
        self.pos.1 = wrap_axis(self.pos.1, height, margin);
    }

    fn ease(&mut self, hovered: bool, settings: &AnimatorSettings) {
        let (target_radius, target_alpha) = if hovered {
            (self.base_radius * settings.hover_radius_scale, settings.hover_alpha)
        } else {
            (self.base_radius, settings.rest_alpha)
        };
        let t = settings.smoothing_factor();
        self.radius = lerp(self.radius, target_radius, t).max(0.0);
        self.alpha = lerp(self.alpha, target_alpha, t).clamp(0.0, 255.0);
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.pos.0 - x;
        let dy = self.pos.1 - y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn label_anchor(&self) -> (f64, f64) {
        (self.pos.0, self.pos.1 - self.radius - LABEL_OFFSET)
    }
}

fn wrap_axis(value: f64, extent: f64, margin: f64) -> f64 {
    if value > extent + margin {
        -margin
    } else if value < -margin {
        extent + margin
    } else {
        value
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// One drifting star per catalog item, index-aligned with the item list.
#[derive(Clone, Debug)]
pub struct ConstellationField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    hovered: Option<usize>,
    frame_count: u64,
    running: bool,
    settings: AnimatorSettings,
}

impl ConstellationField {
    pub fn new<R: Rng>(
        count: usize,
        width: f64,
        height: f64,
        settings: AnimatorSettings,
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|index| Particle::spawn(index, width, height, &settings, rng))
            .collect();
        Self::from_particles(particles, width, height, settings)
    }

    pub fn from_particles(
        particles: Vec<Particle>,
        width: f64,
        height: f64,
        settings: AnimatorSettings,
    ) -> Self {
        Self {
            particles,
            width,
            height,
            hovered: None,
            frame_count: 0,
            running: true,
            settings,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Advances one frame. While paused nothing moves and the frame counter
    /// stays put; the hovered star from the last frame is kept.
    pub fn step(&mut self, pointer: Option<(f64, f64)>) -> Option<usize> {
        if !self.running {
            return self.hovered;
        }
        let settings = self.settings;
        self.hovered = None;
        for particle in &mut self.particles {
            particle.advance(self.width, self.height, settings.wrap_margin);
            let hit = pointer
                .map(|(x, y)| particle.distance_to(x, y) < settings.hover_distance)
                .unwrap_or(false);
            if hit {
                self.hovered = Some(particle.index);
            }
            particle.ease(hit, &settings);
        }
        self.frame_count = self.frame_count.saturating_add(1);
        self.hovered
    }

    pub fn draw<C: StarCanvas + ?Sized>(&self, canvas: &mut C, items: &[CatalogItem]) {
        canvas.fill_background(TRAIL_COLOR);
        for particle in &self.particles {
            canvas.fill_circle(
                particle.pos.0,
                particle.pos.1,
                particle.radius,
                STAR_COLOR.with_alpha(particle.alpha),
            );
        }
        let Some(index) = self.hovered else {
            return;
        };
        let (Some(particle), Some(item)) = (self.particles.get(index), items.get(index)) else {
            return;
        };
        let (x, y) = particle.label_anchor();
        canvas.fill_label(&item.name, x, y, LABEL_SIZE_PX, LABEL_COLOR);
    }
}
