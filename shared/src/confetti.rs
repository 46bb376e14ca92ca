use std::f64::consts::PI;

use rand::Rng;

pub const CONFETTI_PALETTE: [&str; 5] = ["#FFD700", "#FF6B6B", "#4ECDC4", "#7B68EE", "#FF9A76"];
pub const CONFETTI_PARTICLES: usize = 150;
pub const CONFETTI_DURATION_MS: u32 = 5000;

const GRAVITY: f64 = 1.0;
const DRAG: f64 = 0.99;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: &'static str,
    pub speed: f64,
    pub angle: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(rng: &mut R, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            size: rng.gen::<f64>() * 10.0 + 5.0,
            color: CONFETTI_PALETTE[rng.gen_range(0..CONFETTI_PALETTE.len())],
            speed: rng.gen::<f64>() * 10.0 + 2.0,
            angle: rng.gen::<f64>() * PI * 2.0,
            rotation: rng.gen::<f64>() * PI * 2.0,
            rotation_speed: rng.gen::<f64>() * 0.2 - 0.1,
        }
    }

    fn step(&mut self) {
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed + GRAVITY;
        self.rotation += self.rotation_speed;
        self.speed *= DRAG;
    }

    fn is_visible(&self, width: f64, height: f64) -> bool {
        self.y <= height + self.size && self.x >= -self.size && self.x <= width + self.size
    }
}

/// Particle state for one celebration. Rendering is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct ConfettiBurst {
    particles: Vec<Particle>,
}

impl ConfettiBurst {
    /// Spawns a burst centred on (`x`, `y`).
    pub fn new<R: Rng + ?Sized>(rng: &mut R, x: f64, y: f64) -> Self {
        Self::with_count(rng, x, y, CONFETTI_PARTICLES)
    }

    pub fn with_count<R: Rng + ?Sized>(rng: &mut R, x: f64, y: f64, count: usize) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::spawn(rng, x, y)).collect(),
        }
    }

    /// Advances one frame and drops particles that left the canvas.
    pub fn step(&mut self, width: f64, height: f64) {
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(|particle| particle.is_visible(width, height));
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
