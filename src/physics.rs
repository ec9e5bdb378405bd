//! Bird state and the per-frame gravity integrator.

use crate::geometry::Rect;

/// Velocity gained per frame while falling.
pub const GRAVITY: f64 = 0.4;
/// Velocity set by a flap. Overrides the current velocity outright.
pub const FLAP_VELOCITY: f64 = -6.0;

pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;

#[derive(Debug, Clone)]
pub struct Bird {
    pub rect: Rect,
    /// Vertical velocity, positive downward.
    pub vy: f64,
}

impl Bird {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            rect: Rect::new(x, y, BIRD_WIDTH, BIRD_HEIGHT),
            vy: 0.0,
        }
    }

    /// One integration step: gravity, then movement clamped at the ceiling.
    /// The clamp only touches position; velocity keeps accumulating, so
    /// hugging the ceiling does not reset falling speed.
    pub fn step(&mut self) {
        self.vy += GRAVITY;
        self.rect.y = (self.rect.y + self.vy).max(0.0);
    }

    pub fn flap(&mut self) {
        self.vy = FLAP_VELOCITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_from_rest() {
        let mut bird = Bird::new(45.0, 320.0);
        bird.step();
        assert_eq!(bird.vy, GRAVITY);
        assert_eq!(bird.rect.y, 320.0 + GRAVITY);
    }

    #[test]
    fn test_step_after_flap_starts_from_flap_velocity() {
        let mut bird = Bird::new(45.0, 320.0);
        bird.vy = 3.0;
        bird.flap();
        assert_eq!(bird.vy, FLAP_VELOCITY);
        bird.step();
        assert_eq!(bird.vy, FLAP_VELOCITY + GRAVITY);
        assert_eq!(bird.rect.y, 320.0 + FLAP_VELOCITY + GRAVITY);
    }

    #[test]
    fn test_ceiling_clamps_position_not_velocity() {
        let mut bird = Bird::new(45.0, 2.0);
        bird.vy = -10.0;
        bird.step();
        assert_eq!(bird.rect.y, 0.0);
        // Velocity still integrates while pinned at the top
        assert_eq!(bird.vy, -10.0 + GRAVITY);
        bird.step();
        assert_eq!(bird.vy, -10.0 + 2.0 * GRAVITY);
        assert_eq!(bird.rect.y, 0.0);
    }

    #[test]
    fn test_free_fall_accumulates() {
        let mut bird = Bird::new(45.0, 300.0);
        for _ in 0..10 {
            bird.step();
        }
        // y = 300 + sum(0.4 * k) for k in 1..=10 = 322
        assert!((bird.rect.y - 322.0).abs() < 1e-9);
        assert!((bird.vy - 4.0).abs() < 1e-9);
    }
}
