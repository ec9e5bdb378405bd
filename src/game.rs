//! One game session: the mode state machine and the per-frame tick.

use crate::physics::Bird;
use crate::pipes::{self, Pipe, SCROLL_SPEED, SPAWN_INTERVAL};
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

pub const BOARD_WIDTH: f64 = 360.0;
pub const BOARD_HEIGHT: f64 = 640.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Running,
    Ended,
}

/// Outcome of one tick. `GameOver` fires exactly once, on the frame the
/// session transitions to `Ended`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Continue,
    GameOver { score: f64 },
}

/// All mutable state of one session. Created fresh on every restart; nothing
/// lives outside this struct between sessions.
pub struct Game {
    pub mode: Mode,
    pub bird: Bird,
    /// Ordered by spawn time, hence by x. Off-screen pipes are popped from
    /// the front only.
    pub pipes: VecDeque<Pipe>,
    pub score: f64,
    spawn_elapsed: Duration,
}

impl Game {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            bird: Bird::new(BOARD_WIDTH / 8.0, BOARD_HEIGHT / 2.0),
            pipes: VecDeque::new(),
            score: 0.0,
            spawn_elapsed: Duration::ZERO,
        }
    }

    /// Leave `Idle` without flapping. Any key starts the game; only the jump
    /// keys also apply an impulse.
    pub fn start(&mut self) {
        if self.mode == Mode::Idle {
            self.mode = Mode::Running;
        }
    }

    pub fn flap(&mut self) {
        match self.mode {
            Mode::Idle => {
                self.mode = Mode::Running;
                self.bird.flap();
            }
            Mode::Running => self.bird.flap(),
            Mode::Ended => {}
        }
    }

    pub fn restart(&mut self) {
        *self = Game::new();
    }

    /// Advance one frame. `dt` is wall-clock time since the previous tick and
    /// drives only the spawner; physics and scrolling are per-frame.
    pub fn tick<R: Rng>(&mut self, dt: Duration, rng: &mut R) -> Tick {
        if self.mode != Mode::Running {
            return Tick::Continue;
        }

        self.spawn_elapsed += dt;
        while self.spawn_elapsed >= SPAWN_INTERVAL {
            self.spawn_elapsed -= SPAWN_INTERVAL;
            let (top, bottom) = pipes::spawn_pair(rng);
            self.pipes.push_back(top);
            self.pipes.push_back(bottom);
        }

        let mut hit = false;
        for pipe in &mut self.pipes {
            pipe.rect.x -= SCROLL_SPEED;
            if !pipe.passed && self.bird.rect.x > pipe.rect.right() {
                pipe.passed = true;
                self.score += 0.5;
            }
            if pipe.rect.intersects(&self.bird.rect) {
                hit = true;
            }
        }

        // Strictly past the left edge; a pipe ending exactly at x = 0 stays.
        while self.pipes.front().is_some_and(|p| p.rect.right() < 0.0) {
            self.pipes.pop_front();
        }

        self.bird.step();

        if hit || self.bird.rect.y > BOARD_HEIGHT {
            self.mode = Mode::Ended;
            return Tick::GameOver { score: self.score };
        }
        Tick::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::pipes::{GAP, PIPE_HEIGHT, PIPE_WIDTH, PipeKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const FRAME: Duration = Duration::from_millis(16);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    fn running_game() -> Game {
        let mut game = Game::new();
        game.start();
        game
    }

    fn pipe_at(x: f64, y: f64) -> Pipe {
        Pipe {
            rect: Rect::new(x, y, PIPE_WIDTH, PIPE_HEIGHT),
            kind: PipeKind::Top,
            passed: false,
        }
    }

    #[test]
    fn test_tick_is_inert_outside_running() {
        let mut game = Game::new();
        let y0 = game.bird.rect.y;
        for _ in 0..100 {
            assert_eq!(game.tick(FRAME, &mut rng()), Tick::Continue);
        }
        assert_eq!(game.bird.rect.y, y0);
        assert!(game.pipes.is_empty());

        game.mode = Mode::Ended;
        for _ in 0..100 {
            game.tick(FRAME, &mut rng());
        }
        assert!(game.pipes.is_empty());
    }

    #[test]
    fn test_flap_starts_the_session() {
        let mut game = Game::new();
        game.flap();
        assert_eq!(game.mode, Mode::Running);
        assert!(game.bird.vy < 0.0);
    }

    #[test]
    fn test_start_does_not_flap() {
        let mut game = Game::new();
        game.start();
        assert_eq!(game.mode, Mode::Running);
        assert_eq!(game.bird.vy, 0.0);
    }

    #[test]
    fn test_spawner_fires_on_period() {
        let mut game = running_game();
        let mut r = rng();
        // Keep the bird aloft so the session survives long enough
        for _ in 0..47 {
            game.flap();
            game.tick(FRAME, &mut r);
        }
        // 47 * 16ms = 752ms: one pair spawned
        assert_eq!(game.pipes.len(), 2);
    }

    #[test]
    fn test_pruning_boundary_is_strict() {
        let mut game = running_game();
        // After one tick these move 4 units left
        game.pipes.push_back(pipe_at(-PIPE_WIDTH + 3.0, -200.0));
        game.pipes.push_back(pipe_at(-PIPE_WIDTH + 4.0, -200.0));
        game.flap();
        game.tick(FRAME, &mut rng());
        // First landed at right() = -1: pruned. Second at right() = 0: kept.
        assert_eq!(game.pipes.len(), 1);
        assert_eq!(game.pipes[0].rect.right(), 0.0);
    }

    #[test]
    fn test_passing_one_pipe_scores_half_point_once() {
        let mut game = running_game();
        // Trailing edge just ahead of the bird's x; one scroll step clears it
        let x = game.bird.rect.x - PIPE_WIDTH + 2.0;
        game.pipes.push_back(pipe_at(x, -PIPE_HEIGHT - 50.0));
        game.flap();
        game.tick(FRAME, &mut rng());
        assert_eq!(game.score, 0.5);
        assert!(game.pipes[0].passed);
        // Further ticks never re-score the same pipe
        game.flap();
        game.tick(FRAME, &mut rng());
        assert_eq!(game.score, 0.5);
    }

    #[test]
    fn test_clearing_a_pair_scores_one_point() {
        let mut game = running_game();
        let x = game.bird.rect.x - PIPE_WIDTH + 2.0;
        let top_y = -PIPE_HEIGHT / 4.0;
        game.pipes.push_back(pipe_at(x, top_y));
        game.pipes.push_back(pipe_at(x, top_y + PIPE_HEIGHT + GAP));
        game.flap();
        game.tick(FRAME, &mut rng());
        assert_eq!(game.score, 1.0);
    }

    #[test]
    fn test_collision_ends_the_session() {
        let mut game = running_game();
        // Pipe right on top of the bird
        let b = game.bird.rect;
        game.pipes.push_back(pipe_at(b.x, b.y - PIPE_HEIGHT / 2.0));
        let out = game.tick(FRAME, &mut rng());
        assert_eq!(game.mode, Mode::Ended);
        assert_eq!(out, Tick::GameOver { score: 0.0 });
    }

    #[test]
    fn test_falling_past_the_floor_ends_the_session() {
        let mut game = running_game();
        game.bird.rect.y = BOARD_HEIGHT - 1.0;
        game.bird.vy = 10.0;
        let out = game.tick(FRAME, &mut rng());
        assert_eq!(game.mode, Mode::Ended);
        assert!(matches!(out, Tick::GameOver { .. }));
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut game = running_game();
        game.bird.rect.y = BOARD_HEIGHT + 10.0;
        assert!(matches!(game.tick(FRAME, &mut rng()), Tick::GameOver { .. }));
        assert_eq!(game.tick(FRAME, &mut rng()), Tick::Continue);
    }

    #[test]
    fn test_restart_returns_to_a_fresh_idle_session() {
        let mut game = running_game();
        game.score = 7.5;
        game.pipes.push_back(pipe_at(100.0, -200.0));
        game.mode = Mode::Ended;
        game.restart();
        assert_eq!(game.mode, Mode::Idle);
        assert_eq!(game.score, 0.0);
        assert!(game.pipes.is_empty());
        assert_eq!(game.bird.rect.y, BOARD_HEIGHT / 2.0);
        assert_eq!(game.bird.vy, 0.0);
    }

    /// Hold the bird inside the gap of whichever pair it overlaps, so long
    /// scenario runs never collide.
    fn steer_through_gaps(game: &mut Game) {
        let b = game.bird.rect;
        let gap_center = game
            .pipes
            .iter()
            .find(|p| p.kind == PipeKind::Top && p.rect.x < b.right() + SCROLL_SPEED && p.rect.right() > b.x)
            .map(|p| p.rect.bottom() + GAP / 2.0);
        if let Some(center) = gap_center {
            game.bird.rect.y = center - b.h / 2.0;
        } else {
            game.bird.rect.y = BOARD_HEIGHT / 2.0;
        }
        game.bird.vy = 0.0;
    }

    #[test]
    fn test_first_pair_is_pruned_while_later_pairs_survive() {
        let mut game = running_game();
        let mut r = rng();
        // At 16ms frames the spawner fires on frames 47, 94 and 141. The
        // first pair reaches right() < 0 on frame 154, so after 160 frames
        // it is pruned while pairs two and three are still on screen.
        for _ in 0..160 {
            steer_through_gaps(&mut game);
            assert_eq!(game.tick(FRAME, &mut r), Tick::Continue);
        }
        assert_eq!(game.pipes.len(), 4);
        assert!(game.pipes.iter().all(|p| p.rect.right() >= 0.0));
        // Only the pruned pair ever passed the bird
        assert_eq!(game.score, 1.0);
    }
}
