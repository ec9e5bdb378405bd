//! Pipe obstacles and the paired spawner.

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::geometry::Rect;
use rand::Rng;
use std::time::Duration;

pub const PIPE_WIDTH: f64 = 64.0;
pub const PIPE_HEIGHT: f64 = 512.0;
/// Leftward pipe movement per frame.
pub const SCROLL_SPEED: f64 = 4.0;
/// Wall-clock period between pair spawns.
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(750);
/// Vertical opening between the two pipes of a pair.
pub const GAP: f64 = BOARD_HEIGHT / 3.0;

/// Which end of the screen the pipe hangs from. The renderer caps the
/// gap-facing end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    Top,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct Pipe {
    pub rect: Rect,
    pub kind: PipeKind,
    /// Set once when the bird clears the trailing edge; gates scoring.
    pub passed: bool,
}

/// Spawn one top/bottom pair at the right edge of the board. The top pipe
/// hangs above the visible area by a random margin; the bottom pipe sits a
/// fixed gap below it.
pub fn spawn_pair<R: Rng>(rng: &mut R) -> (Pipe, Pipe) {
    let r = rng.gen_range(0.0..PIPE_HEIGHT / 2.0);
    let top_y = -PIPE_HEIGHT / 4.0 - r;

    let top = Pipe {
        rect: Rect::new(BOARD_WIDTH, top_y, PIPE_WIDTH, PIPE_HEIGHT),
        kind: PipeKind::Top,
        passed: false,
    };
    // Offset from the top pipe's bottom edge so the opening is exactly GAP
    let bottom = Pipe {
        rect: Rect::new(BOARD_WIDTH, top.rect.bottom() + GAP, PIPE_WIDTH, PIPE_HEIGHT),
        kind: PipeKind::Bottom,
        passed: false,
    };
    (top, bottom)
}
