//! Half-block pixel rendering: buffer, palette, bitmap font and the scene
//! painters for each game mode.

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, Game, Mode};
use crate::geometry::Rect;
use crate::pipes::{Pipe, PipeKind};
use crate::scores::ScoreBoard;
use crossterm::{cursor, queue, style, style::Color as CColor};
use std::io::{self, Write};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

const BACKDROP: Rgb = Rgb(24, 24, 28);
const BORDER: Rgb = Rgb(10, 10, 10);
const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const PANEL: Rgb = Rgb(210, 185, 110);
const PANEL_LIGHT: Rgb = Rgb(220, 195, 120);
const WHITE: Rgb = Rgb(255, 255, 255);
const GOLD: Rgb = Rgb(245, 200, 66);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    pub w: usize,
    pub h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BACKDROP; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BACKDROP);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Flush to the terminal as ▀ half-blocks, two pixel rows per cell row.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(
                            out,
                            style::SetBackgroundColor(CColor::Rgb {
                                r: top.0,
                                g: top.1,
                                b: top.2
                            })
                        )?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(
                            out,
                            style::SetForegroundColor(CColor::Rgb {
                                r: top.0,
                                g: top.1,
                                b: top.2
                            })
                        )?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(
                            out,
                            style::SetBackgroundColor(CColor::Rgb {
                                r: bot.0,
                                g: bot.1,
                                b: bot.2
                            })
                        )?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row < rows - 1 {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

// ── 3x5 bitmap font ─────────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,0,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // O
    [1,1,1, 1,0,1, 1,1,1, 1,0,0, 1,0,0], // P
    [1,1,1, 1,0,1, 1,0,1, 1,1,1, 0,0,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,1,1, 1,1,1, 1,0,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

#[rustfmt::skip]
const DOT: [u8; 15]        = [0,0,0, 0,0,0, 0,0,0, 0,0,0, 0,1,0];
#[rustfmt::skip]
const UNDERSCORE: [u8; 15] = [0,0,0, 0,0,0, 0,0,0, 0,0,0, 1,1,1];

fn glyph(c: char) -> Option<&'static [u8; 15]> {
    match c {
        '0'..='9' => Some(&DIGITS[c as usize - '0' as usize]),
        'A'..='Z' => Some(&LETTERS[c as usize - 'A' as usize]),
        'a'..='z' => Some(&LETTERS[c as usize - 'a' as usize]),
        '.' => Some(&DOT),
        '_' => Some(&UNDERSCORE),
        _ => None,
    }
}

fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, fg: Rgb) {
    for (i, ch) in text.chars().enumerate() {
        let Some(bits) = glyph(ch) else { continue };
        let gx = x + i as i32 * 4;
        for row in 0..5 {
            for col in 0..3 {
                if bits[row * 3 + col] == 1 {
                    let px = gx + col as i32;
                    let py = y + row as i32;
                    buf.set(px + 1, py + 1, SHADOW);
                    buf.set(px, py, fg);
                }
            }
        }
    }
}

fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * 4 - 1
}

fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, fg: Rgb) {
    draw_text(buf, cx - text_width(text) / 2, y, text, fg);
}

/// Half-point scores print as `N.5`, whole scores as plain integers.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as u64)
    } else {
        format!("{score:.1}")
    }
}

// ── Board-to-pixel mapping ──────────────────────────────────────────────────

/// Letterboxes the fixed logical board into the current terminal size.
pub struct View {
    ox: i32,
    oy: i32,
    scale: f64,
}

impl View {
    pub fn fit(pw: usize, ph: usize) -> Self {
        let scale = (pw as f64 / BOARD_WIDTH)
            .min(ph as f64 / BOARD_HEIGHT)
            .max(0.01);
        let ox = ((pw as f64 - BOARD_WIDTH * scale) / 2.0) as i32;
        let oy = ((ph as f64 - BOARD_HEIGHT * scale) / 2.0) as i32;
        Self { ox, oy, scale }
    }

    fn x(&self, x: f64) -> i32 {
        self.ox + (x * self.scale).round() as i32
    }

    fn y(&self, y: f64) -> i32 {
        self.oy + (y * self.scale).round() as i32
    }

    fn rect(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let x0 = self.x(r.x);
        let y0 = self.y(r.y);
        let w = (self.x(r.right()) - x0).max(1);
        let h = (self.y(r.bottom()) - y0).max(1);
        (x0, y0, w, h)
    }

    fn board(&self) -> (i32, i32, i32, i32) {
        self.rect(&Rect::new(0.0, 0.0, BOARD_WIDTH, BOARD_HEIGHT))
    }

    fn center_x(&self) -> i32 {
        self.x(BOARD_WIDTH / 2.0)
    }
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Game-over prompt state as the renderer sees it: actively typing a name,
/// or done and waiting for a restart key.
pub enum PromptView<'a> {
    Typing(&'a str),
    Finished,
}

pub fn draw_scene(
    buf: &mut PixelBuf,
    view: &View,
    game: &Game,
    scores: &ScoreBoard,
    prompt: PromptView,
) {
    let (bx, by, bw, bh) = view.board();

    buf.fill_rect(0, 0, buf.w as i32, buf.h as i32, BACKDROP);
    buf.fill_rect(bx - 1, by - 1, bw + 2, bh + 2, BORDER);
    draw_sky(buf, bx, by, bw, bh);
    draw_hills(buf, bx, by, bw, bh);

    for pipe in &game.pipes {
        draw_pipe(buf, view, pipe);
    }
    draw_bird(buf, view, game);

    match game.mode {
        Mode::Idle => {
            let cx = view.center_x();
            draw_text_centered(buf, cx, by + bh / 6, "FLAPPY", GOLD);
            draw_text_centered(buf, cx, by + bh / 6 + 8, "PRESS ANY KEY", WHITE);
            draw_table(buf, cx, by + bh * 3 / 5, scores);
        }
        Mode::Running => {
            draw_text(
                buf,
                bx + 2,
                by + 2,
                &format!("SCORE {}", format_score(game.score)),
                WHITE,
            );
        }
        Mode::Ended => draw_game_over(buf, view, game, scores, prompt),
    }
}

fn draw_sky(buf: &mut PixelBuf, bx: i32, by: i32, bw: i32, bh: i32) {
    for dy in 0..bh {
        let t = (dy as i64 * 256 / bh.max(1) as i64) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for dx in 0..bw {
            buf.set(bx + dx, by + dy, c);
        }
    }
}

fn draw_hills(buf: &mut PixelBuf, bx: i32, by: i32, bw: i32, bh: i32) {
    let base = by + bh;
    for dx in 0..bw {
        let fx = dx as f64 * 0.08;
        let far = (fx.sin() * 3.0 + (fx * 1.7).sin() * 1.5 + 5.0) as i32;
        let near = ((fx * 1.3).sin() * 2.0 + (fx * 2.3).sin() + 3.0) as i32;
        for y in (base - far)..base {
            buf.set(bx + dx, y, HILL_FAR);
        }
        for y in (base - near)..base {
            buf.set(bx + dx, y, HILL_NEAR);
        }
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

fn draw_pipe(buf: &mut PixelBuf, view: &View, pipe: &Pipe) {
    let (px, py, pw, ph) = view.rect(&pipe.rect);
    for x in 0..pw {
        let c = pipe_shade(x, pw);
        for y in 0..ph {
            buf.set(px + x, py + y, c);
        }
    }
    // Cap the gap-facing end, one pixel proud on each side
    let cap_h = (ph / 24).clamp(1, 4);
    let cap_y = match pipe.kind {
        PipeKind::Top => py + ph - cap_h,
        PipeKind::Bottom => py,
    };
    for x in -1..=pw {
        let c = pipe_shade((x + 1) * pw / (pw + 2), pw);
        for y in 0..cap_h {
            buf.set(px + x, cap_y + y, c);
        }
        buf.set(px + x, cap_y, CAP_DARK);
        buf.set(px + x, cap_y + cap_h - 1, CAP_DARK);
    }
}

fn draw_bird(buf: &mut PixelBuf, view: &View, game: &Game) {
    let (x, y, w, h) = view.rect(&game.bird.rect);

    buf.fill_rect(x, y, w, h, BIRD_Y);
    buf.fill_rect(x + 1, y, (w - 2).max(1), 1, BIRD_HI);

    // Wing sits high while rising, low while falling
    let wing_y = if game.bird.vy < 0.0 { y + h / 3 } else { y + h / 2 };
    buf.fill_rect(x, wing_y, (w / 2).max(1), (h / 3).max(1), BIRD_WING);

    // Eye and beak on the leading edge
    buf.set(x + w - 2, y + 1, BIRD_EYE);
    buf.set(x + w - 1, y + 1, BIRD_PUPIL);
    let beak_y = y + h / 2;
    buf.fill_rect(x + w, beak_y, (w / 3).max(1), (h / 4).max(1), BIRD_BEAK);
}

fn draw_table(buf: &mut PixelBuf, cx: i32, y: i32, scores: &ScoreBoard) {
    if scores.entries.is_empty() {
        return;
    }
    draw_text_centered(buf, cx, y, "BEST SCORES", GOLD);
    for (i, entry) in scores.entries.iter().take(5).enumerate() {
        let name: String = entry.name.chars().take(8).collect();
        let line = format!("{} {}", name, format_score(entry.score));
        draw_text_centered(buf, cx, y + 7 + i as i32 * 7, &line, WHITE);
    }
}

fn draw_game_over(
    buf: &mut PixelBuf,
    view: &View,
    game: &Game,
    scores: &ScoreBoard,
    prompt: PromptView,
) {
    let (bx, by, bw, bh) = view.board();

    // Darken the board behind the panel. The mapped board rect never
    // collapses below 1x1, so clamp to the buffer before indexing.
    let x1 = (bx + bw).min(buf.w as i32);
    let y1 = (by + bh).min(buf.h as i32);
    for y in by.max(0)..y1 {
        for x in bx.max(0)..x1 {
            let c = buf.get(x as usize, y as usize);
            buf.set(x, y, Rgb(c.0 / 2, c.1 / 2, c.2 / 2));
        }
    }

    let cx = view.center_x();
    let panel_w = (bw * 4 / 5).max(60);
    let panel_h = (bh / 2).max(56);
    let px = cx - panel_w / 2;
    let py = by + bh / 2 - panel_h / 2;
    buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
    buf.fill_rect(px, py, panel_w, panel_h, PANEL);
    buf.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL_LIGHT);

    draw_text_centered(buf, cx, py + 4, "GAME OVER", SHADOW);
    let score_line = format!("SCORE {}", format_score(game.score));
    draw_text_centered(buf, cx, py + 12, &score_line, WHITE);

    match prompt {
        PromptView::Typing(name) => {
            draw_text_centered(buf, cx, py + 22, "YOUR NAME", SHADOW);
            let field = format!("{name}_");
            draw_text_centered(buf, cx, py + 29, &field, WHITE);
            draw_text_centered(buf, cx, py + 38, "ENTER SAVE", SHADOW);
            draw_text_centered(buf, cx, py + 44, "ESC SKIP", SHADOW);
        }
        PromptView::Finished => {
            draw_text_centered(buf, cx, py + 22, "PRESS ANY KEY", SHADOW);
            draw_text_centered(buf, cx, py + 28, "TO PLAY AGAIN", SHADOW);
            draw_table(buf, cx, py + panel_h + 6, scores);
        }
    }
}
