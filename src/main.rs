mod game;
mod geometry;
mod physics;
mod pipes;
mod render;
mod scores;

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute, terminal,
};
use game::{Game, Mode, Tick};
use render::{PixelBuf, PromptView, View};
use scores::ScoreBoard;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

const MAX_NAME_LEN: usize = 12;

fn main() -> io::Result<()> {
    let scores_path = scores::default_path()?;
    let mut scores = ScoreBoard::load(&scores_path);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut view = View::fit(buf.w, buf.h);
    let mut game = Game::new();
    let mut rng = rand::thread_rng();
    // Some while the game-over screen is collecting a name
    let mut name_entry: Option<String> = None;

    let frame_dur = Duration::from_millis(16); // ~60 fps
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(name) = &mut name_entry {
                        match key.code {
                            KeyCode::Enter => {
                                if scores.record(name, game.score) {
                                    scores.save(&scores_path)?;
                                }
                                name_entry = None;
                            }
                            KeyCode::Esc => name_entry = None,
                            KeyCode::Backspace => {
                                name.pop();
                            }
                            KeyCode::Char(c) if c.is_ascii_graphic() || c == ' ' => {
                                if name.chars().count() < MAX_NAME_LEN {
                                    name.push(c);
                                }
                            }
                            _ => {}
                        }
                    } else {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => {
                                cleanup(&mut out)?;
                                return Ok(());
                            }
                            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => match game.mode {
                                Mode::Ended => game.restart(),
                                _ => game.flap(),
                            },
                            _ => match game.mode {
                                Mode::Idle => game.start(),
                                Mode::Running => {}
                                Mode::Ended => game.restart(),
                            },
                        }
                    }
                }
                Event::Mouse(m) => {
                    if matches!(m.kind, MouseEventKind::Down(_)) && name_entry.is_none() {
                        match game.mode {
                            Mode::Ended => game.restart(),
                            _ => game.flap(),
                        }
                    }
                }
                Event::Resize(c, r) => {
                    // The board is logical; only the mapping changes
                    buf.resize(c as usize, r as usize * 2);
                    view = View::fit(buf.w, buf.h);
                }
                _ => {}
            }
        }

        // Update
        let now = Instant::now();
        let dt = now - last_tick;
        last_tick = now;
        if let Tick::GameOver { .. } = game.tick(dt, &mut rng) {
            name_entry = Some(String::new());
        }

        // Render
        let prompt = match &name_entry {
            Some(name) => PromptView::Typing(name.as_str()),
            None => PromptView::Finished,
        };
        render::draw_scene(&mut buf, &view, &game, &scores, prompt);
        buf.render(&mut out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
