use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use warpfolio_core::{Experience, ScrollState};
use warpfolio_protocol::{RenderCommand, TextAlign, ThemeToken, Viewport};

/// Nominal pixel size of one terminal cell; the scene is laid out in pixels.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

/// The simulated document is this many viewports tall.
pub const PAGE_VIEWPORTS: f64 = 10.0;

const MIN_ALPHA: f64 = 0.05;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::SpaceBackground | ThemeToken::Fog => Color::Rgb(5, 5, 16),
        ThemeToken::VoidBlack | ThemeToken::EventHorizon => Color::Rgb(0, 0, 0),
        ThemeToken::StarWhite | ThemeToken::TextPrimary => Color::Rgb(255, 255, 255),
        ThemeToken::StarBlue => Color::Rgb(170, 204, 255),
        ThemeToken::StarWarm => Color::Rgb(255, 217, 160),
        ThemeToken::WarpStreak => Color::Rgb(207, 239, 255),
        ThemeToken::PhotonRing => Color::Rgb(255, 204, 102),
        ThemeToken::AccretionHot => Color::Rgb(255, 179, 71),
        ThemeToken::AccretionCool => Color::Rgb(255, 94, 58),
        ThemeToken::PlanetSurface => Color::Rgb(42, 74, 106),
        ThemeToken::PlanetGrid | ThemeToken::IndicatorPast => Color::Rgb(58, 106, 154),
        ThemeToken::Atmosphere => Color::Rgb(0, 170, 255),
        ThemeToken::AtmosphereOuter => Color::Rgb(0, 102, 170),
        ThemeToken::PlanetRing => Color::Rgb(136, 170, 204),
        ThemeToken::RingGlow | ThemeToken::Primary | ThemeToken::IndicatorFill => {
            Color::Rgb(0, 255, 255)
        }
        ThemeToken::Moon => Color::Rgb(136, 136, 136),
        ThemeToken::Accent => Color::Rgb(136, 51, 255),
        ThemeToken::TextMuted => Color::Rgb(156, 163, 175),
        ThemeToken::PanelGlass => Color::Rgb(11, 16, 32),
        ThemeToken::PanelBorder => Color::Rgb(60, 62, 72),
        ThemeToken::TagBackground => Color::Rgb(0, 40, 48),
        ThemeToken::Available => Color::Rgb(34, 197, 94),
        ThemeToken::IndicatorTrack => Color::Rgb(50, 50, 60),
    }
}

/// Darken an RGB color toward black by `alpha`.
fn fade(color: Color, alpha: f64) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (f64::from(r) * a).round() as u8,
            (f64::from(g) * a).round() as u8,
            (f64::from(b) * a).round() as u8,
        ),
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Rgb(255, 255, 255),
        bg: Color::Rgb(0, 0, 0),
    };
}

#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx + self.tx, y * self.sy + self.ty)
    }

    fn scale(&self) -> f64 {
        (self.sx.abs() * self.sy.abs()).sqrt()
    }
}

/// Half-open cell rectangle used for clipping.
#[derive(Debug, Clone, Copy)]
struct CellClip {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl CellClip {
    fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    fn intersect(&self, other: &CellClip) -> CellClip {
        CellClip {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }
}

/// Terminal cells the render commands are rasterized into.
pub struct CellGrid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    /// The pixel viewport the grid stands for.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            f64::from(self.width) * CELL_WIDTH,
            f64::from(self.height) * CELL_HEIGHT,
        )
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    fn full_clip(&self) -> CellClip {
        CellClip {
            x0: 0,
            y0: 0,
            x1: i64::from(self.width),
            y1: i64::from(self.height),
        }
    }

    fn cell_mut(&mut self, x: i64, y: i64, clip: &CellClip) -> Option<&mut Cell> {
        if !clip.contains(x, y) || !self.full_clip().contains(x, y) {
            return None;
        }
        let idx = y as usize * usize::from(self.width) + x as usize;
        self.cells.get_mut(idx)
    }

    pub fn rasterize(&mut self, commands: &[RenderCommand]) {
        let mut transforms = vec![Transform::IDENTITY];
        let mut opacities = vec![1.0_f64];
        let mut clips = vec![self.full_clip()];

        for cmd in commands {
            let tf = transforms.last().copied().unwrap_or(Transform::IDENTITY);
            let opacity = opacities.last().copied().unwrap_or(1.0);
            let clip = clips.last().copied().unwrap_or_else(|| self.full_clip());

            match cmd {
                RenderCommand::DrawRect { rect, color, .. } => {
                    if opacity < MIN_ALPHA {
                        continue;
                    }
                    let (x0, y0) = tf.apply(rect.x, rect.y);
                    let (x1, y1) = tf.apply(rect.x + rect.w, rect.y + rect.h);
                    self.fill_rect(x0, y0, x1, y1, fade(theme_to_color(*color), opacity), &clip);
                }
                RenderCommand::DrawCircle {
                    center,
                    radius,
                    fill,
                    stroke,
                    stroke_width,
                    alpha,
                } => {
                    let a = alpha * opacity;
                    if a < MIN_ALPHA {
                        continue;
                    }
                    let (cx, cy) = tf.apply(center.x, center.y);
                    let r = radius * tf.scale();
                    self.circle(cx, cy, r, *fill, *stroke, stroke_width * tf.scale(), a, &clip);
                }
                RenderCommand::DrawLine {
                    from,
                    to,
                    color,
                    alpha,
                    ..
                } => {
                    let a = alpha * opacity;
                    if a < MIN_ALPHA {
                        continue;
                    }
                    let p1 = tf.apply(from.x, from.y);
                    let p2 = tf.apply(to.x, to.y);
                    self.line(p1, p2, fade(theme_to_color(*color), a), &clip);
                }
                RenderCommand::DrawText {
                    position,
                    text,
                    color,
                    align,
                    ..
                } => {
                    if opacity < MIN_ALPHA {
                        continue;
                    }
                    let (x, y) = tf.apply(position.x, position.y);
                    self.text(x, y, text, *align, fade(theme_to_color(*color), opacity), &clip);
                }
                RenderCommand::DrawVignette {
                    center,
                    inner_radius,
                    outer_radius,
                    strength,
                    ..
                } => {
                    let (cx, cy) = tf.apply(center.x, center.y);
                    let s = tf.scale();
                    self.vignette(cx, cy, inner_radius * s, outer_radius * s, strength * opacity);
                }
                RenderCommand::SetClip { rect } => {
                    let (x0, y0) = tf.apply(rect.x, rect.y);
                    let (x1, y1) = tf.apply(rect.x + rect.w, rect.y + rect.h);
                    let cells = CellClip {
                        x0: (x0 / CELL_WIDTH).floor() as i64,
                        y0: (y0 / CELL_HEIGHT).floor() as i64,
                        x1: (x1 / CELL_WIDTH).ceil() as i64,
                        y1: (y1 / CELL_HEIGHT).ceil() as i64,
                    };
                    clips.push(clip.intersect(&cells));
                }
                RenderCommand::ClearClip => {
                    if clips.len() > 1 {
                        clips.pop();
                    }
                }
                RenderCommand::PushTransform { translate, scale } => {
                    transforms.push(Transform {
                        tx: tf.tx + translate.x * tf.sx,
                        ty: tf.ty + translate.y * tf.sy,
                        sx: tf.sx * scale.x,
                        sy: tf.sy * scale.y,
                    });
                }
                RenderCommand::PopTransform => {
                    if transforms.len() > 1 {
                        transforms.pop();
                    }
                }
                RenderCommand::PushOpacity { alpha } => {
                    opacities.push(opacity * alpha.clamp(0.0, 1.0));
                }
                RenderCommand::PopOpacity => {
                    if opacities.len() > 1 {
                        opacities.pop();
                    }
                }
                RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
            }
        }
    }

    /// Rects thinner than a cell become a bar glyph instead of a background fill.
    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color, clip: &CellClip) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        let c0 = (left / CELL_WIDTH).round() as i64;
        let c1 = ((right / CELL_WIDTH).round() as i64).max(c0 + 1);

        if bottom - top < CELL_HEIGHT * 0.5 {
            let row = (((top + bottom) / 2.0) / CELL_HEIGHT).floor() as i64;
            for x in c0..c1 {
                if let Some(cell) = self.cell_mut(x, row, clip) {
                    cell.ch = '━';
                    cell.fg = color;
                }
            }
            return;
        }

        let r0 = (top / CELL_HEIGHT).round() as i64;
        let r1 = ((bottom / CELL_HEIGHT).round() as i64).max(r0 + 1);
        for y in r0..r1 {
            for x in c0..c1 {
                if let Some(cell) = self.cell_mut(x, y, clip) {
                    cell.ch = ' ';
                    cell.bg = color;
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn circle(
        &mut self,
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<ThemeToken>,
        stroke: Option<ThemeToken>,
        stroke_width: f64,
        alpha: f64,
        clip: &CellClip,
    ) {
        if r <= 0.0 {
            return;
        }
        let col = (cx / CELL_WIDTH).floor() as i64;
        let row = (cy / CELL_HEIGHT).floor() as i64;

        // Sub-cell circles are a single glyph sized by radius.
        if r < CELL_WIDTH {
            let Some(token) = fill.or(stroke) else {
                return;
            };
            let ch = if r < 1.5 {
                '·'
            } else if r < 3.0 {
                '•'
            } else {
                '●'
            };
            if let Some(cell) = self.cell_mut(col, row, clip) {
                cell.ch = ch;
                cell.fg = fade(theme_to_color(token), alpha);
            }
            return;
        }

        let half_stroke = (stroke_width / 2.0).max(CELL_WIDTH * 0.5);
        let cols = (r / CELL_WIDTH).ceil() as i64 + 1;
        let rows = (r / CELL_HEIGHT).ceil() as i64 + 1;
        for y in (row - rows)..=(row + rows) {
            for x in (col - cols)..=(col + cols) {
                let px = (x as f64 + 0.5) * CELL_WIDTH - cx;
                let py = (y as f64 + 0.5) * CELL_HEIGHT - cy;
                let d = (px * px + py * py).sqrt();
                let glyph = match (fill, stroke) {
                    (_, Some(token)) if (d - r).abs() <= half_stroke => Some(('o', token)),
                    (Some(token), _) if d <= r => Some(('█', token)),
                    _ => None,
                };
                let Some((ch, token)) = glyph else {
                    continue;
                };
                if let Some(cell) = self.cell_mut(x, y, clip) {
                    cell.ch = ch;
                    cell.fg = fade(theme_to_color(token), alpha);
                }
            }
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, clip: &CellClip) {
        let (x0, y0) = (from.0 / CELL_WIDTH, from.1 / CELL_HEIGHT);
        let (x1, y1) = (to.0 / CELL_WIDTH, to.1 / CELL_HEIGHT);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        if steps > 4096.0 {
            return;
        }
        let ch = if dy.abs() < dx.abs() * 0.4 {
            '─'
        } else if dx.abs() < dy.abs() * 0.4 {
            '│'
        } else if (dx > 0.0) == (dy > 0.0) {
            '╲'
        } else {
            '╱'
        };
        for i in 0..=steps as i64 {
            let t = i as f64 / steps;
            let x = (x0 + dx * t).floor() as i64;
            let y = (y0 + dy * t).floor() as i64;
            if let Some(cell) = self.cell_mut(x, y, clip) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    /// `y` is the baseline; text occupies the row above it.
    fn text(&mut self, x: f64, y: f64, text: &str, align: TextAlign, color: Color, clip: &CellClip) {
        let len = text.chars().count() as i64;
        let anchor = (x / CELL_WIDTH).round() as i64;
        let start = match align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - len / 2,
            TextAlign::Right => anchor - len,
        };
        let row = ((y - 1.0) / CELL_HEIGHT).floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as i64, row, clip) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    fn vignette(&mut self, cx: f64, cy: f64, inner: f64, outer: f64, strength: f64) {
        let span = (outer - inner).max(f64::EPSILON);
        for y in 0..self.height {
            for x in 0..self.width {
                let px = (f64::from(x) + 0.5) * CELL_WIDTH - cx;
                let py = (f64::from(y) + 0.5) * CELL_HEIGHT - cy;
                let t = (((px * px + py * py).sqrt() - inner) / span).clamp(0.0, 1.0);
                let keep = 1.0 - t * t * (3.0 - 2.0 * t) * strength.clamp(0.0, 1.0);
                let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
                if let Some(cell) = self.cells.get_mut(idx) {
                    cell.fg = fade(cell.fg, keep);
                    cell.bg = fade(cell.bg, keep);
                }
            }
        }
    }

    pub fn blit(&self, buf: &mut Buffer, area: Rect) {
        for y in 0..self.height.min(area.height) {
            for x in 0..self.width.min(area.width) {
                if let Some(cell) = self.get(x, y) {
                    buf[(area.x + x, area.y + y)]
                        .set_char(cell.ch)
                        .set_fg(cell.fg)
                        .set_bg(cell.bg);
                }
            }
        }
    }
}

/// Map a scroll offset in cells onto the simulated page.
fn scroll_state(offset_rows: f64, rows: u16) -> ScrollState {
    let viewport_height = f64::from(rows) * CELL_HEIGHT;
    ScrollState::new(
        offset_rows * CELL_HEIGHT,
        viewport_height * PAGE_VIEWPORTS,
        viewport_height,
    )
}

fn max_offset_rows(rows: u16) -> f64 {
    f64::from(rows) * (PAGE_VIEWPORTS - 1.0)
}

pub fn render_tui(experience: &mut Experience) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut offset_rows: f64 = 0.0;
    let mut last_frame = Instant::now();

    loop {
        let term_size = terminal.size()?;
        let rows = term_size.height.saturating_sub(1);
        let max_rows = max_offset_rows(rows);
        offset_rows = offset_rows.clamp(0.0, max_rows);

        let now = Instant::now();
        experience.on_scroll(scroll_state(offset_rows, rows));
        experience.tick(now.duration_since(last_frame).as_secs_f64());
        last_frame = now;

        let mut grid = CellGrid::new(term_size.width, rows);
        let commands = experience.render(&grid.viewport());
        grid.rasterize(&commands);
        let snap = experience.snapshot();

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " warpfolio · {} {:>3.0}% | ↑↓ PgUp PgDn scroll | s skip intro | q quit ",
                    snap.section.label(),
                    snap.overall_progress * 100.0
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            grid.blit(frame.buffer_mut(), content_area);
        })?;

        if event::poll(Duration::from_millis(33))? {
            let intro_done = experience.gate().is_complete();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('s') => {
                        experience.skip_intro();
                    }
                    _ if !intro_done => {}
                    KeyCode::Up => offset_rows -= f64::from(rows) * 0.1,
                    KeyCode::Down => offset_rows += f64::from(rows) * 0.1,
                    KeyCode::PageUp => offset_rows -= f64::from(rows) * 0.9,
                    KeyCode::PageDown | KeyCode::Char(' ') => offset_rows += f64::from(rows) * 0.9,
                    KeyCode::Home => offset_rows = 0.0,
                    KeyCode::End => offset_rows = max_rows,
                    _ => {}
                },
                Event::Mouse(mouse) if intro_done => match mouse.kind {
                    MouseEventKind::ScrollDown => offset_rows += 3.0,
                    MouseEventKind::ScrollUp => offset_rows -= 3.0,
                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
