use std::borrow::Cow;
use std::io;

use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use tracing::warn;

use crate::ui::color::{Rgb, Rgba};
use crate::ui::compositor::Image;

/// Upper half block: foreground paints the upper pixel, background the lower one.
pub const HALF_BLOCK: &str = "\u{2580}";

/// Something that can show a composited frame with a caption.
pub trait Canvas {
    /// # Errors
    ///
    /// Whatever the underlying display reports.
    fn present(&mut self, image: &Image, caption: &str) -> io::Result<()>;
}

/// Converts an opaque color to a terminal true-color value.
#[must_use]
pub fn terminal_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_u8();
    Color::Rgb(r, g, b)
}

/// Largest size with the image's aspect ratio that fits `cols x pixel_rows`.
///
/// Images that already fit keep their size.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_size(width: usize, height: usize, cols: usize, pixel_rows: usize) -> (usize, usize) {
    if width <= cols && height <= pixel_rows {
        return (width, height);
    }
    let scale = (width as f64 / cols.max(1) as f64).max(height as f64 / pixel_rows.max(1) as f64);
    let shrink = |len: usize, limit: usize| {
        ((len as f64 / scale + 1e-9).floor() as usize).clamp(1, limit.max(1))
    };
    (shrink(width, cols), shrink(height, pixel_rows))
}

/// Fits `image` into a field of `area`, two pixel rows per terminal row.
pub fn fit_to_area(image: &Image, area: Rect) -> Cow<'_, Image> {
    let cols = usize::from(area.width);
    let pixel_rows = usize::from(area.height) * 2;
    let (width, height) = fit_size(image.width(), image.height(), cols, pixel_rows);
    if (width, height) == (image.width(), image.height()) {
        return Cow::Borrowed(image);
    }
    warn!(
        from_width = image.width(),
        from_height = image.height(),
        to_width = width,
        to_height = height,
        "Frame larger than the terminal; downsampling"
    );
    Cow::Owned(image.resample(width, height))
}

/// Builds one line per pair of image rows, one half-block cell per pixel column.
///
/// A trailing odd row gets `background` as its lower half.
#[must_use]
pub fn image_lines(image: &Image, background: Rgb) -> Vec<Line<'static>> {
    let color = |row: Option<&[Rgba]>, col: usize| {
        row.and_then(|r| r.get(col))
            .map_or(background, |p| p.flatten(background))
    };
    (0..image.height().div_ceil(2))
        .map(|pair| {
            let upper = image.row(2 * pair);
            let lower = image.row(2 * pair + 1);
            let spans: Vec<Span> = (0..image.width())
                .map(|col| {
                    Span::styled(
                        HALF_BLOCK,
                        Style::default()
                            .fg(terminal_color(color(upper, col)))
                            .bg(terminal_color(color(lower, col))),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn draw_frame(f: &mut Frame, image: &Image, caption: &str, background: Rgb) {
    let hud_height = u16::try_from(caption.lines().count().max(1)).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(hud_height), // HUD
            Constraint::Min(0),             // Field
        ])
        .split(f.area());

    let hud_lines: Vec<Line> = caption.lines().map(|l| Line::from(l.to_owned())).collect();
    let hud = Paragraph::new(hud_lines).style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(hud, chunks[0]);

    if chunks[1].area() == 0 {
        return;
    }
    let fitted = fit_to_area(image, chunks[1]);
    let field = Paragraph::new(image_lines(&fitted, background))
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().bg(terminal_color(background)));
    f.render_widget(field, chunks[1]);
}

/// Canvas backed by a ratatui terminal.
pub struct TerminalCanvas<B: Backend> {
    terminal: Terminal<B>,
    background: Rgb,
}

impl<B: Backend> TerminalCanvas<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            background: Rgb::WHITE,
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Canvas for TerminalCanvas<B> {
    fn present(&mut self, image: &Image, caption: &str) -> io::Result<()> {
        let background = self.background;
        self.terminal
            .draw(|f| draw_frame(f, image, caption, background))?;
        Ok(())
    }
}
