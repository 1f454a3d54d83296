//! IntermissionView: maps the intermission drawer onto a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Align, Backdrop, Canvas, Image, Intermission, IntermissionError, Tone};
use crate::fb::{CellStyle, FrameBuffer, Rgb, TextAnchor};
use crate::types::{StatField, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BG: Rgb = Rgb::new(0, 0, 0);

// Player colors: green, indigo, brown, red.
const PLAYER_COLORS: [Rgb; 4] = [
    Rgb::new(80, 200, 80),
    Rgb::new(120, 120, 230),
    Rgb::new(170, 120, 60),
    Rgb::new(220, 60, 60),
];

fn backdrop_style(backdrop: Backdrop) -> (char, CellStyle) {
    match backdrop {
        Backdrop::Solo => (' ', CellStyle::new(Rgb::new(60, 20, 20), Rgb::new(24, 6, 6))),
        Backdrop::Cooperative => ('░', CellStyle::new(Rgb::new(40, 30, 20), Rgb::new(16, 12, 8))),
        Backdrop::Deathmatch => ('▒', CellStyle::new(Rgb::new(50, 10, 10), Rgb::new(18, 4, 4))),
    }
}

fn icon_glyph(field: StatField) -> (char, Rgb) {
    match field {
        StatField::Kills => ('☠', Rgb::new(220, 60, 40)),
        StatField::Items => ('◆', Rgb::new(80, 160, 230)),
        StatField::Secrets => ('?', Rgb::new(230, 200, 60)),
        StatField::Time => ('◷', Rgb::new(200, 200, 200)),
        StatField::Frags => ('✚', Rgb::new(230, 80, 80)),
    }
}

fn tone_style(tone: Tone, bg: Rgb) -> CellStyle {
    match tone {
        Tone::Title => CellStyle::new(Rgb::new(240, 200, 80), bg).bold(),
        Tone::Label => CellStyle::new(Rgb::new(200, 40, 40), bg).bold(),
        Tone::Value => CellStyle::new(Rgb::new(230, 230, 230), bg),
        Tone::Highlight => CellStyle::new(Rgb::new(120, 240, 120), bg).bold(),
        Tone::Prompt => CellStyle::new(Rgb::new(200, 200, 200), bg).dim(),
    }
}

fn anchor_for(align: Align) -> TextAnchor {
    match align {
        Align::Left => TextAnchor::Start,
        Align::Center => TextAnchor::Middle,
        Align::Right => TextAnchor::End,
    }
}

/// [`Canvas`] that scales virtual screen coordinates to terminal cells.
pub struct FrameCanvas<'a> {
    fb: &'a mut FrameBuffer,
    bg: Rgb,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self { fb, bg: BG }
    }

    /// Column of virtual x coordinate `x`.
    pub fn column(&self, x: i32) -> i32 {
        x * i32::from(self.fb.width()) / SCREEN_WIDTH
    }

    /// Row of virtual y coordinate `y`, or `None` when it falls off screen.
    pub fn row(&self, y: i32) -> Option<u16> {
        let row = y * i32::from(self.fb.height()) / SCREEN_HEIGHT;
        u16::try_from(row).ok().filter(|&r| r < self.fb.height())
    }
}

impl Canvas for FrameCanvas<'_> {
    fn draw_image(&mut self, image: Image, x: i32, y: i32) {
        match image {
            Image::Backdrop(backdrop) => {
                let (ch, style) = backdrop_style(backdrop);
                self.bg = style.bg;
                self.fb.clear(style.into_cell(ch));
            }
            Image::StatIcon(field) => {
                let (ch, fg) = icon_glyph(field);
                if let Some(row) = self.row(y) {
                    let col = self.column(x).max(0) as u16;
                    self.fb.put_char(col, row, ch, CellStyle::new(fg, self.bg));
                }
            }
            Image::PlayerMarker(slot) => {
                let fg = PLAYER_COLORS[slot as usize % PLAYER_COLORS.len()];
                if let Some(row) = self.row(y) {
                    let col = self.column(x).max(0) as u16;
                    self.fb.put_str(col, row, "■", CellStyle::new(fg, self.bg).bold());
                }
            }
            Image::Divider => {
                if let Some(row) = self.row(y) {
                    let style = CellStyle::new(Rgb::new(120, 40, 40), self.bg);
                    let col = self.column(x).max(0) as u16;
                    let width = self.fb.width().saturating_sub(col);
                    self.fb.fill_rect(col, row, width, 1, '─', style);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, align: Align, tone: Tone) {
        let Some(row) = self.row(y) else {
            return;
        };
        let col = self.column(x);
        let style = tone_style(tone, self.bg);
        self.fb.put_str_anchored(col, row, text, anchor_for(align), style);
    }
}

/// A terminal renderer for the intermission screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntermissionView;

impl IntermissionView {
    pub fn new() -> Self {
        Self
    }

    /// Render the current intermission into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        wi: &Intermission,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Result<(), IntermissionError> {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));
        let mut canvas = FrameCanvas::new(fb);
        wi.drawer(&mut canvas)
    }

    /// Allocating convenience wrapper around [`IntermissionView::render_into`].
    pub fn render(&self, wi: &Intermission, viewport: Viewport) -> Result<FrameBuffer, IntermissionError> {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(wi, viewport, &mut fb)?;
        Ok(fb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_coordinates_scale_to_cells() {
        let mut fb = FrameBuffer::new(80, 24);
        let canvas = FrameCanvas::new(&mut fb);
        assert_eq!(canvas.column(0), 0);
        assert_eq!(canvas.column(160), 40);
        assert_eq!(canvas.column(320), 80);
        assert_eq!(canvas.row(0), Some(0));
        assert_eq!(canvas.row(230), Some(23));
        assert_eq!(canvas.row(240), None);
        assert_eq!(canvas.row(-10), None);
    }

    #[test]
    fn backdrop_fills_screen() {
        let mut fb = FrameBuffer::new(10, 4);
        let mut canvas = FrameCanvas::new(&mut fb);
        canvas.draw_image(Image::Backdrop(Backdrop::Deathmatch), 0, 0);
        assert!(fb.cells().iter().all(|c| c.ch == '▒'));
    }

    #[test]
    fn text_keeps_backdrop_background() {
        let mut fb = FrameBuffer::new(80, 24);
        let mut canvas = FrameCanvas::new(&mut fb);
        canvas.draw_image(Image::Backdrop(Backdrop::Solo), 0, 0);
        canvas.draw_text("KILLS", 64, 70, Align::Left, Tone::Label);

        let (_, solo) = backdrop_style(Backdrop::Solo);
        let cell = fb.get(16, 7).unwrap();
        assert_eq!(cell.ch, 'K');
        assert_eq!(cell.style.bg, solo.bg);
    }
}
