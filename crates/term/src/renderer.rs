//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; later frames only emit the runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, terminal, QueueableCommand};
use tracing::debug;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    key_event_types: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer writing to `out` instead of stdout.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            key_event_types: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Whether the terminal reports key repeat and release events.
    ///
    /// Only known after [`TerminalRenderer::enter`].
    pub fn reports_key_event_types(&self) -> bool {
        self.key_event_types
    }

    /// Raw mode, alternate screen, hidden cursor. Asks for key release
    /// events where the terminal supports the kitty keyboard protocol.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.key_event_types = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.key_event_types {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        debug!(key_event_types = self.key_event_types, "terminal entered");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.key_event_types {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller may overwrite; the
    /// renderer keeps the frame just drawn to diff the next one against.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                paint_changes(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                paint_full(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes cells, switching colors only when the style changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn cells(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                set_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn paint_full(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    let w = usize::from(fb.width());
    if w > 0 {
        for (y, row) in fb.cells().chunks(w).enumerate() {
            painter.move_to(0, y as u16)?;
            painter.cells(row)?;
        }
    }
    painter.finish()
}

fn paint_changes(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    let w = usize::from(next.width());
    for (x, y, len) in changed_runs(prev, next) {
        let start = usize::from(y) * w + usize::from(x);
        painter.move_to(x, y)?;
        painter.cells(&next.cells()[start..start + usize::from(len)])?;
    }
    painter.finish()
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` runs of cells that differ between two equally sized frames.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let w = usize::from(next.width());
    let mut runs = Vec::new();
    if w == 0 {
        return runs;
    }
    let rows = prev.cells().chunks(w).zip(next.cells().chunks(w));
    for (y, (old, new)) in rows.enumerate() {
        let mut x = 0;
        while x < w {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && old[x] != new[x] {
                x += 1;
            }
            runs.push((start as u16, y as u16, (x - start) as u16));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn first_frame_is_a_full_redraw() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "TIME", CellStyle::default());

        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        renderer.draw_swap(&mut fb).unwrap();

        let out = printed(renderer.writer());
        assert!(out.contains('T') && out.contains('E'));
        assert!(out.contains("\x1b[2J"));
        assert!(!renderer.reports_key_event_types());
    }

    #[test]
    fn unchanged_frame_emits_no_cells() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "ABC", CellStyle::default());
        renderer.draw_swap(&mut fb).unwrap();
        let first_len = renderer.writer().len();

        let mut same = FrameBuffer::new(3, 1);
        same.put_str(0, 0, "ABC", CellStyle::default());
        renderer.draw_swap(&mut same).unwrap();

        let second = printed(&renderer.writer()[first_len..]);
        assert!(!second.contains('A'));
    }

    #[test]
    fn changed_digit_is_the_only_cell_sent() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 1, "12", CellStyle::default());
        renderer.draw_swap(&mut fb).unwrap();
        let first_len = renderer.writer().len();

        let mut next = FrameBuffer::new(4, 2);
        next.put_str(0, 1, "14", CellStyle::default());
        renderer.draw_swap(&mut next).unwrap();

        let second = printed(&renderer.writer()[first_len..]);
        // Only column 1 of row 1 changed.
        assert!(second.contains("\x1b[2;2H"));
        assert!(second.contains('4'));
        assert!(!second.contains("\x1b[2;1H"));
        assert!(!second.contains("\x1b[2J"));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(2, 1);
        renderer.draw_swap(&mut fb).unwrap();
        let first_len = renderer.writer().len();

        let mut bigger = FrameBuffer::new(3, 2);
        renderer.draw_swap(&mut bigger).unwrap();
        assert!(printed(&renderer.writer()[first_len..]).contains("\x1b[2J"));
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in [1, 2, 4] {
            b.set(x, 1, Cell { ch: '9', style });
        }
        assert_eq!(changed_runs(&a, &b), vec![(1, 1, 2), (4, 1, 1)]);
    }
}
