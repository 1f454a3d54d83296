//! Drawing surface collaborator.
//!
//! The drawer never touches pixels. It issues image and text calls in virtual
//! screen coordinates (`SCREEN_WIDTH` x `SCREEN_HEIGHT`) against a [`Canvas`],
//! and the renderer decides how to realize them.

use crate::types::StatField;

/// Full-screen background variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backdrop {
    Solo,
    Cooperative,
    Deathmatch,
}

/// Images the drawer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Image {
    /// Fills the whole screen; drawn first.
    Backdrop(Backdrop),
    /// Small icon in front of a statistic label or column.
    StatIcon(StatField),
    /// Colored marker identifying a player slot.
    PlayerMarker(u8),
    /// Horizontal separator line.
    Divider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Text role; renderers map it to a font or color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Title,
    Label,
    Value,
    /// Values of the console player in multiplayer tables.
    Highlight,
    Prompt,
}

/// Renderer collaborator receiving the drawer's output.
pub trait Canvas {
    fn draw_image(&mut self, image: Image, x: i32, y: i32);

    /// Draw `text` anchored at `x` according to `align`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, align: Align, tone: Tone);
}

/// A recorded canvas call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Image {
        image: Image,
        x: i32,
        y: i32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        align: Align,
        tone: Tone,
    },
}

/// Canvas that records calls in order instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Every text drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            DrawCall::Image { .. } => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Index of the first call matching `pred`.
    pub fn position(&self, pred: impl Fn(&DrawCall) -> bool) -> Option<usize> {
        self.calls.iter().position(pred)
    }
}

impl Canvas for RecordingCanvas {
    fn draw_image(&mut self, image: Image, x: i32, y: i32) {
        self.calls.push(DrawCall::Image { image, x, y });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, align: Align, tone: Tone) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            align,
            tone,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_canvas_keeps_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_image(Image::Backdrop(Backdrop::Solo), 0, 0);
        canvas.draw_text("KILLS", 10, 20, Align::Left, Tone::Label);
        canvas.draw_text("42", 200, 20, Align::Right, Tone::Value);

        assert_eq!(canvas.calls().len(), 3);
        assert_eq!(
            canvas.calls()[0],
            DrawCall::Image {
                image: Image::Backdrop(Backdrop::Solo),
                x: 0,
                y: 0
            }
        );
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["KILLS", "42"]);
        assert!(canvas.contains_text("42"));
        assert_eq!(
            canvas.position(|c| matches!(c, DrawCall::Text { tone: Tone::Value, .. })),
            Some(2)
        );

        canvas.clear();
        assert!(canvas.calls().is_empty());
    }
}
