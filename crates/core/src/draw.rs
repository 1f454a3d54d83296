//! Drawer: projects the session onto a [`Canvas`].
//!
//! Coordinates are on the virtual `SCREEN_WIDTH` x `SCREEN_HEIGHT` screen.
//! Draw order is fixed: backdrop, chrome (title, labels, icons, par), animated
//! numbers, then the prompt block once the tally is over.

use tracing::error;

use crate::canvas::{Align, Canvas, Image, Tone};
use crate::error::IntermissionError;
use crate::intermission::{Intermission, Phase, Session};
use crate::session::Layout;
use crate::types::{StatField, SCREEN_WIDTH};

const CENTER_X: i32 = SCREEN_WIDTH / 2;

const TITLE_Y: i32 = 20;
const FINISHED_Y: i32 = 36;

const ICON_X: i32 = 48;
const LABEL_X: i32 = 64;
const COUNT_X: i32 = 216;
const PERCENT_X: i32 = 272;

const KILLS_Y: i32 = 70;
const ITEMS_Y: i32 = 90;
const SECRETS_Y: i32 = 110;
const TIME_Y: i32 = 140;
const PAR_Y: i32 = 160;

const HEADER_Y: i32 = 64;
const FIRST_ROW_Y: i32 = 84;
const ROW_STEP: i32 = 20;
const MARKER_X: i32 = 40;
const TABLE_TIME_Y: i32 = 184;

const ENTERING_Y: i32 = 200;
const NEXT_NAME_Y: i32 = 214;
const PROMPT_Y: i32 = 230;

/// Render `secs` as `mm:ss`. Minutes are not capped at 59.
///
/// ```
/// use intermission_core::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(125), "02:05");
/// assert_eq!(format_clock(6000), "100:00");
/// ```
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `shown` as a percentage of `total`, or `None` when the total is unknown.
pub fn percent(shown: u32, total: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some((u64::from(shown) * 100 / u64::from(total)) as u32)
}

/// Columns of the multiplayer table.
fn table_columns(layout: Layout) -> &'static [(StatField, i32)] {
    match layout {
        Layout::Deathmatch => &[
            (StatField::Kills, 136),
            (StatField::Items, 192),
            (StatField::Secrets, 248),
            (StatField::Frags, 296),
        ],
        _ => &[
            (StatField::Kills, 152),
            (StatField::Items, 216),
            (StatField::Secrets, 280),
        ],
    }
}

fn single_rows() -> [(StatField, i32); 3] {
    [
        (StatField::Kills, KILLS_Y),
        (StatField::Items, ITEMS_Y),
        (StatField::Secrets, SECRETS_Y),
    ]
}

impl Intermission {
    /// Draw the current state. Read-only; call as often as the renderer likes.
    pub fn drawer(&self, canvas: &mut dyn Canvas) -> Result<(), IntermissionError> {
        let Some(session) = self.session() else {
            let err = IntermissionError::NotActive;
            error!(code = err.code(), "drawer called without an active session");
            return Err(err);
        };
        let layout = session.layout();

        canvas.draw_image(Image::Backdrop(layout.backdrop()), 0, 0);
        draw_title(session, canvas);
        match layout {
            Layout::Single => {
                draw_single_chrome(session, canvas);
                draw_single_numbers(session, canvas);
            }
            Layout::Cooperative | Layout::Deathmatch => {
                draw_table_chrome(session, canvas);
                draw_table_numbers(session, canvas);
            }
        }
        if matches!(self.phase(), Phase::WaitingForInput | Phase::Finished) {
            draw_prompt(session, self.prompt_visible(), canvas);
        }
        Ok(())
    }
}

fn draw_title(session: &Session, canvas: &mut dyn Canvas) {
    canvas.draw_text(
        session.completed_name(),
        CENTER_X,
        TITLE_Y,
        Align::Center,
        Tone::Title,
    );
    canvas.draw_text("FINISHED", CENTER_X, FINISHED_Y, Align::Center, Tone::Label);
}

fn draw_single_chrome(session: &Session, canvas: &mut dyn Canvas) {
    for (field, y) in single_rows() {
        canvas.draw_image(Image::StatIcon(field), ICON_X, y);
        canvas.draw_text(field.label(), LABEL_X, y, Align::Left, Tone::Label);
    }
    canvas.draw_image(Image::StatIcon(StatField::Time), ICON_X, TIME_Y);
    canvas.draw_text(StatField::Time.label(), LABEL_X, TIME_Y, Align::Left, Tone::Label);

    if let Some(par) = session.players().first().and_then(|p| p.stats.par) {
        canvas.draw_text("PAR", LABEL_X, PAR_Y, Align::Left, Tone::Label);
        canvas.draw_text(&format_clock(par), COUNT_X, PAR_Y, Align::Right, Tone::Value);
    }
}

fn draw_single_numbers(session: &Session, canvas: &mut dyn Canvas) {
    let Some(player) = session.players().first() else {
        return;
    };
    let totals = session.totals();
    for (field, y) in single_rows() {
        let shown = player.stats.counter(field).shown();
        canvas.draw_text(&shown.to_string(), COUNT_X, y, Align::Right, Tone::Value);
        if let Some(pct) = percent(shown, totals.get(field)) {
            canvas.draw_text(&format!("{pct}%"), PERCENT_X, y, Align::Right, Tone::Value);
        }
    }
    canvas.draw_text(
        &format_clock(player.stats.time.shown()),
        COUNT_X,
        TIME_Y,
        Align::Right,
        Tone::Value,
    );
}

fn draw_table_chrome(session: &Session, canvas: &mut dyn Canvas) {
    for &(field, x) in table_columns(session.layout()) {
        canvas.draw_image(Image::StatIcon(field), x - 24, HEADER_Y);
        canvas.draw_text(field.label(), x, HEADER_Y, Align::Right, Tone::Label);
    }
    for (row, player) in session.players().iter().enumerate() {
        canvas.draw_image(Image::PlayerMarker(player.slot), MARKER_X, row_y(row));
    }
    let divider_y = row_y(session.players().len()) - ROW_STEP / 2;
    canvas.draw_image(Image::Divider, 0, divider_y);
    canvas.draw_text(StatField::Time.label(), LABEL_X, TABLE_TIME_Y, Align::Left, Tone::Label);
}

fn draw_table_numbers(session: &Session, canvas: &mut dyn Canvas) {
    let console = session.flags().console_player;
    for (row, player) in session.players().iter().enumerate() {
        let tone = if player.slot as usize == console {
            Tone::Highlight
        } else {
            Tone::Value
        };
        for &(field, x) in table_columns(session.layout()) {
            let shown = player.stats.counter(field).display_value();
            canvas.draw_text(&shown.to_string(), x, row_y(row), Align::Right, tone);
        }
    }
    if let Some(player) = session.players().first() {
        canvas.draw_text(
            &format_clock(player.stats.time.shown()),
            COUNT_X,
            TABLE_TIME_Y,
            Align::Right,
            Tone::Value,
        );
    }
}

fn draw_prompt(session: &Session, blink_on: bool, canvas: &mut dyn Canvas) {
    match session.next_name() {
        Some(name) => {
            canvas.draw_text("ENTERING", CENTER_X, ENTERING_Y, Align::Center, Tone::Label);
            canvas.draw_text(name, CENTER_X, NEXT_NAME_Y, Align::Center, Tone::Title);
        }
        None => {
            canvas.draw_text(
                "EPISODE COMPLETE",
                CENTER_X,
                NEXT_NAME_Y,
                Align::Center,
                Tone::Title,
            );
        }
    }
    if blink_on && !session.flags().non_interactive {
        canvas.draw_text(
            "PRESS FIRE TO CONTINUE",
            CENTER_X,
            PROMPT_Y,
            Align::Center,
            Tone::Prompt,
        );
    }
}

fn row_y(row: usize) -> i32 {
    FIRST_ROW_Y + row as i32 * ROW_STEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn percent_needs_a_total() {
        assert_eq!(percent(5, 0), None);
        assert_eq!(percent(0, 10), Some(0));
        assert_eq!(percent(21, 42), Some(50));
        assert_eq!(percent(42, 42), Some(100));
        assert_eq!(percent(u32::MAX, u32::MAX), Some(100));
    }

    #[test]
    fn deathmatch_table_has_frag_column() {
        assert!(table_columns(Layout::Deathmatch)
            .iter()
            .any(|(f, _)| *f == StatField::Frags));
        assert!(!table_columns(Layout::Cooperative)
            .iter()
            .any(|(f, _)| *f == StatField::Frags));
    }
}
