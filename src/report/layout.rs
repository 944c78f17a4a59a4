//! Page layout for the history report.
//!
//! Pure pagination: records are flattened into positioned text lines and
//! split into pages by a vertical cursor, with no PDF types involved.
//! Each record emits its eight field lines followed by one separator
//! line; a record may legally straddle a page break.

use crate::storage::ComplaintRecord;

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

/// Body text below this line forces a new page.
pub const BOTTOM_MARGIN: f32 = 50.0;
/// Vertical advance per field line.
pub const LINE_HEIGHT: f32 = 12.0;
/// Vertical advance after a record's separator line.
pub const SEPARATOR_ADVANCE: f32 = 15.0;
/// Left edge of every body line.
pub const TEXT_X: f32 = 50.0;
/// First body line of each page, below the header block and its gap.
pub const BODY_START_Y: f32 = PAGE_HEIGHT - 150.0;

const SEPARATOR_WIDTH: usize = 80;

/// One positioned line of body text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub y: f32,
}

/// Flatten `records` into pages of positioned lines.
///
/// Always yields at least one page, so an empty history still renders a
/// header-only document. The cursor check happens after each line is
/// placed, matching the report's fixed geometry: a line is drawn at the
/// current position and the page break follows it.
pub fn paginate(records: &[ComplaintRecord]) -> Vec<Vec<TextLine>> {
    let mut pages = Vec::new();
    let mut current = Vec::new();
    let mut y = BODY_START_Y;

    for record in records {
        for text in record.report_lines() {
            place(&mut pages, &mut current, &mut y, text, LINE_HEIGHT);
        }
        place(
            &mut pages,
            &mut current,
            &mut y,
            "-".repeat(SEPARATOR_WIDTH),
            SEPARATOR_ADVANCE,
        );
    }

    pages.push(current);
    pages
}

fn place(
    pages: &mut Vec<Vec<TextLine>>,
    current: &mut Vec<TextLine>,
    y: &mut f32,
    text: String,
    advance: f32,
) {
    current.push(TextLine { text, y: *y });
    *y -= advance;
    if *y < BOTTOM_MARGIN {
        pages.push(std::mem::take(current));
        *y = BODY_START_Y;
    }
}
