//! PDF serialization of the paginated report.
//!
//! Takes the pages produced by the layout module and writes them out
//! with `lopdf`: one content stream per page, a shared Helvetica
//! resource dictionary, and the repeating header block (logo placeholder
//! boxes left and right, centered bold title) redrawn on every page.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::ReportError;
use crate::storage::ComplaintRecord;

use super::layout::{self, TextLine};

const TITLE: &str = "Complaint History";
const BODY_FONT_SIZE: f32 = 9.0;
const TITLE_FONT_SIZE: f32 = 12.0;

const LOGO_WIDTH: f32 = 100.0;
const LOGO_HEIGHT: f32 = 50.0;
const LOGO_MARGIN: f32 = 20.0;
const LOGO_Y: f32 = layout::PAGE_HEIGHT - 70.0;

/// Approximate average glyph advance for Helvetica-Bold, as a fraction
/// of the font size. Good enough to center a short fixed title.
const TITLE_ADVANCE_EM: f32 = 0.6;

/// Render the full history snapshot as a multi-page A4 PDF.
///
/// Read-only over the snapshot; an empty history still yields a single
/// header-only page.
pub fn render(records: &[ComplaintRecord]) -> Result<Vec<u8>, ReportError> {
    let pages = layout::paginate(records);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => body_font_id,
            "F2" => title_font_id,
        },
    });

    let mut page_ids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let encoded = page_content(page).encode()?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                layout::PAGE_WIDTH.into(),
                layout::PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn page_content(lines: &[TextLine]) -> Content {
    let mut operations = header_operations();

    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), BODY_FONT_SIZE.into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![layout::TEXT_X.into(), line.y.into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                winansi_bytes(&line.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    Content { operations }
}

/// Header block repeated at the top of every page: a logo placeholder
/// box at each margin and the centered report title between them.
fn header_operations() -> Vec<Operation> {
    let right_logo_x = layout::PAGE_WIDTH - LOGO_WIDTH - LOGO_MARGIN;
    let title_width = TITLE.len() as f32 * TITLE_FONT_SIZE * TITLE_ADVANCE_EM;
    let title_x = (layout::PAGE_WIDTH - title_width) / 2.0;
    let title_y = LOGO_Y + 15.0;

    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "re",
            vec![
                LOGO_MARGIN.into(),
                LOGO_Y.into(),
                LOGO_WIDTH.into(),
                LOGO_HEIGHT.into(),
            ],
        ),
        Operation::new(
            "re",
            vec![
                right_logo_x.into(),
                LOGO_Y.into(),
                LOGO_WIDTH.into(),
                LOGO_HEIGHT.into(),
            ],
        ),
        Operation::new("S", vec![]),
        Operation::new("Q", vec![]),
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F2".into(), TITLE_FONT_SIZE.into()]),
        Operation::new("Td", vec![title_x.into(), title_y.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(winansi_bytes(TITLE), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Transcode text to WinAnsi (CP1252) bytes for the unembedded Type1
/// fonts. Latin-1 code points map directly; the CP1252 extras that show
/// up in free text get their dedicated bytes; anything else becomes `?`.
fn winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20ac}' => 0x80, // €
            '\u{2018}' => 0x91, // '
            '\u{2019}' => 0x92, // '
            '\u{201c}' => 0x93, // "
            '\u{201d}' => 0x94, // "
            '\u{2013}' => 0x96, // –
            '\u{2014}' => 0x97, // —
            '\u{0080}'..='\u{009f}' => b'?',
            c if (c as u32) <= 0xff => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> ComplaintRecord {
        ComplaintRecord {
            protocol_id: format!("PROTO-{n:06}"),
            created_at: "01/07/2024 10:00".to_string(),
            reporter_name: format!("Reporter {n}"),
            complaint_type: "Color".to_string(),
            problem_subtype: String::new(),
            location: "Plant 2".to_string(),
            address: "Canal St".to_string(),
            description: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
        }
    }

    #[test]
    fn test_empty_history_renders_single_page_pdf() {
        let bytes = render(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_page_count_matches_layout() {
        let records: Vec<ComplaintRecord> = (0..30).map(record).collect();
        let expected_pages = layout::paginate(&records).len();
        assert!(expected_pages > 1);

        let bytes = render(&records).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), expected_pages);
    }

    #[test]
    fn test_body_text_present_in_content_stream() {
        let content = page_content(&[TextLine {
            text: "Protocol: PROTO-1".to_string(),
            y: 600.0,
        }]);
        let texts: Vec<String> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|obj| obj.as_str().ok())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect();
        assert_eq!(texts, vec![TITLE.to_string(), "Protocol: PROTO-1".to_string()]);
    }

    #[test]
    fn test_accented_text_transcodes_to_winansi() {
        let bytes = winansi_bytes("Endereço: Praça d'Água");
        // ç and Á land on their single WinAnsi bytes, not UTF-8 pairs.
        assert!(bytes.contains(&0xe7));
        assert!(bytes.contains(&0xc1));
        assert!(!bytes.contains(&0xc3));
        assert_eq!(bytes.len(), "Endereço: Praça d'Água".chars().count());
    }

    #[test]
    fn test_unmappable_chars_become_question_marks() {
        assert_eq!(winansi_bytes("水質"), vec![b'?', b'?']);
        // CP1252 extras keep their dedicated bytes.
        assert_eq!(winansi_bytes("\u{2013}"), vec![0x96]);
        assert_eq!(winansi_bytes("\u{20ac}"), vec![0x80]);
    }

    #[test]
    fn test_accented_record_renders_and_reloads() {
        let mut accented = record(0);
        accented.reporter_name = "João da Conceição".to_string();
        accented.address = "Praça das Águas, 7".to_string();

        let bytes = render(&[accented]).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_content_stream_carries_winansi_bytes() {
        let content = page_content(&[TextLine {
            text: "Reporter: João".to_string(),
            y: 600.0,
        }]);
        let tj_bytes: Vec<&[u8]> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|obj| obj.as_str().ok())
            .collect();
        // Title plus the one body line; ã is the single byte 0xe3.
        assert_eq!(tj_bytes.len(), 2);
        assert!(tj_bytes[1].contains(&0xe3));
        assert!(!tj_bytes[1].contains(&0xc3));
    }

    #[test]
    fn test_header_repeats_on_every_page() {
        let empty_page = page_content(&[]);
        let title_ops = empty_page
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .count();
        assert_eq!(title_ops, 1);

        let boxes = empty_page
            .operations
            .iter()
            .filter(|op| op.operator == "re")
            .count();
        assert_eq!(boxes, 2);
    }
}
