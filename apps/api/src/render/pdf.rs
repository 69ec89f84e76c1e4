//! PDF serialization of a `DocumentLayout` via `lopdf`.
//!
//! Uses the standard-14 Helvetica faces with WinAnsiEncoding, so no font
//! programs are embedded. The writer emits no timestamps and no random file
//! identifiers: the same layout always serializes to the same bytes.

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::{DocumentLayout, FontFace, PlacedLine};
use crate::render::RenderError;

const PDF_VERSION: &str = "1.4";

/// Builds the in-memory PDF object graph for `layout`.
pub fn build_pdf(layout: &DocumentLayout) -> Result<Document, RenderError> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(&page.lines),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => media_box(layout),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

/// Serializes `layout` as a complete PDF file into `sink`.
///
/// The file is encoded in memory first, so encoding failures surface as
/// `RenderError::Pdf` and sink failures as `RenderError::Io`.
pub fn write_pdf<W: Write>(layout: &DocumentLayout, sink: &mut W) -> Result<(), RenderError> {
    let mut doc = build_pdf(layout)?;
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    sink.write_all(&buffer)?;
    Ok(())
}

fn media_box(layout: &DocumentLayout) -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        layout.width_pt.into(),
        layout.height_pt.into(),
    ]
}

/// One BT/ET block per line. Empty lines take space in the layout but draw nothing.
fn page_operations(lines: &[PlacedLine]) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(lines.len() * 5);
    for line in lines.iter().filter(|l| !l.text.is_empty()) {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![line.face.resource_name().into(), line.size_pt.into()],
        ));
        ops.push(Operation::new(
            "Td",
            vec![line.x_pt.into(), line.baseline_pt.into()],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Encodes text for a WinAnsiEncoding font.
///
/// Latin-1 maps directly; common typographic punctuation maps into the
/// 0x80..0x9F block; everything else becomes `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2122}' => 0x99,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LineKind, PageLayout};

    fn line(text: &str) -> PlacedLine {
        PlacedLine {
            text: text.to_string(),
            kind: LineKind::Field,
            face: FontFace::Regular,
            size_pt: 11.0,
            x_pt: 28.35,
            baseline_pt: 700.0,
        }
    }

    fn pdf_bytes(layout: &DocumentLayout) -> Vec<u8> {
        let mut buffer = Vec::new();
        write_pdf(layout, &mut buffer).unwrap();
        buffer
    }

    fn layout(pages: Vec<Vec<PlacedLine>>) -> DocumentLayout {
        DocumentLayout {
            width_pt: 595.28,
            height_pt: 841.89,
            pages: pages.into_iter().map(|lines| PageLayout { lines }).collect(),
        }
    }

    #[test]
    fn test_encode_win_ansi_latin1_passthrough() {
        assert_eq!(encode_win_ansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_encode_win_ansi_typographic_punctuation() {
        assert_eq!(encode_win_ansi("\u{2019}\u{2013}\u{20AC}"), vec![0x92, 0x96, 0x80]);
    }

    #[test]
    fn test_encode_win_ansi_unmappable_becomes_question_mark() {
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_pdf_bytes_have_pdf_header_and_trailer() {
        let bytes = pdf_bytes(&layout(vec![vec![line("Hello")]]));
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_page_count_matches_layout() {
        let bytes = pdf_bytes(&layout(vec![
            vec![line("one")],
            vec![line("two")],
            vec![line("three")],
        ]));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_empty_lines_draw_nothing() {
        let ops = page_operations(&[line(""), line("x")]);
        assert_eq!(ops.iter().filter(|op| op.operator == "Tj").count(), 1);
    }

    #[test]
    fn test_fonts_are_declared_once_per_face() {
        let doc = build_pdf(&layout(vec![vec![line("a")], vec![line("b")]])).unwrap();
        let base_fonts: Vec<Vec<u8>> = doc
            .objects
            .values()
            .filter_map(|o| o.as_dict().ok())
            .filter_map(|d| d.get(b"BaseFont").ok())
            .filter_map(|o| o.as_name().ok().map(|n| n.to_vec()))
            .collect();
        assert_eq!(base_fonts.len(), FontFace::ALL.len());
    }
}
