//! Word document reader - one unit per body paragraph
//!
//! Only paragraphs that sit directly under `w:body` count. Paragraphs inside
//! tables, content controls and text boxes are not units of their own and
//! their text is not attributed to any paragraph.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

use super::{open_package, read_part, xml_error};
use crate::core::error::ExtractError;
use crate::core::model::Unit;

const DOCUMENT_PART: &str = "word/document.xml";

const BODY: &[u8] = b"w:body";
const PARAGRAPH: &[u8] = b"w:p";
const RUN: &[u8] = b"w:r";
const TEXT: &[u8] = b"w:t";
const TAB: &[u8] = b"w:tab";
const BREAKS: [&[u8]; 2] = [b"w:br", b"w:cr"];

/// Read body paragraphs in document order, numbered from 1.
pub fn read_paragraphs(path: &Path) -> Result<Vec<Unit>, ExtractError> {
    let mut archive = open_package(path)?;
    let xml = read_part(&mut archive, DOCUMENT_PART)?;
    parse_document(&xml)
}

/// Collect body paragraphs from the main document part.
pub(crate) fn parse_document(xml: &str) -> Result<Vec<Unit>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<String> = None;
    let mut units = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if name == PARAGRAPH && parent_is(&stack, BODY) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.name();
                let name = name.as_ref();
                if name == PARAGRAPH && parent_is(&stack, BODY) {
                    push_unit(&mut units, String::new());
                } else if let Some(text) = current
                    .as_mut()
                    .filter(|_| parent_is(&stack, RUN) && in_body_paragraph(&stack))
                {
                    // Tab stops in w:pPr/w:tabs share the w:tab name; only run content counts
                    if name == TAB {
                        text.push('\t');
                    } else if BREAKS.contains(&name) {
                        text.push('\n');
                    }
                }
            }
            Event::Text(t) => {
                if stack.last().map(Vec::as_slice) == Some(TEXT) && in_body_paragraph(&stack) {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&t.unescape().map_err(xml_error)?);
                    }
                }
            }
            Event::End(_) => {
                let closed = stack.pop();
                if closed.as_deref() == Some(PARAGRAPH) && parent_is(&stack, BODY) {
                    if let Some(text) = current.take() {
                        push_unit(&mut units, text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(units)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map(Vec::as_slice) == Some(name)
}

/// Inside exactly one paragraph, and that paragraph is a body paragraph.
fn in_body_paragraph(stack: &[Vec<u8>]) -> bool {
    let mut paragraphs = stack
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_slice() == PARAGRAPH);
    match (paragraphs.next(), paragraphs.next()) {
        (Some((depth, _)), None) => depth > 0 && stack[depth - 1].as_slice() == BODY,
        _ => false,
    }
}

fn push_unit(units: &mut Vec<Unit>, text: String) {
    let index = units.len() as u32 + 1;
    units.push(Unit::new(index, text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::extract::fixtures::write_package;
    use tempfile::tempdir;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_paragraphs_in_order() {
        let xml = document(
            r#"<w:p><w:r><w:t>First </w:t></w:r><w:r><w:t xml:space="preserve">paragraph</w:t></w:r></w:p><w:p><w:r><w:t>Second</w:t></w:r></w:p>"#,
        );
        let units = parse_document(&xml).unwrap();
        assert_eq!(
            units,
            vec![Unit::new(1, "First paragraph"), Unit::new(2, "Second")]
        );
    }

    #[test]
    fn test_empty_paragraphs_consume_an_index() {
        let xml = document(
            r#"<w:p/><w:p><w:pPr/></w:p><w:p><w:r><w:t>third</w:t></w:r></w:p>"#,
        );
        let units = parse_document(&xml).unwrap();
        assert_eq!(
            units,
            vec![Unit::new(1, ""), Unit::new(2, ""), Unit::new(3, "third")]
        );
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let xml = document(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>Tom &amp; Jerry</w:t></w:r></w:p>"#,
        );
        let units = parse_document(&xml).unwrap();
        assert_eq!(units, vec![Unit::new(1, "a\tb\nTom & Jerry")]);
    }

    #[test]
    fn test_tab_stop_definitions_are_not_text() {
        let xml = document(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Hello</w:t></w:r></w:p>"#,
        );
        let units = parse_document(&xml).unwrap();
        assert_eq!(units, vec![Unit::new(1, "Hello")]);

        let tokens = crate::core::normalize::normalize_and_tokenize(
            &units[0].text,
            &crate::core::normalize::NormalizeConfig::default(),
        );
        assert_eq!(tokens, vec!["Hello"]);
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let xml = document(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        let units = parse_document(&xml).unwrap();
        assert_eq!(units, vec![Unit::new(1, "before"), Unit::new(2, "after")]);
    }

    #[test]
    fn test_text_box_text_is_not_merged() {
        let xml = document(
            r#"<w:p><w:r><w:t>outer</w:t><w:pict><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></w:pict></w:r></w:p>"#,
        );
        let units = parse_document(&xml).unwrap();
        assert_eq!(units, vec![Unit::new(1, "outer")]);
    }

    #[test]
    fn test_empty_body() {
        let units = parse_document(&document("")).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn test_read_paragraphs_from_package() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("letter.docx");
        let xml = document(r#"<w:p><w:r><w:t>cat cat</w:t></w:r></w:p><w:p><w:r><w:t>dog</w:t></w:r></w:p>"#);
        write_package(&path, &[(DOCUMENT_PART, &xml)]);

        let units = read_paragraphs(&path).unwrap();
        assert_eq!(units, vec![Unit::new(1, "cat cat"), Unit::new(2, "dog")]);
    }

    #[test]
    fn test_read_paragraphs_corrupt_package() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("corrupt.docx");
        std::fs::write(&path, b"PK\x03\x04 truncated").unwrap();

        let err = read_paragraphs(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_) | ExtractError::Io(_)));
    }
}
