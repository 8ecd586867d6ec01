//! Presentation reader - one unit per slide shape
//!
//! Slides are visited in presentation order (the `p:sldIdLst` of
//! `ppt/presentation.xml`, resolved through its relationships part). Every
//! top-level `p:sp` of a slide's shape tree is a unit, whether or not it
//! holds text. Unit indexes run continuously across slides.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;

use super::{open_package, read_part, xml_error};
use crate::core::error::ExtractError;
use crate::core::model::Unit;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

const SHAPE_TREE: &[u8] = b"p:spTree";
const SHAPE: &[u8] = b"p:sp";
const TEXT_BODY: &[u8] = b"p:txBody";
const PARAGRAPH: &[u8] = b"a:p";
const TEXT: &[u8] = b"a:t";
const BREAK: &[u8] = b"a:br";

/// Read shape texts of every slide, numbered from 1 across the deck.
pub fn read_slide_shapes(path: &Path) -> Result<Vec<Unit>, ExtractError> {
    let mut archive = open_package(path)?;
    let presentation = read_part(&mut archive, PRESENTATION_PART)?;
    let rels = read_part(&mut archive, PRESENTATION_RELS)?;

    let targets = parse_relationships(&rels)?;
    let mut units = Vec::new();

    for rel_id in parse_slide_ids(&presentation)? {
        let target = targets
            .get(&rel_id)
            .ok_or_else(|| ExtractError::malformed(format!("slide relationship {} not found", rel_id)))?;
        let slide = read_part(&mut archive, &resolve_target(target))?;
        for text in parse_slide(&slide)? {
            let index = units.len() as u32 + 1;
            units.push(Unit::new(index, text));
        }
    }

    Ok(units)
}

/// Relationship ids of the slides, in presentation order.
pub(crate) fn parse_slide_ids(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"p:sldId" => {
                if let Some(id) = attribute(&e, "r:id")? {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

/// Relationship id -> target, as written in a `.rels` part.
pub(crate) fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attribute(&e, "Id")?, attribute(&e, "Target")?) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Targets are relative to `ppt/` unless they start with '/'.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Text of each top-level shape of one slide, paragraphs joined by '\n'.
pub(crate) fn parse_slide(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut shape: Option<Vec<String>> = None;
    let mut shapes = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if name == SHAPE && parent_is(&stack, SHAPE_TREE) {
                    shape = Some(Vec::new());
                } else if name == PARAGRAPH && parent_is(&stack, TEXT_BODY) {
                    if let Some(paragraphs) = shape.as_mut() {
                        paragraphs.push(String::new());
                    }
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.name();
                let name = name.as_ref();
                if name == SHAPE && parent_is(&stack, SHAPE_TREE) {
                    shapes.push(String::new());
                } else if let Some(paragraphs) = shape.as_mut() {
                    if name == PARAGRAPH && parent_is(&stack, TEXT_BODY) {
                        paragraphs.push(String::new());
                    } else if name == BREAK {
                        if let Some(last) = paragraphs.last_mut() {
                            last.push('\n');
                        }
                    }
                }
            }
            Event::Text(t) => {
                if parent_is(&stack, TEXT) {
                    if let Some(last) = shape.as_mut().and_then(|p| p.last_mut()) {
                        last.push_str(&t.unescape().map_err(xml_error)?);
                    }
                }
            }
            Event::End(_) => {
                let closed = stack.pop();
                if closed.as_deref() == Some(SHAPE) && parent_is(&stack, SHAPE_TREE) {
                    if let Some(paragraphs) = shape.take() {
                        shapes.push(paragraphs.join("\n"));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(shapes)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map(Vec::as_slice) == Some(name)
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, ExtractError> {
    match e.try_get_attribute(key).map_err(xml_error)? {
        Some(attr) => Ok(Some(attr.unescape_value().map_err(xml_error)?.into_owned())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::extract::fixtures::write_package;
    use tempfile::tempdir;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

    fn slide(shapes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
            NS, shapes
        )
    }

    fn text_shape(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", p))
            .collect();
        format!(
            "<p:sp><p:nvSpPr/><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>",
            body
        )
    }

    fn presentation(rel_ids: &[&str]) -> String {
        let ids: String = rel_ids
            .iter()
            .enumerate()
            .map(|(i, id)| format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + i, id))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><p:presentation {}><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
            NS, ids
        )
    }

    fn rels(entries: &[(&str, &str)]) -> String {
        let body: String = entries
            .iter()
            .map(|(id, target)| {
                format!(
                    r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="{}"/>"#,
                    id, target
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            body
        )
    }

    #[test]
    fn test_parse_slide_shapes() {
        let xml = slide(&format!(
            "{}{}",
            text_shape(&["Title"]),
            text_shape(&["line one", "line two"])
        ));
        let shapes = parse_slide(&xml).unwrap();
        assert_eq!(shapes, vec!["Title", "line one\nline two"]);
    }

    #[test]
    fn test_shape_without_text_is_a_unit() {
        let xml = slide(&format!(
            "<p:sp><p:nvSpPr/><p:spPr/></p:sp><p:pic><p:nvPicPr/></p:pic>{}",
            text_shape(&["caption"])
        ));
        let shapes = parse_slide(&xml).unwrap();
        assert_eq!(shapes, vec!["", "caption"]);
    }

    #[test]
    fn test_grouped_shapes_are_skipped() {
        let xml = slide(&format!(
            "<p:grpSp><p:nvGrpSpPr/><p:grpSpPr/>{}</p:grpSp>{}",
            text_shape(&["inside group"]),
            text_shape(&["top level"])
        ));
        let shapes = parse_slide(&xml).unwrap();
        assert_eq!(shapes, vec!["top level"]);
    }

    #[test]
    fn test_line_break_in_paragraph() {
        let xml = slide(
            "<p:sp><p:txBody><a:p><a:r><a:t>up</a:t></a:r><a:br/><a:r><a:t>down</a:t></a:r></a:p><a:p/></p:txBody></p:sp>",
        );
        let shapes = parse_slide(&xml).unwrap();
        assert_eq!(shapes, vec!["up\ndown\n"]);
    }

    #[test]
    fn test_parse_slide_ids_and_relationships() {
        let ids = parse_slide_ids(&presentation(&["rId3", "rId2"])).unwrap();
        assert_eq!(ids, vec!["rId3", "rId2"]);

        let targets = parse_relationships(&rels(&[("rId2", "slides/slide1.xml")])).unwrap();
        assert_eq!(targets.get("rId2").map(String::as_str), Some("slides/slide1.xml"));
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide9.xml"), "ppt/slides/slide9.xml");
    }

    #[test]
    fn test_read_slide_shapes_in_presentation_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("deck.pptx");
        let first = slide(&format!("{}{}", text_shape(&["cat cat"]), text_shape(&["dog"])));
        let second = slide(&text_shape(&["bird"]));
        write_package(
            &path,
            &[
                (PRESENTATION_PART, &presentation(&["rId7", "rId8"])),
                (
                    PRESENTATION_RELS,
                    &rels(&[("rId8", "slides/slide1.xml"), ("rId7", "slides/slide2.xml")]),
                ),
                ("ppt/slides/slide1.xml", &second),
                ("ppt/slides/slide2.xml", &first),
            ],
        );

        let units = read_slide_shapes(&path).unwrap();
        assert_eq!(
            units,
            vec![
                Unit::new(1, "cat cat"),
                Unit::new(2, "dog"),
                Unit::new(3, "bird")
            ]
        );
    }

    #[test]
    fn test_read_slide_shapes_dangling_relationship() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.pptx");
        write_package(
            &path,
            &[
                (PRESENTATION_PART, &presentation(&["rId2"])),
                (PRESENTATION_RELS, &rels(&[])),
            ],
        );

        let err = read_slide_shapes(&path).unwrap_err();
        assert!(err.to_string().contains("slide relationship rId2 not found"));
    }
}
