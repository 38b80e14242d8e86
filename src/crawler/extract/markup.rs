//! Strict XHTML scanner
//!
//! Reads the body as XML and rejects anything a strict parser would reject.
//! Element and attribute names are compared case-insensitively.

use super::{ExtractError, RawReferences};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Scans well-formed markup for link-bearing attributes
///
/// # Returns
///
/// * `Ok(RawReferences)` - References in document order, grouped by element
/// * `Err(ExtractError)` - The markup is not well formed
pub fn scan(body: &str) -> Result<RawReferences, ExtractError> {
    let mut reader = Reader::from_str(body);
    // End tags are matched below without regard to case
    reader.config_mut().check_end_names = false;

    let mut references = RawReferences::default();
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = collect(&element, &mut references)?;
                open.push(name);
            }
            Event::Empty(element) => {
                collect(&element, &mut references)?;
            }
            Event::End(element) => {
                let found = lowercase_name(element.name().as_ref());
                match open.pop() {
                    Some(expected) if expected == found => {}
                    Some(expected) => return Err(ExtractError::MismatchedEnd { expected, found }),
                    None => return Err(ExtractError::UnexpectedEnd(found)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match open.pop() {
        Some(name) => Err(ExtractError::UnclosedElement(name)),
        None => Ok(references),
    }
}

/// Records the link attributes of one element and returns its lowercase name
fn collect(element: &BytesStart<'_>, references: &mut RawReferences) -> Result<String, ExtractError> {
    let name = lowercase_name(element.name().as_ref());
    let wanted = match name.as_str() {
        "a" | "area" | "link" | "base" => Some("href"),
        "img" | "source" | "script" => Some("src"),
        _ => None,
    };

    for attribute in element.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = lowercase_name(attribute.key.as_ref());

        if key == "style" {
            let value = attribute.unescape_value()?;
            references.push_style(&value);
            continue;
        }

        if wanted != Some(key.as_str()) {
            continue;
        }

        let value = attribute.unescape_value()?.into_owned();
        match name.as_str() {
            "a" => references.anchors.push(value),
            "area" => references.areas.push(value),
            "img" => references.images.push(value),
            "source" => references.media.push(value),
            "script" => references.scripts.push(value),
            "link" => references.stylesheets.push(value),
            "base" => {
                if references.base.is_none() {
                    references.base = Some(value);
                }
            }
            _ => {}
        }
    }

    Ok(name)
}

fn lowercase_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}
