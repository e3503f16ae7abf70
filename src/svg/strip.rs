use super::SvgError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

/// Remove the named attributes from the root `<svg>` element and from each
/// of its direct child elements, leaving deeper descendants untouched.
///
/// The root element is matched by local tag name, so namespace-prefixed
/// documents (`<svg:svg>`) normalize the same way. Everything else in the
/// document (XML declaration, comments, text, attribute order) passes
/// through unchanged, which keeps the rewrite idempotent: feeding the
/// output back in produces identical bytes.
pub fn strip_attributes(markup: &str, strip: &[String]) -> Result<String, SvgError> {
    let mut reader = Reader::from_str(markup);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();

    // Element nesting depth: the root element sits at 0, its direct
    // children at 1. Only those two levels are stripped.
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    if e.local_name().as_ref() != b"svg" {
                        return Err(SvgError::NoRootElement);
                    }
                    saw_root = true;
                }
                if depth <= 1 {
                    writer.write_event(Event::Start(remove_attributes(&e, strip)?))?;
                } else {
                    writer.write_event(Event::Start(e))?;
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    if e.local_name().as_ref() != b"svg" {
                        return Err(SvgError::NoRootElement);
                    }
                    saw_root = true;
                }
                if depth <= 1 {
                    writer.write_event(Event::Empty(remove_attributes(&e, strip)?))?;
                } else {
                    writer.write_event(Event::Empty(e))?;
                }
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                writer.write_event(Event::End(e))?;
            }
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event)?,
            Err(e) => return Err(SvgError::Xml(e)),
        }
        buf.clear();
    }

    if !saw_root {
        return Err(SvgError::NoRootElement);
    }

    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// Rebuild an element without the stripped attributes. Attribute names are
/// compared verbatim, so a prefixed `foo:width` is not touched by `width`.
fn remove_attributes(elem: &BytesStart, strip: &[String]) -> Result<BytesStart<'static>, SvgError> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);

    for attr in elem.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if !strip.iter().any(|rule| rule.as_bytes() == key) {
            out.push_attribute((attr.key.as_ref(), attr.value.as_ref()));
        }
    }

    Ok(out)
}
