use super::SvgError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// What the generator needs from a source SVG: the root element's viewBox.
#[derive(Debug, Clone, Default)]
pub struct SvgInfo {
    /// Value of the root `viewBox` attribute, empty when absent
    pub view_box: String,
}

/// Locate the document's root element (matched by local tag name `svg`,
/// ignoring any namespace prefix) and read its `viewBox` attribute.
///
/// A document whose first element is not `svg`, or that contains no
/// element at all, is reported as [`SvgError::NoRootElement`]. A missing
/// `viewBox` is not an error; the value comes back empty.
pub fn inspect(markup: &str) -> Result<SvgInfo, SvgError> {
    let mut reader = Reader::from_str(markup);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => {
                if e.local_name().as_ref() != b"svg" {
                    return Err(SvgError::NoRootElement);
                }

                let mut view_box = String::new();
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.as_ref() == b"viewBox" {
                        view_box = attr.unescape_value()?.into_owned();
                        break;
                    }
                }

                return Ok(SvgInfo { view_box });
            }
            Event::Eof => return Err(SvgError::NoRootElement),
            _ => {}
        }
        buf.clear();
    }
}
