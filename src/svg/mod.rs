// SVG document handling: attribute stripping and root-element inspection

mod strip;
mod view_box;

pub use strip::strip_attributes;
pub use view_box::{inspect, SvgInfo};

use thiserror::Error;

/// Errors raised while reading or rewriting a single SVG document
#[derive(Debug, Error)]
pub enum SvgError {
    /// The document has no root element locally named `svg`
    #[error("no root <svg> element")]
    NoRootElement,

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
