mod scanner;

pub use scanner::{is_svg_filename, scan_svg_dir, IconOrigin, SourceIcon};
