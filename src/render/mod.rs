mod numbered;
mod unified;

pub use numbered::render_numbered;
pub use unified::{
    DEFAULT_CONTEXT, Hunk, Line, group_hunks, render_unified, render_unified_default,
};

use crate::color::colorizer;
use crate::options::{FileLabels, OutputFormat, RenderOptions};
use crate::segment::DiffSegment;

/// Renders segments in the format `options` selects.
pub fn render(segments: &[DiffSegment], labels: &FileLabels, options: &RenderOptions) -> String {
    let colors = colorizer(options.colorize);
    match options.format {
        OutputFormat::Numbered => render_numbered(segments, colors),
        OutputFormat::Unified => render_unified(segments, labels, options.context_lines, colors),
    }
}
