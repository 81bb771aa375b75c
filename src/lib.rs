//! Line-oriented diffs between two revisions of a configuration unit.
//!
//! [`compute_structured_diff`] turns two texts into [`DiffSegment`]s, which can
//! then be shown either as a fully numbered listing ([`render_numbered`]) or as
//! a unified diff ([`render_unified`]).

pub mod color;
pub mod diff;
pub mod options;
pub mod render;
pub mod segment;


pub use color::{Ansi, Colorizer, Paint, Plain, colorizer};
pub use diff::compute_structured_diff;
pub use options::{FileLabels, OutputFormat, RenderOptions};
pub use render::{
    DEFAULT_CONTEXT, Hunk, Line, group_hunks, render, render_numbered, render_unified,
    render_unified_default,
};
pub use segment::{DiffSegment, LineSpan, SegmentKind};
