use crate::render::DEFAULT_CONTEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Every line, each with its line number.
    #[default]
    Numbered,
    /// Changed lines with context, grouped into `@@` hunks.
    Unified,
}

/// How a diff is rendered. Built once by the caller and passed down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub colorize: bool,
    pub context_lines: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            colorize: false,
            context_lines: DEFAULT_CONTEXT,
        }
    }
}

/// Names printed in the `---`/`+++` headers of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabels {
    pub old: String,
    pub new: String,
}

impl FileLabels {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}
