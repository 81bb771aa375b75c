use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};

const STDIN_PATH: &str = "-";

/// Where a revision body comes from and how it is encoded.
pub struct RevisionSource<'a> {
    pub path: &'a Path,
    pub base64: bool,
}

impl RevisionSource<'_> {
    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }

    pub fn display_name(&self) -> String {
        if self.is_stdin() {
            "<stdin>".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

/// Loads both revisions. Only one of them may come from stdin.
pub fn load_revisions(old: &RevisionSource, new: &RevisionSource) -> Result<(String, String)> {
    if old.is_stdin() && new.is_stdin() {
        bail!("only one revision can be read from stdin");
    }
    let old_text = load(old).context("failed to load old revision")?;
    let new_text = load(new).context("failed to load new revision")?;
    Ok((old_text, new_text))
}

fn load(source: &RevisionSource) -> Result<String> {
    let raw = if source.is_stdin() {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read(source.path)
            .with_context(|| format!("failed to read {}", source.path.display()))?
    };

    let bytes = if source.base64 {
        decode_base64(&raw).with_context(|| format!("{} is not valid base64", source.display_name()))?
    } else {
        raw
    };

    tracing::info!(source = %source.display_name(), bytes = bytes.len(), "loaded revision");
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", source.display_name()))
}

fn decode_base64(raw: &[u8]) -> Result<Vec<u8>> {
    let encoded: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(encoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_whitespace() {
        let decoded = decode_base64(b"cmVw\nbGljYXM6IDMK\n").unwrap();
        assert_eq!(decoded, b"replicas: 3\n");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_base64(b"not base64!").is_err());
    }

    #[test]
    fn test_two_stdin_sources_rejected() {
        let stdin = RevisionSource {
            path: Path::new("-"),
            base64: false,
        };
        let err = load_revisions(&stdin, &stdin).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let missing = RevisionSource {
            path: Path::new("/nonexistent/confdiff/old.yaml"),
            base64: false,
        };
        let present = RevisionSource {
            path: Path::new("/nonexistent/confdiff/new.yaml"),
            base64: false,
        };
        let err = load_revisions(&missing, &present).unwrap_err();
        assert_eq!(err.to_string(), "failed to load old revision");
        assert!(format!("{err:#}").contains("/nonexistent/confdiff/old.yaml"));
    }
}
