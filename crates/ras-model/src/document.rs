//! Ordered line documents.
//!
//! Project, plan and flow files are all line-oriented. A [`LineDocument`]
//! keeps every line together with its own terminator so lines that are not
//! touched by a mutation are written back byte-for-byte. New lines use the
//! document's dominant newline.

use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{ModelError, Result};

/// Line terminator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// A text file held as an ordered sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDocument {
    path: Option<PathBuf>,
    /// Raw lines, each including its terminator (the last one may have none).
    lines: Vec<String>,
    newline: Newline,
}

impl LineDocument {
    /// Parse a document from text.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        let newline = lines
            .iter()
            .find(|line| line.ends_with('\n'))
            .map(|line| {
                if line.ends_with("\r\n") {
                    Newline::CrLf
                } else {
                    Newline::Lf
                }
            })
            .unwrap_or_default();
        Self {
            path: None,
            lines,
            newline,
        }
    }

    /// Read a document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ModelError::io("read", path, e))?;
        let mut document = Self::parse(&text);
        document.path = Some(path.to_path_buf());
        trace!(path = %path.display(), line_count = document.len(), "read document");
        Ok(document)
    }

    /// Write the full document to `path`, replacing any existing content.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text()).map_err(|e| ModelError::io("write", path, e))?;
        trace!(path = %path.display(), line_count = self.len(), "wrote document");
        Ok(())
    }

    /// Path the document was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn newline(&self) -> Newline {
        self.newline
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Content of line `index` without its terminator.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|raw| strip_terminator(raw))
    }

    /// Line `index` including its terminator.
    pub fn raw_line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Iterate line contents without terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|raw| strip_terminator(raw))
    }

    /// Insert a new line before `index` (or at the end when `index >= len`).
    pub fn insert(&mut self, index: usize, content: &str) {
        let index = index.min(self.lines.len());
        if index == self.lines.len() {
            self.terminate_last();
        }
        let line = format!("{content}{}", self.newline.as_str());
        self.lines.insert(index, line);
    }

    /// Append a line at the end of the document.
    pub fn push(&mut self, content: &str) {
        self.insert(self.lines.len(), content);
    }

    /// Replace the content of line `index`, keeping its terminator.
    ///
    /// Returns `false` when the index is out of range.
    pub fn replace(&mut self, index: usize, content: &str) -> bool {
        let Some(raw) = self.lines.get_mut(index) else {
            return false;
        };
        let terminator = &raw[strip_terminator(raw).len()..];
        *raw = format!("{content}{terminator}");
        true
    }

    /// Replace the lines in `range` with `contents`.
    ///
    /// Each new line is terminated with the document newline, except that a
    /// block replacing an unterminated final line stays unterminated. The
    /// range is clamped to the document.
    pub fn splice<I, S>(&mut self, range: Range<usize>, contents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let len = self.lines.len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        if start == len {
            self.terminate_last();
        }
        let keep_open_end = end == len && end > start && !self.lines[len - 1].ends_with('\n');
        let newline = self.newline.as_str();
        let mut replacement: Vec<String> = contents
            .into_iter()
            .map(|content| format!("{}{newline}", content.as_ref()))
            .collect();
        if keep_open_end && let Some(last) = replacement.last_mut() {
            last.truncate(last.len() - newline.len());
        }
        self.lines.splice(start..end, replacement);
    }

    /// Index of the first line whose content satisfies `predicate`.
    pub fn position<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&str) -> bool,
    {
        self.lines().position(|line| predicate(line))
    }

    /// Concatenate all raw lines.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    fn terminate_last(&mut self) {
        let newline = self.newline.as_str();
        if let Some(last) = self.lines.last_mut()
            && !last.ends_with('\n')
        {
            last.push_str(newline);
        }
    }
}

impl fmt::Display for LineDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for raw in &self.lines {
            f.write_str(raw)?;
        }
        Ok(())
    }
}

fn strip_terminator(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_text() {
        let text = "Proj Title=Muncie\r\nCurrent Plan=p01\r\nGeom File=g01";
        let doc = LineDocument::parse(text);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.newline(), Newline::CrLf);
        assert_eq!(doc.line(1), Some("Current Plan=p01"));
        assert_eq!(doc.line(2), Some("Geom File=g01"));
        assert_eq!(doc.to_text(), text);
    }

    #[test]
    fn test_insert_uses_document_newline() {
        let mut doc = LineDocument::parse("A=1\r\nC=3\r\n");
        doc.insert(1, "B=2");
        assert_eq!(doc.to_text(), "A=1\r\nB=2\r\nC=3\r\n");
    }

    #[test]
    fn test_insert_after_unterminated_last_line() {
        let mut doc = LineDocument::parse("A=1\nB=2");
        doc.push("C=3");
        assert_eq!(doc.to_text(), "A=1\nB=2\nC=3\n");
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut doc = LineDocument::parse("A=1\n");
        doc.insert(42, "B=2");
        assert_eq!(doc.line(1), Some("B=2"));
    }

    #[test]
    fn test_replace_keeps_terminator() {
        let mut doc = LineDocument::parse("A=1\r\nB=2");
        assert!(doc.replace(0, "A=9"));
        assert!(doc.replace(1, "B=8"));
        assert!(!doc.replace(2, "C=7"));
        assert_eq!(doc.to_text(), "A=9\r\nB=8");
    }

    #[test]
    fn test_splice_replaces_block() {
        let mut doc = LineDocument::parse("head\n1\n2\n3\ntail\n");
        doc.splice(1..4, ["x", "y"]);
        assert_eq!(doc.to_text(), "head\nx\ny\ntail\n");
    }

    #[test]
    fn test_splice_keeps_open_end() {
        let mut doc = LineDocument::parse("head\n1\n2");
        doc.splice(1..3, ["x", "y"]);
        assert_eq!(doc.to_text(), "head\nx\ny");
    }

    #[test]
    fn test_empty_document() {
        let mut doc = LineDocument::parse("");
        assert!(doc.is_empty());
        doc.push("Geom File=g01");
        assert_eq!(doc.to_text(), "Geom File=g01\n");
    }

    #[test]
    fn test_read_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Muncie.prj");
        std::fs::write(&path, "Proj Title=Muncie\nGeom File=g01\n").unwrap();

        let doc = LineDocument::read(&path).unwrap();
        assert_eq!(doc.path(), Some(path.as_path()));
        doc.write(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Proj Title=Muncie\nGeom File=g01\n"
        );
    }

    #[test]
    fn test_read_missing_file() {
        let err = LineDocument::read(Path::new("/nonexistent/Muncie.prj")).unwrap_err();
        assert!(err.is_not_found());
    }
}
