//! Owned source text plus filename, and the byte-offset -> (line, column)
//! lookup every diagnostic needs.

use std::path::{Path, PathBuf};

use zlint_span::{LineColumn, OneIndexed, Span};

/// Owned UTF-8 source text for one file, with a pathname and a cached
/// line-start index.
///
/// `Source` is built once per file and borrowed immutably for the lifetime
/// of that file's analysis (the AST, the semantic model, and the
/// `LintContext` all borrow from it, never own it).
#[derive(Debug, Clone)]
pub struct Source {
    text: String,
    name: PathBuf,
    /// Byte offset of the start of each line. `line_starts[0] == 0`.
    line_starts: Vec<u32>,
}

impl Source {
    pub fn new(name: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            text,
            name: name.into(),
            line_starts,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn name(&self) -> &Path {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn snippet(&self, span: Span) -> &str {
        span.text(&self.text)
    }

    /// Number of lines, counting a trailing unterminated line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The one-indexed line number containing byte offset `offset`.
    pub fn line_index(&self, offset: u32) -> OneIndexed {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => OneIndexed::from_zero_indexed(line as u32),
            Err(next_line) => OneIndexed::from_zero_indexed(next_line as u32 - 1),
        }
    }

    /// The byte offset of the first byte of `line` (one-indexed).
    pub fn line_start(&self, line: OneIndexed) -> u32 {
        self.line_starts
            .get(line.to_zero_indexed() as usize)
            .copied()
            .unwrap_or_else(|| self.len())
    }

    /// The byte offset one past the last byte of `line`, excluding its
    /// line terminator.
    pub fn line_end(&self, line: OneIndexed) -> u32 {
        let start = self.line_start(line);
        let next_start = self
            .line_starts
            .get(line.to_zero_indexed() as usize + 1)
            .copied()
            .unwrap_or_else(|| self.len());
        let mut end = next_start;
        let bytes = self.text.as_bytes();
        if end > start && bytes[end as usize - 1] == b'\n' {
            end -= 1;
            if end > start && bytes[end as usize - 1] == b'\r' {
                end -= 1;
            }
        }
        end
    }

    pub fn line_span(&self, line: OneIndexed) -> Span {
        Span::new(self.line_start(line), self.line_end(line))
    }

    pub fn line_text(&self, line: OneIndexed) -> &str {
        self.line_span(line).text(&self.text)
    }

    /// Derive the one-indexed `(line, column)` of a byte offset. Column is a
    /// UTF-8 byte-derived codepoint count from the start of the line (not a
    /// display width), matching `ruff_source_file::SourceLocation`'s
    /// contract.
    pub fn line_column(&self, offset: u32) -> LineColumn {
        let line = self.line_index(offset);
        let line_start = self.line_start(line);
        let column = self.text[line_start as usize..offset as usize]
            .chars()
            .count() as u32;
        LineColumn {
            line,
            column: OneIndexed::from_zero_indexed(column),
        }
    }

    /// Inverse of [`Source::line_column`]: the byte offset of `(line, column)`.
    /// Out-of-range columns clamp to the line's end.
    pub fn offset_of(&self, line: OneIndexed, column: OneIndexed) -> u32 {
        let line_start = self.line_start(line);
        let line_end = self.line_end(line);
        let mut remaining = column.to_zero_indexed();
        let mut offset = line_start;
        for (idx, ch) in self.text[line_start as usize..line_end as usize]
            .char_indices()
        {
            if remaining == 0 {
                return line_start + idx as u32;
            }
            remaining -= 1;
            offset = line_start + idx as u32 + ch.len_utf8() as u32;
        }
        offset.min(line_end)
    }
}

fn compute_line_starts(text: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (idx, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(idx as u32 + 1);
        }
    }
    starts
}

/// A borrowed view over a [`Source`]'s text, the facade rules use to slice
/// snippets out of the file without holding a reference to `Source` itself.
///
/// Mirrors the teacher's `Locator`: a thin wrapper that rules and formatters
/// pass around instead of raw `&str` so that line/column derivation stays
/// centralized.
#[derive(Debug, Clone, Copy)]
pub struct Locator<'a> {
    source: &'a Source,
}

impl<'a> Locator<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self { source }
    }

    #[inline]
    pub fn contents(&self) -> &'a str {
        self.source.text()
    }

    #[inline]
    pub fn slice(&self, span: Span) -> &'a str {
        self.source.snippet(span)
    }

    #[inline]
    pub fn line_column(&self, offset: u32) -> LineColumn {
        self.source.line_column(offset)
    }

    #[inline]
    pub fn line_span(&self, line: OneIndexed) -> Span {
        self.source.line_span(line)
    }

    #[inline]
    pub fn source(&self) -> &'a Source {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_index_basic() {
        let src = Source::new("a.zig", "const a = 1;\nconst b = 2;\n");
        assert_eq!(src.line_index(0).get(), 1);
        assert_eq!(src.line_index(13).get(), 2);
        assert_eq!(src.line_count(), 3); // trailing empty line after final \n
    }

    #[test]
    fn line_column_round_trips_at_column_one() {
        let src = Source::new("a.zig", "const a = 1;\nconst b = 2;\n");
        let second_line_start = src.line_start(OneIndexed::from_zero_indexed(1));
        let lc = src.line_column(second_line_start);
        assert_eq!(lc.column.get(), 1);
        assert_eq!(src.offset_of(lc.line, lc.column), second_line_start);
    }

    #[test]
    fn crlf_columns_match_lf() {
        let lf = Source::new("a.zig", "const a = 1;\nconst b = 2;");
        let crlf = Source::new("a.zig", "const a = 1;\r\nconst b = 2;");
        let lf_offset = lf.line_start(OneIndexed::from_zero_indexed(1));
        let crlf_offset = crlf.line_start(OneIndexed::from_zero_indexed(1));
        assert_eq!(lf.line_column(lf_offset).column.get(), 1);
        assert_eq!(crlf.line_column(crlf_offset).column.get(), 1);
    }

    #[test]
    fn empty_source_has_one_line() {
        let src = Source::new("empty.zig", "");
        assert_eq!(src.line_count(), 1);
        assert_eq!(src.line_index(0).get(), 1);
    }
}
