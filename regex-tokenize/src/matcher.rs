use regex_scanner::{Error, ScanMatch, Scanner, Span};

/// Runs a scanner over whole lines
#[derive(Debug)]
pub struct Matcher<'a> {
    scanner: &'a mut Scanner,
}

/// A piece of a tokenized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub span: Span,
    /// The pattern that produced this segment, or `None` for text between
    /// matches
    pub pattern: Option<usize>,
}

impl Segment {
    /// Whether no pattern matched this text
    pub fn is_gap(&self) -> bool {
        self.pattern.is_none()
    }

    /// The text of this segment within `line`
    pub fn as_str<'h>(&self, line: &'h str) -> &'h str {
        &line[self.span.range()]
    }
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given scanner
    pub fn new(scanner: &'a mut Scanner) -> Self {
        Self { scanner }
    }

    /// Find the first match at or after `start`
    pub fn find(
        &mut self,
        line: &str,
        start: usize,
    ) -> Result<Option<ScanMatch>, Error> {
        self.scanner.find_next_match(line, start)
    }

    /// Iterate over successive matches in `line`
    pub fn matches<'m, 'h>(&'m mut self, line: &'h str) -> Matches<'m, 'h> {
        Matches { scanner: &mut *self.scanner, line, pos: 0, done: false }
    }

    /// Find all matches in `line`, stopping at the first engine failure
    pub fn find_all(&mut self, line: &str) -> Result<Vec<ScanMatch>, Error> {
        self.matches(line).collect()
    }

    /// Split `line` into consecutive segments that cover it exactly.
    ///
    /// Non-empty matches become segments tagged with their pattern; text no
    /// pattern claimed becomes a gap. Empty matches produce no segment.
    pub fn segments(&mut self, line: &str) -> Result<Vec<Segment>, Error> {
        let mut segments = Vec::new();
        let mut covered = 0;

        for m in self.matches(line) {
            let m = m?;
            let span = m.span();
            if span.is_empty() {
                continue;
            }
            if span.start > covered {
                segments.push(Segment {
                    span: Span::new(covered, span.start),
                    pattern: None,
                });
            }
            segments.push(Segment { span, pattern: Some(m.pattern()) });
            covered = span.end;
        }

        if covered < line.len() {
            segments.push(Segment {
                span: Span::new(covered, line.len()),
                pattern: None,
            });
        }
        Ok(segments)
    }
}

/// An iterator over successive scanner matches in one line.
///
/// Each search resumes where the previous match ended. After an empty match
/// the next search starts one character later.
#[derive(Debug)]
pub struct Matches<'m, 'h> {
    scanner: &'m mut Scanner,
    line: &'h str,
    pos: usize,
    done: bool,
}

impl<'m, 'h> Iterator for Matches<'m, 'h> {
    type Item = Result<ScanMatch, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos > self.line.len() {
            return None;
        }
        match self.scanner.find_next_match(self.line, self.pos) {
            Ok(Some(m)) => {
                self.pos = if m.span().is_empty() {
                    log::trace!("empty match at {}, stepping over", m.end());
                    next_char_end(self.line, m.end())
                } else {
                    m.end()
                };
                Some(Ok(m))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                log::debug!("stopping at {}: {}", self.pos, err);
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// The offset just past the character starting at `at`, or `at + 1` at the
/// end of `line`.
fn next_char_end(line: &str, at: usize) -> usize {
    match line[at..].chars().next() {
        Some(c) => at + c.len_utf8(),
        None => at + 1,
    }
}
