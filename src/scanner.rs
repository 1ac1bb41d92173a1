use crate::{
    builder::ScannerBuilder,
    pattern::Pattern,
    region::{Region, Span},
    Error,
};

/// An ordered set of patterns searched together.
///
/// [`Scanner::find_next_match`] reports the match that starts earliest among
/// all patterns. When several patterns match at the same offset, the one
/// given first wins.
///
/// A scanner remembers the last result of every pattern. As long as the
/// caller keeps asking about the same string with offsets that only move
/// forward, a remembered match that still lies ahead of the new offset is
/// reused instead of searched for again.
///
/// Caching never changes results. Asking about a different string, or
/// moving backwards, drops everything remembered. Patterns mentioning `\G`
/// are always searched again, since their matches depend on the exact
/// offset.
///
/// # Example
///
/// ```
/// use regex_scanner::Scanner;
///
/// let mut scanner = Scanner::new(&[r"[a-z]+", r"\d+"]).unwrap();
/// let line = "let x1 = 42";
///
/// let m = scanner.find_next_match(line, 0).unwrap().unwrap();
/// assert_eq!((m.pattern(), m.span().range()), (0, 0..3));
///
/// let m = scanner.find_next_match(line, 6).unwrap().unwrap();
/// assert_eq!((m.pattern(), m.span().range()), (1, 9..11));
///
/// assert!(scanner.find_next_match(line, 11).unwrap().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Scanner {
    patterns: Vec<Pattern>,
    cache: Cache,
}

/// Per-pattern results remembered from previous calls.
#[derive(Clone, Debug)]
struct Cache {
    /// The last outcome for each pattern. `None` means "no match", but only
    /// for slots below `valid`.
    results: Vec<Option<Region>>,
    /// The number of leading slots in `results` that hold trustworthy
    /// outcomes for `subject`.
    valid: usize,
    /// The string the slots were computed for.
    subject: String,
    /// The offset of the most recent search.
    start: usize,
    stats: ScanStats,
}

impl Cache {
    fn new(len: usize) -> Cache {
        Cache {
            results: vec![None; len],
            valid: 0,
            subject: String::new(),
            start: 0,
            stats: ScanStats::default(),
        }
    }

    fn clear(&mut self) {
        for slot in self.results.iter_mut() {
            *slot = None;
        }
        self.valid = 0;
    }

    /// Drop the slots along with the remembered subject and offset.
    fn reset(&mut self) {
        self.clear();
        self.subject.clear();
        self.start = 0;
    }

    /// Record the new query and report whether remembered slots may be
    /// used for it.
    fn begin(&mut self, haystack: &str, start: usize) -> bool {
        let usable = self.subject == haystack && start >= self.start;
        self.start = start;
        if !usable {
            trace!(
                "invalidating scanner cache (valid slots: {}, start: {})",
                self.valid,
                start
            );
            self.clear();
            self.subject.clear();
            self.subject.push_str(haystack);
        }
        usable
    }
}

/// Counters describing how a scanner's cache has been used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Searches handed to the regex engine.
    pub searches: u64,
    /// Times a remembered result was used instead of searching.
    pub cache_hits: u64,
}

/// The winning match of a [`Scanner::find_next_match`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanMatch {
    pattern: usize,
    captures: Vec<CaptureIndex>,
}

impl ScanMatch {
    fn new(pattern: usize, region: &Region) -> ScanMatch {
        let captures = region
            .iter()
            .enumerate()
            .map(|(index, span)| CaptureIndex { index, span })
            .collect();
        ScanMatch { pattern, captures }
    }

    /// The index of the pattern that matched.
    pub fn pattern(&self) -> usize {
        self.pattern
    }

    /// Every capture group of the match, starting with group 0.
    pub fn captures(&self) -> &[CaptureIndex] {
        &self.captures
    }

    pub fn into_captures(self) -> Vec<CaptureIndex> {
        self.captures
    }

    /// The span of the whole match.
    pub fn span(&self) -> Span {
        match self.captures[0].span {
            Some(span) => span,
            None => unreachable!("group 0 always participates in a match"),
        }
    }

    pub fn start(&self) -> usize {
        self.span().start
    }

    pub fn end(&self) -> usize {
        self.span().end
    }
}

/// One capture group of a [`ScanMatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureIndex {
    index: usize,
    span: Option<Span>,
}

impl CaptureIndex {
    /// The group number. Group 0 is the whole match.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Where the group matched, or `None` if it did not take part.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn start(&self) -> Option<usize> {
        self.span.map(|s| s.start)
    }

    pub fn end(&self) -> Option<usize> {
        self.span.map(|s| s.end)
    }

    /// The text of this group within the searched string.
    ///
    /// # Panics
    ///
    /// Panics if `haystack` is not the string the match came from and the
    /// span falls outside of it.
    pub fn as_str<'h>(&self, haystack: &'h str) -> Option<&'h str> {
        self.span.map(|s| &haystack[s.range()])
    }
}

impl Scanner {
    /// Compile `patterns`, in order, into a scanner with default settings.
    ///
    /// Use [`ScannerBuilder`] to change engine limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for the first pattern that fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Scanner, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ScannerBuilder::new().build(patterns)
    }

    pub(crate) fn from_patterns(patterns: Vec<Pattern>) -> Scanner {
        debug!("built scanner with {} patterns", patterns.len());
        let cache = Cache::new(patterns.len());
        Scanner { patterns, cache }
    }

    /// The number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All patterns, in priority order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn pattern(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Usage counters for the result cache.
    pub fn stats(&self) -> ScanStats {
        self.cache.stats
    }

    /// Forget every remembered result. The next call searches every pattern.
    pub fn clear_cache(&mut self) {
        self.cache.reset();
    }

    /// Find the best match at or after `start` in `haystack`.
    ///
    /// The best match is the one starting earliest. On a tie, the pattern
    /// with the lowest index wins. `Ok(None)` means no pattern matches.
    ///
    /// Repeating a call with the same arguments gives the same answer.
    /// Calls over the same string with non-decreasing offsets reuse earlier
    /// work; anything else starts from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Search`] if the engine fails on one of the patterns.
    /// Everything remembered is dropped in that case.
    ///
    /// # Panics
    ///
    /// Panics if `start` is greater than `haystack.len()` or does not fall
    /// on a UTF-8 boundary.
    pub fn find_next_match(
        &mut self,
        haystack: &str,
        start: usize,
    ) -> Result<Option<ScanMatch>, Error> {
        let use_cache = self.cache.begin(haystack, start);

        let mut best: Option<(usize, usize)> = None;
        for (i, pattern) in self.patterns.iter().enumerate() {
            let reusable = use_cache
                && i < self.cache.valid
                && !pattern.is_anchored_to_search_start()
                && self.cache.results[i]
                    .as_ref()
                    .map_or(true, |r| r.start() >= start);

            if reusable {
                self.cache.stats.cache_hits += 1;
            } else {
                trace!("searching pattern {} from offset {}", i, start);
                self.cache.stats.searches += 1;
                let found = match pattern.search(haystack, start) {
                    Ok(found) => found,
                    Err(err) => {
                        self.cache.reset();
                        return Err(err.at_index(i));
                    }
                };
                self.cache.results[i] = found;
                self.cache.valid = i + 1;
            }

            let Some(ref region) = self.cache.results[i] else {
                continue;
            };
            let location = region.start();
            if best.map_or(true, |(_, at)| location < at) {
                best = Some((i, location));
            }
            // Nothing can start before `start`, and later patterns lose ties.
            if location == start {
                break;
            }
        }

        Ok(best.and_then(|(i, _)| {
            self.cache.results[i].as_ref().map(|r| ScanMatch::new(i, r))
        }))
    }
}
