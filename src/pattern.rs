use memchr::memmem;

use crate::{builder::Config, region::Region, Error};

/// The marker for "match must begin at the search start" in pattern syntax.
pub(crate) const SEARCH_START_ANCHOR: &str = r"\G";

/// A single compiled pattern.
///
/// A pattern keeps its source text next to the compiled regex. The source is
/// consulted by the scanner to decide whether results for this pattern may
/// be cached (see [`Pattern::is_anchored_to_search_start`]).
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: fancy_regex::Regex,
}

impl Pattern {
    /// Compile a pattern with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the engine rejects `source`.
    pub fn new(source: &str) -> Result<Pattern, Error> {
        Pattern::with_config(source, &Config::default())
    }

    pub(crate) fn with_config(
        source: &str,
        config: &Config,
    ) -> Result<Pattern, Error> {
        let mut builder = fancy_regex::RegexBuilder::new(source);
        if let Some(limit) = config.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        if let Some(limit) = config.delegate_size_limit {
            builder.delegate_size_limit(limit);
        }
        if let Some(limit) = config.delegate_dfa_size_limit {
            builder.delegate_dfa_size_limit(limit);
        }
        let regex =
            builder.build().map_err(|err| Error::syntax(source, err))?;
        Ok(Pattern { source: source.to_string(), regex })
    }

    /// The source text this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern's source text contains `needle`.
    ///
    /// This looks at the text only. It does not know whether `needle` sits
    /// inside a character class, a comment or an escape.
    pub fn contains(&self, needle: &str) -> bool {
        memmem::find(self.source.as_bytes(), needle.as_bytes()).is_some()
    }

    /// Whether the pattern mentions `\G`, meaning its result depends on the
    /// exact offset a search starts from.
    pub fn is_anchored_to_search_start(&self) -> bool {
        self.contains(SEARCH_START_ANCHOR)
    }

    /// The number of capture groups, including group 0.
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    /// Find the leftmost match that begins at or after `start`.
    ///
    /// Text before `start` is still visible to lookbehind, and `\G` matches
    /// at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Search`] if the engine gives up, for example when
    /// the backtrack limit is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if `start` is greater than `haystack.len()` or does not fall
    /// on a UTF-8 boundary.
    pub fn search(
        &self,
        haystack: &str,
        start: usize,
    ) -> Result<Option<Region>, Error> {
        assert!(
            start <= haystack.len(),
            "start offset {} out of bounds for haystack of length {}",
            start,
            haystack.len(),
        );
        assert!(
            haystack.is_char_boundary(start),
            "start offset {} is not on a char boundary",
            start,
        );
        let caps = self
            .regex
            .captures_from_pos(haystack, start)
            .map_err(|err| Error::search(&self.source, err))?;
        Ok(caps.as_ref().and_then(Region::from_captures))
    }

    /// Whether the pattern matches anywhere in `haystack`.
    pub fn is_match(&self, haystack: &str) -> Result<bool, Error> {
        self.regex
            .is_match(haystack)
            .map_err(|err| Error::search(&self.source, err))
    }
}
