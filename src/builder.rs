use crate::{pattern::Pattern, scanner::Scanner, Error};

/// Engine settings applied to every pattern a builder compiles.
///
/// `None` leaves the engine's own default in place.
#[derive(Clone, Debug, Default)]
pub(crate) struct Config {
    pub(crate) backtrack_limit: Option<usize>,
    pub(crate) delegate_size_limit: Option<usize>,
    pub(crate) delegate_dfa_size_limit: Option<usize>,
}

/// A configurable builder for a [`Scanner`].
///
/// Every pattern is compiled with the same settings, so a scanner never
/// depends on process-wide state.
///
/// # Example
///
/// ```
/// use regex_scanner::ScannerBuilder;
///
/// let mut scanner = ScannerBuilder::new()
///     .backtrack_limit(10_000)
///     .build(&[r"\d+", r"\w+"])
///     .unwrap();
/// let m = scanner.find_next_match("abc 123", 3).unwrap().unwrap();
/// assert_eq!(m.pattern(), 0);
/// assert_eq!(m.span().range(), 4..7);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScannerBuilder {
    config: Config,
}

impl ScannerBuilder {
    /// Create a new builder with the engine's default settings.
    pub fn new() -> ScannerBuilder {
        ScannerBuilder::default()
    }

    /// Set the number of backtracking steps a single search may take before
    /// it fails with [`Error::Search`].
    pub fn backtrack_limit(&mut self, limit: usize) -> &mut ScannerBuilder {
        self.config.backtrack_limit = Some(limit);
        self
    }

    /// Set the approximate size limit, in bytes, of the compiled program
    /// for patterns the engine runs without backtracking.
    pub fn delegate_size_limit(
        &mut self,
        limit: usize,
    ) -> &mut ScannerBuilder {
        self.config.delegate_size_limit = Some(limit);
        self
    }

    /// Set the approximate cache size limit, in bytes, of the lazy DFA used
    /// for patterns the engine runs without backtracking.
    pub fn delegate_dfa_size_limit(
        &mut self,
        limit: usize,
    ) -> &mut ScannerBuilder {
        self.config.delegate_dfa_size_limit = Some(limit);
        self
    }

    /// Compile a single pattern with this builder's settings.
    pub fn build_pattern(&self, source: &str) -> Result<Pattern, Error> {
        Pattern::with_config(source, &self.config)
    }

    /// Compile every pattern, in order, into a scanner.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Syntax`] encountered, tagged with the
    /// index of the offending pattern.
    pub fn build<I, S>(&self, patterns: I) -> Result<Scanner, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .enumerate()
            .map(|(i, source)| {
                self.build_pattern(source.as_ref()).map_err(|e| e.at_index(i))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Scanner::from_patterns(patterns))
    }
}
