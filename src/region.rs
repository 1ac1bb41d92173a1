use core::ops::Range;

/// A half-open byte range `[start, end)` into a subject string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// The inclusive start offset.
    pub start: usize,
    /// The exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Create a new span. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Span {
        debug_assert!(start <= end, "invalid span {}..{}", start, end);
        Span { start, end }
    }

    /// The number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Span {
        Span::new(range.start, range.end)
    }
}

/// The capture groups of one successful search.
///
/// Group 0 is always the whole match and is always present. Every other
/// group is `None` when it did not participate in the match (for example,
/// the unused side of an alternation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    whole: Span,
    groups: Vec<Option<Span>>,
}

impl Region {
    /// Copy the group offsets out of an engine result.
    ///
    /// Returns `None` only if the engine reported a match without a group 0.
    pub(crate) fn from_captures(
        caps: &fancy_regex::Captures<'_>,
    ) -> Option<Region> {
        let whole = caps.get(0).map(|m| Span::new(m.start(), m.end()))?;
        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|m| Span::new(m.start(), m.end())))
            .collect();
        Some(Region { whole, groups })
    }

    /// The number of groups, including group 0.
    pub fn count(&self) -> usize {
        self.groups.len() + 1
    }

    /// The span of group `index`, or `None` if the group did not match.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn get(&self, index: usize) -> Option<Span> {
        if index == 0 {
            Some(self.whole)
        } else {
            self.groups[index - 1]
        }
    }

    /// The start offset of group `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn location_at(&self, index: usize) -> Option<usize> {
        self.get(index).map(|span| span.start)
    }

    /// The length in bytes of group `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn length_at(&self, index: usize) -> Option<usize> {
        self.get(index).map(|span| span.len())
    }

    /// The span of the whole match.
    pub fn span(&self) -> Span {
        self.whole
    }

    pub fn start(&self) -> usize {
        self.whole.start
    }

    pub fn end(&self) -> usize {
        self.whole.end
    }

    /// Iterate over every group in order, starting with group 0.
    pub fn iter(&self) -> impl Iterator<Item = Option<Span>> + '_ {
        core::iter::once(Some(self.whole)).chain(self.groups.iter().copied())
    }
}
