use once_cell::sync::Lazy;
use quickcheck::{Arbitrary, Gen, QuickCheck};

use regex_scanner::{Pattern, ScanMatch, Scanner, Span};

const SOURCES: &[&str] = &[
    r"a+",
    r"ab",
    r"b(a|c)*",
    r"\d+",
    r"\Gx",
    r"(?<=a)c",
    r"(\s)?x(\d)?",
    r"\b",
    r"\s*$",
];

/// Compiled once and cloned per test case.
static SCANNER: Lazy<Scanner> = Lazy::new(|| Scanner::new(SOURCES).unwrap());

/// The patterns as standalone regexes, searched one by one by `oracle`.
static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    SOURCES.iter().map(|src| Pattern::new(src).unwrap()).collect()
});

/// A winning pattern index and the spans of all of its groups.
type Found = Option<(usize, Vec<Option<Span>>)>;

/// A short ASCII line, so every offset is a char boundary.
#[derive(Clone, Debug)]
struct Line(String);

impl Arbitrary for Line {
    fn arbitrary(g: &mut Gen) -> Line {
        let alphabet = ['a', 'b', 'c', 'x', '1', ' '];
        let len = usize::arbitrary(g) % 24;
        Line((0..len).map(|_| *g.choose(&alphabet).unwrap()).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Line>> {
        let shrunk = self.0.shrink().filter(|s| s.is_ascii()).map(Line);
        Box::new(shrunk)
    }
}

fn scanner() -> Scanner {
    SCANNER.clone()
}

/// Search every pattern on its own and keep the earliest start, preferring
/// the lower index when two start together.
fn oracle(haystack: &str, start: usize) -> Found {
    let mut best: Option<(usize, regex_scanner::Region)> = None;
    for (i, pattern) in PATTERNS.iter().enumerate() {
        let Some(region) = pattern.search(haystack, start).unwrap() else {
            continue;
        };
        if best.as_ref().map_or(true, |(_, b)| region.start() < b.start()) {
            best = Some((i, region));
        }
    }
    best.map(|(i, region)| (i, region.iter().collect()))
}

fn found(m: Option<ScanMatch>) -> Found {
    m.map(|m| (m.pattern(), m.captures().iter().map(|c| c.span()).collect()))
}

/// Ask the scanner under test and compare against the oracle.
fn agrees(cached: &mut Scanner, haystack: &str, start: usize) -> bool {
    found(cached.find_next_match(haystack, start).unwrap())
        == oracle(haystack, start)
}

fn normalize(line: &Line, offsets: &[usize]) -> Vec<usize> {
    let mut offsets: Vec<usize> =
        offsets.iter().map(|&at| at % (line.0.len() + 1)).collect();
    offsets.sort_unstable();
    offsets
}

#[test]
fn qc_forward_scan_matches_oracle() {
    fn prop(line: Line, offsets: Vec<usize>) -> bool {
        let mut cached = scanner();
        normalize(&line, &offsets)
            .into_iter()
            .all(|at| agrees(&mut cached, &line.0, at))
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Line, Vec<usize>) -> bool);
}

#[test]
fn qc_tokenizing_loop_matches_oracle() {
    // Drive the scanner the way a tokenizer does: resume at each match end.
    fn prop(line: Line) -> bool {
        let mut cached = scanner();
        let mut at = 0;
        while at <= line.0.len() {
            let got = cached.find_next_match(&line.0, at).unwrap();
            if found(got.clone()) != oracle(&line.0, at) {
                return false;
            }
            match got {
                Some(m) if m.end() > at => at = m.end(),
                Some(_) => at += 1,
                None => break,
            }
        }
        true
    }
    QuickCheck::new().tests(500).quickcheck(prop as fn(Line) -> bool);
}

#[test]
fn qc_switching_lines_never_leaks_results() {
    fn prop(a: Line, b: Line, queries: Vec<(bool, usize)>) -> bool {
        let mut cached = scanner();
        queries.into_iter().all(|(first, at)| {
            let line = if first { &a } else { &b };
            let at = at % (line.0.len() + 1);
            agrees(&mut cached, &line.0, at)
        })
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Line, Line, Vec<(bool, usize)>) -> bool);
}

#[test]
fn qc_unordered_offsets_match_oracle() {
    // Backward moves must drop the cache rather than reuse passed matches.
    fn prop(line: Line, offsets: Vec<usize>) -> bool {
        let mut cached = scanner();
        offsets.into_iter().all(|at| {
            let at = at % (line.0.len() + 1);
            agrees(&mut cached, &line.0, at)
        })
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Line, Vec<usize>) -> bool);
}

#[test]
fn tie_prefers_lower_index() {
    // "a+", "ab" and "\b" all start at 1; the first listed pattern wins.
    let mut cached = scanner();
    assert_eq!(oracle(" ab ab", 1).map(|(i, _)| i), Some(0));
    assert!(agrees(&mut cached, " ab ab", 1));
    assert_eq!(oracle(" ab ab", 4).map(|(i, _)| i), Some(0));
    assert!(agrees(&mut cached, " ab ab", 4));
}

#[test]
fn qc_repeated_query_is_idempotent() {
    fn prop(line: Line, at: usize) -> bool {
        let at = at % (line.0.len() + 1);
        let mut cached = scanner();
        let first = cached.find_next_match(&line.0, at).unwrap();
        let second = cached.find_next_match(&line.0, at).unwrap();
        first == second
    }
    QuickCheck::new().tests(300).quickcheck(prop as fn(Line, usize) -> bool);
}
