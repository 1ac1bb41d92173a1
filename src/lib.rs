/*!
This crate provides a multi-pattern regex scanner built on a backtracking
regex engine.

A [`Scanner`] holds an ordered list of patterns. Given a string and a start
offset, [`Scanner::find_next_match`] returns the match that begins earliest
among all of the patterns. Ties go to the pattern that was given first. This
is the core query of TextMate-style syntax highlighting, where a line is
tokenized left to right by repeatedly asking "what is the next thing that
matches from here?"

Since such a tokenizer keeps asking about the same line with offsets that
only move forward, a scanner remembers the last result of every pattern and
reuses it while it still lies ahead of the requested offset. The cache is a
pure optimization: results are always identical to searching from scratch.

# Example

```
use regex_scanner::Scanner;

let patterns = [r#""[^"]*""#, r"\d+", r"[A-Za-z_]\w*"];
let mut scanner = Scanner::new(&patterns).unwrap();
let line = r#"print("total", 42)"#;

let mut at = 0;
let mut tokens = vec![];
while let Some(m) = scanner.find_next_match(line, at).unwrap() {
    tokens.push((m.pattern(), &line[m.span().range()]));
    at = m.end();
}
assert_eq!(tokens, vec![(2, "print"), (0, "\"total\""), (1, "42")]);
```

# Syntax

Patterns are compiled by [`fancy-regex`](https://docs.rs/fancy-regex), so
backreferences, lookaround and `\G` are available next to everything the
`regex` crate supports. `\G` matches at the offset a search starts from.

# Crate features

* **logging** - Emits `log` messages about cache invalidation and engine
  searches.
*/

#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod macros;

mod builder;
mod error;
mod pattern;
mod region;
mod scanner;

pub use crate::{
    builder::ScannerBuilder,
    error::Error,
    pattern::Pattern,
    region::{Region, Span},
    scanner::{CaptureIndex, ScanMatch, ScanStats, Scanner},
};

/// Escape every meta character in `text`, producing a pattern that matches
/// `text` literally.
pub use regex_syntax::escape;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_produces_literal_pattern() {
        let pat = Pattern::new(&escape("1+1=2?")).unwrap();
        let r = pat.search("is 1+1=2?", 0).unwrap().unwrap();
        assert_eq!(r.span(), Span::new(3, 9));
    }

    #[test]
    fn test_scanner_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Scanner>();
    }
}
