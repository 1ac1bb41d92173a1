//! Line tokenization on top of `regex-scanner`.
//!
//! A [`Matcher`] drives a [`Scanner`](regex_scanner::Scanner) across a line
//! the way a syntax highlighter does: ask for the next match, resume where it
//! ended, and repeat. This crate handles the parts every such loop gets
//! wrong at least once:
//! - Empty matches step forward by one character (not one byte), so the loop
//!   always terminates and never splits a UTF-8 sequence
//! - Engine failures stop the iteration instead of being retried
//! - [`Matcher::segments`] fills the gaps between matches so the whole line
//!   is covered

pub mod matcher;

pub use matcher::{Matcher, Matches, Segment};
