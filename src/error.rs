/// An error that occurred while building or running a scanner.
///
/// A failed search is never an error: "no match" is reported as `Ok(None)`.
/// Errors are reserved for patterns the engine refuses to compile and for
/// searches the engine gives up on, most commonly because a pattern exceeded
/// its backtrack limit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A pattern could not be compiled.
    Syntax {
        /// The position of the pattern in the list given to the scanner, if
        /// the pattern was compiled as part of one.
        index: Option<usize>,
        /// The source text of the offending pattern.
        pattern: String,
        /// The engine's diagnostic.
        message: String,
    },
    /// The engine failed while searching with a pattern.
    Search {
        /// The position of the pattern in its scanner, if any.
        index: Option<usize>,
        /// The source text of the pattern that failed.
        pattern: String,
        /// The engine's diagnostic.
        message: String,
    },
}

impl Error {
    pub(crate) fn syntax(pattern: &str, err: fancy_regex::Error) -> Error {
        Error::Syntax {
            index: None,
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn search(pattern: &str, err: fancy_regex::Error) -> Error {
        Error::Search {
            index: None,
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }

    /// Attach the position of the failing pattern within its scanner.
    pub(crate) fn at_index(self, at: usize) -> Error {
        match self {
            Error::Syntax { pattern, message, .. } => {
                Error::Syntax { index: Some(at), pattern, message }
            }
            Error::Search { pattern, message, .. } => {
                Error::Search { index: Some(at), pattern, message }
            }
        }
    }

    /// The source text of the pattern this error is about.
    pub fn pattern(&self) -> &str {
        match self {
            Error::Syntax { pattern, .. } | Error::Search { pattern, .. } => {
                pattern
            }
        }
    }

    /// The index of the pattern within its scanner, when known.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Error::Syntax { index, .. } | Error::Search { index, .. } => index,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax { index, pattern, message } => {
                write!(f, "failed to compile pattern ")?;
                if let Some(index) = index {
                    write!(f, "{} ", index)?;
                }
                write!(f, "{:?}: {}", pattern, message)
            }
            Error::Search { index, pattern, message } => {
                write!(f, "search failed for pattern ")?;
                if let Some(index) = index {
                    write!(f, "{} ", index)?;
                }
                write!(f, "{:?}: {}", pattern, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_index_and_pattern() {
        let err = Error::Syntax {
            index: Some(3),
            pattern: "a(".to_string(),
            message: "unclosed group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to compile pattern 3 \"a(\": unclosed group"
        );
    }

    #[test]
    fn test_display_without_index() {
        let err = Error::Search {
            index: None,
            pattern: "(a*)*b".to_string(),
            message: "backtrack limit exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "search failed for pattern \"(a*)*b\": backtrack limit exceeded"
        );
    }

    #[test]
    fn test_at_index_keeps_details() {
        let err = Error::Syntax {
            index: None,
            pattern: "[".to_string(),
            message: "bad class".to_string(),
        }
        .at_index(7);
        assert_eq!(err.index(), Some(7));
        assert_eq!(err.pattern(), "[");
    }
}
