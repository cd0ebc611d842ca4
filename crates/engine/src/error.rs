use std::fmt;

use autotris_core::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Enumeration found no landing pose for the piece.
    NoTerminals,
    /// A candidate record named no known piece kind.
    BadRecord,
    /// A simulated or executed placement broke a board invariant.
    Core(CoreError),
}

impl SearchError {
    pub fn code(self) -> &'static str {
        match self {
            SearchError::NoTerminals => "no_terminals",
            SearchError::BadRecord => "bad_record",
            SearchError::Core(err) => err.code(),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SearchError::NoTerminals => "search found no reachable landing pose",
            SearchError::BadRecord => "candidate record has an unknown piece kind",
            SearchError::Core(err) => err.message(),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoTerminals | SearchError::BadRecord => f.write_str(self.message()),
            SearchError::Core(err) => write!(f, "board error: {}", err),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::NoTerminals | SearchError::BadRecord => None,
            SearchError::Core(err) => Some(err),
        }
    }
}

impl From<CoreError> for SearchError {
    fn from(err: CoreError) -> Self {
        SearchError::Core(err)
    }
}
