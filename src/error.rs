use std::fmt;

use thiserror::Error;

/// Which page an extraction or discovery failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRef {
    /// The root index page used for page-count discovery.
    Index,
    /// A numbered results page.
    Number(u32),
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRef::Index => write!(f, "index page"),
            PageRef::Number(n) => write!(f, "page {}", n),
        }
    }
}

/// Failures that abort a run. Every variant is fatal where it occurs:
/// nothing is retried and no output file is written.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{page}: table #{table_index} not found; has the site layout changed?")]
    MissingTable { page: PageRef, table_index: usize },

    #[error("{page}: results table has no <tbody>")]
    MissingTableBody { page: PageRef },

    #[error("index page table has no rows; cannot derive a page count")]
    EmptyIndexTable,

    #[error("{page}, row {row}: expected at least {needed} columns, found {found}")]
    MalformedRow {
        page: PageRef,
        row: usize,
        needed: usize,
        found: usize,
    },

    #[error("invalid page range '{0}': expected START:END with 1 <= START <= END")]
    InvalidPageRange(String),
}
