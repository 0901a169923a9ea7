use std::ops::RangeInclusive;
use std::str::FromStr;

use scraper::Html;
use tracing::info;

use crate::error::{PageRef, ScrapeError};
use crate::extract::{ExtractionSchema, TABLE, TBODY, TR};
use crate::fetch::PageFetcher;

/// How a run decides which result pages exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRange {
    /// Caller supplied both ends directly (inclusive).
    Fixed { start: u32, end: u32 },
    /// Count the body rows of the index page's results table; the site
    /// lists one row per results page, numbered 1..=N.
    FromIndex,
}

impl FromStr for PageRange {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScrapeError::InvalidPageRange(s.to_string());
        let (start, end) = s.split_once(':').ok_or_else(invalid)?;
        let start: u32 = start.trim().parse().map_err(|_| invalid())?;
        let end: u32 = end.trim().parse().map_err(|_| invalid())?;
        if start == 0 || start > end {
            return Err(invalid());
        }
        Ok(PageRange::Fixed { start, end })
    }
}

/// Resolve the inclusive page range to scrape. The fixed strategy never
/// touches the network; the index strategy fetches one page.
pub async fn discover(
    range: &PageRange,
    fetcher: &impl PageFetcher,
    schema: &ExtractionSchema,
) -> Result<RangeInclusive<u32>, ScrapeError> {
    match range {
        PageRange::Fixed { start, end } => Ok(*start..=*end),
        PageRange::FromIndex => {
            let markup = fetcher.fetch_index().await?;
            let pages = count_index_rows(&markup, schema)?;
            info!("Index page lists {} result pages", pages);
            Ok(1..=pages)
        }
    }
}

fn count_index_rows(markup: &str, schema: &ExtractionSchema) -> Result<u32, ScrapeError> {
    let doc = Html::parse_document(markup);
    let table = doc
        .select(&TABLE)
        .nth(schema.table_index)
        .ok_or(ScrapeError::MissingTable {
            page: PageRef::Index,
            table_index: schema.table_index,
        })?;
    let tbody = table
        .select(&TBODY)
        .next()
        .ok_or(ScrapeError::MissingTableBody {
            page: PageRef::Index,
        })?;
    let rows = tbody.select(&TR).count();
    if rows == 0 {
        return Err(ScrapeError::EmptyIndexTable);
    }
    Ok(rows as u32)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct IndexOnly(String);

    #[async_trait]
    impl PageFetcher for IndexOnly {
        async fn fetch_page(&self, page: u32) -> Result<String, ScrapeError> {
            panic!("discovery must not fetch page {}", page);
        }

        async fn fetch_index(&self) -> Result<String, ScrapeError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn fixed_range_skips_the_network() {
        struct NoNetwork;

        #[async_trait]
        impl PageFetcher for NoNetwork {
            async fn fetch_page(&self, _: u32) -> Result<String, ScrapeError> {
                panic!("fixed range fetched a page");
            }

            async fn fetch_index(&self) -> Result<String, ScrapeError> {
                panic!("fixed range fetched the index");
            }
        }

        let range = PageRange::Fixed { start: 3, end: 17 };
        let pages = discover(&range, &NoNetwork, &ExtractionSchema::default())
            .await
            .unwrap();
        assert_eq!(pages, 3..=17);
    }

    #[tokio::test]
    async fn index_row_count_is_the_page_count() {
        let markup = std::fs::read_to_string("tests/fixtures/index_page.html").unwrap();
        let fetcher = IndexOnly(markup);
        let pages = discover(&PageRange::FromIndex, &fetcher, &ExtractionSchema::default())
            .await
            .unwrap();
        assert_eq!(pages, 1..=3);
    }

    #[tokio::test]
    async fn missing_index_table_is_an_error() {
        let fetcher = IndexOnly("<html><body><p>maintenance</p></body></html>".into());
        let err = discover(&PageRange::FromIndex, &fetcher, &ExtractionSchema::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingTable {
                page: PageRef::Index,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn empty_index_table_is_an_error() {
        let markup = "<table></table><table></table><table><tbody></tbody></table>";
        let fetcher = IndexOnly(markup.into());
        let err = discover(&PageRange::FromIndex, &fetcher, &ExtractionSchema::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyIndexTable));
    }

    #[test]
    fn range_argument_parses() {
        assert_eq!(
            "1:259".parse::<PageRange>().unwrap(),
            PageRange::Fixed { start: 1, end: 259 }
        );
        assert_eq!(
            "7:7".parse::<PageRange>().unwrap(),
            PageRange::Fixed { start: 7, end: 7 }
        );
    }

    #[test]
    fn bad_range_arguments_are_rejected() {
        for bad in ["", "5", "5:", ":5", "a:b", "0:3", "9:2"] {
            assert!(
                bad.parse::<PageRange>().is_err(),
                "expected {:?} to be rejected",
                bad
            );
        }
    }
}
