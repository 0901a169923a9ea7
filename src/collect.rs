use std::ops::RangeInclusive;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::ScrapeError;
use crate::extract::{self, ExtractionSchema};
use crate::fetch::PageFetcher;
use crate::record::PasserRecord;

/// Fetch and extract every page in `range`, ascending, one page in
/// flight at a time, concatenating records in page order.
///
/// The first fetch or extraction failure aborts the whole run: a
/// partially collected record set would silently skew the reference
/// entities derived from it.
pub async fn collect(
    fetcher: &impl PageFetcher,
    schema: &ExtractionSchema,
    range: RangeInclusive<u32>,
) -> Result<Vec<PasserRecord>, ScrapeError> {
    let total = range.clone().count();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut records = Vec::new();
    for page in range {
        let markup = fetcher.fetch_page(page).await?;
        records.extend(extract::extract(&markup, schema, page)?);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Collected {} records across {} pages", records.len(), total);
    Ok(records)
}

// ── Tests ──
