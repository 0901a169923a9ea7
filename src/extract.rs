use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{PageRef, ScrapeError};
use crate::record::PasserRecord;

pub(crate) static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
pub(crate) static TBODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());
pub(crate) static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Structural positions of the results data within a page. Injected so
/// a site layout change is a configuration update, not a code change.
#[derive(Debug, Clone)]
pub struct ExtractionSchema {
    /// 0-based index of the results table among all `<table>` elements.
    pub table_index: usize,
    pub name_col: usize,
    pub campus_col: usize,
    pub course_col: usize,
}

impl Default for ExtractionSchema {
    /// The live site: third table on the page, columns name/campus/course.
    fn default() -> Self {
        Self {
            table_index: 2,
            name_col: 0,
            campus_col: 1,
            course_col: 2,
        }
    }
}

impl ExtractionSchema {
    fn min_columns(&self) -> usize {
        self.name_col.max(self.campus_col).max(self.course_col) + 1
    }
}

/// Read every body row of the results table, in document order, one
/// record per row with each cell's text whitespace-trimmed.
///
/// A row with fewer columns than the schema addresses aborts the whole
/// page: a short row means the structural assumptions no longer hold,
/// and a best-effort subset would corrupt entity dedup downstream.
pub fn extract(
    markup: &str,
    schema: &ExtractionSchema,
    page: u32,
) -> Result<Vec<PasserRecord>, ScrapeError> {
    let page_ref = PageRef::Number(page);
    let doc = Html::parse_document(markup);

    let table = doc
        .select(&TABLE)
        .nth(schema.table_index)
        .ok_or(ScrapeError::MissingTable {
            page: page_ref,
            table_index: schema.table_index,
        })?;
    let tbody = table
        .select(&TBODY)
        .next()
        .ok_or(ScrapeError::MissingTableBody { page: page_ref })?;

    let mut records = Vec::new();
    for (row, tr) in tbody.select(&TR).enumerate() {
        let cells: Vec<String> = tr.select(&TD).map(cell_text).collect();
        if cells.len() < schema.min_columns() {
            return Err(ScrapeError::MalformedRow {
                page: page_ref,
                row,
                needed: schema.min_columns(),
                found: cells.len(),
            });
        }
        records.push(PasserRecord {
            name: cells[schema.name_col].clone(),
            campus: cells[schema.campus_col].clone(),
            course: cells[schema.course_col].clone(),
        });
    }
    Ok(records)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PENDING_CASE;

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/results_page.html").unwrap()
    }

    #[test]
    fn one_record_per_body_row_in_order() {
        let records = extract(&fixture(), &ExtractionSchema::default(), 1).unwrap();
        assert_eq!(records.len(), 4);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "ABAD, MARIA CLARA",
                "ABALOS, JOSE PROTACIO",
                "ABANTE, CRISOSTOMO",
                "O'BRIEN, PADRE DAMASO",
            ]
        );
    }

    #[test]
    fn cells_are_whitespace_trimmed() {
        let records = extract(&fixture(), &ExtractionSchema::default(), 1).unwrap();
        // Fixture pads every cell of the second row with whitespace
        assert_eq!(records[1].name, "ABALOS, JOSE PROTACIO");
        assert_eq!(records[1].campus, "Los Banos");
        assert_eq!(records[1].course, "BS Biology");
    }

    #[test]
    fn empty_campus_and_pending_course_survive_verbatim() {
        let records = extract(&fixture(), &ExtractionSchema::default(), 1).unwrap();
        assert_eq!(records[2].campus, "");
        assert_eq!(records[2].course, PENDING_CASE);
    }

    #[test]
    fn header_rows_outside_tbody_are_ignored() {
        let records = extract(&fixture(), &ExtractionSchema::default(), 1).unwrap();
        assert!(records.iter().all(|r| r.name != "Name"));
    }

    #[test]
    fn missing_table_is_an_error() {
        let markup = "<html><body><table><tbody><tr><td>a</td></tr></tbody></table></body></html>";
        let err = extract(markup, &ExtractionSchema::default(), 9).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingTable {
                page: PageRef::Number(9),
                table_index: 2
            }
        ));
    }

    #[test]
    fn short_row_aborts_the_page() {
        let markup = "\
            <table></table><table></table>\
            <table><tbody>\
            <tr><td>FULL, ROW</td><td>Diliman</td><td>BS Physics</td></tr>\
            <tr><td>SHORT, ROW</td><td>Diliman</td></tr>\
            </tbody></table>";
        let err = extract(markup, &ExtractionSchema::default(), 3).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MalformedRow {
                row: 1,
                needed: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn schema_positions_are_honored() {
        // Same data with campus and course swapped, first table on the page
        let markup = "<table><tbody>\
            <tr><td>CRUZ, JUAN</td><td>BS Math</td><td>Diliman</td></tr>\
            </tbody></table>";
        let schema = ExtractionSchema {
            table_index: 0,
            name_col: 0,
            campus_col: 2,
            course_col: 1,
        };
        let records = extract(markup, &schema, 1).unwrap();
        assert_eq!(records[0].campus, "Diliman");
        assert_eq!(records[0].course, "BS Math");
    }
}
