use std::sync::Arc;

use cep_core::error::AppError;
use cep_core::models::RawTable;
use cep_core::traits::TableParser;
use scraper::{ElementRef, Html, Selector};

/// Rows of the result table on the Correios search page.
pub const RESULT_ROWS_SELECTOR: &str = ".tmptabela tr";

struct Selectors {
    rows: Selector,
    header_cell: Selector,
    cell: Selector,
    link: Selector,
}

/// Result table parser using scraper.
///
/// The first matching row is the header (`th` cells, colons stripped);
/// every following row is a data row (`td` cells). A cell holding a link
/// contributes the link text instead of its own.
#[derive(Clone)]
pub struct ResultTableParser {
    selectors: Arc<Selectors>,
}

impl ResultTableParser {
    pub fn new() -> Result<Self, AppError> {
        Self::with_row_selector(RESULT_ROWS_SELECTOR)
    }

    /// Parser reading rows matched by `rows` instead of the default table.
    pub fn with_row_selector(rows: &str) -> Result<Self, AppError> {
        Ok(Self {
            selectors: Arc::new(Selectors {
                rows: parse_selector(rows)?,
                header_cell: parse_selector("th")?,
                cell: parse_selector("td")?,
                link: parse_selector("a")?,
            }),
        })
    }

    fn cell_text(&self, cell: ElementRef<'_>) -> String {
        match cell.select(&self.selectors.link).next() {
            Some(link) => link.text().collect(),
            None => cell.text().collect(),
        }
    }
}

impl TableParser for ResultTableParser {
    fn parse_table(&self, html: &str) -> Result<RawTable, AppError> {
        let document = Html::parse_document(html);
        let mut rows = document.select(&self.selectors.rows);

        let Some(header_row) = rows.next() else {
            return Ok(RawTable::default());
        };

        let header = header_row
            .select(&self.selectors.header_cell)
            .map(|th| {
                th.text()
                    .collect::<String>()
                    .trim()
                    .trim_matches(':')
                    .to_string()
            })
            .collect();

        let rows = rows
            .map(|row| {
                row.select(&self.selectors.cell)
                    .map(|td| self.cell_text(td))
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(RawTable::new(header, rows))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector)
        .map_err(|e| AppError::ParseError(format!("Invalid selector '{selector}': {e}")))
}
