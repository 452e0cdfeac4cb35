//! Thin document-query layer over the `scraper` crate.
//!
//! Parsed documents are not `Send`, so they are built and dropped inside the
//! synchronous `parse_*` functions and never held across an `.await`.

use crate::error::{Result, ScraperError};
use scraper::{ElementRef, Html, Selector};

pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("{}: {:?}", css, e)))
}

/// Concatenated, trimmed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First element anywhere in the document matching `css`.
pub fn find_first<'a>(document: &'a Html, css: &str) -> Result<ElementRef<'a>> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound(css.to_string()))
}

/// All descendants of `root` matching `css`, in document order.
pub fn select_within<'a>(root: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(root.select(&sel).collect())
}

/// Direct `td` children of a table row. Header rows built from `th` come
/// back empty.
pub fn row_cell_elements(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "td")
        .collect()
}

pub fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row_cell_elements(row).into_iter().map(element_text).collect()
}

/// Ordered field names aligned positionally to a table's columns.
#[derive(Debug)]
pub struct RowSchema {
    pub source: &'static str,
    pub fields: &'static [&'static str],
}

impl RowSchema {
    pub const fn new(source: &'static str, fields: &'static [&'static str]) -> Self {
        Self { source, fields }
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    pub fn bind<'r>(&'r self, cells: &'r [String]) -> SchemaRow<'r> {
        SchemaRow { schema: self, cells }
    }
}

/// One row's cells viewed through its schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRow<'r> {
    schema: &'r RowSchema,
    cells: &'r [String],
}

impl<'r> SchemaRow<'r> {
    pub fn text(&self, field: &str) -> Result<&'r str> {
        let index = self.schema.position(field).ok_or_else(|| {
            ScraperError::Config(format!("{} schema has no field '{}'", self.schema.source, field))
        })?;
        self.cells
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| ScraperError::MissingField(format!("{}.{}", self.schema.source, field)))
    }
}
