//! Plain-text table for resource collections.

use crate::config::DisplayConfig;
use crate::resources::Resource;

/// A table column bound to a record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    pub element_key: &'static str,
}

impl Column {
    pub const fn new(label: &'static str, element_key: &'static str) -> Self {
        Self { label, element_key }
    }
}

/// Renders the records of one resource kind
pub struct Table<'a> {
    display: &'a DisplayConfig,
}

impl<'a> Table<'a> {
    pub fn new(display: &'a DisplayConfig) -> Self {
        Self { display }
    }

    /// Render `records`, or a loading/empty placeholder
    pub fn render<R: Resource>(&self, records: &[R::Record], is_loading: bool) -> String {
        if is_loading {
            return format!("Loading {}...", R::ENTITY_NAME);
        }
        if records.is_empty() {
            return format!("No {} found", R::ENTITY_NAME);
        }

        let columns = R::columns();
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| columns.iter().map(|column| R::cell(record, column.element_key)).collect())
            .collect();

        let mut widths: Vec<usize> = columns.iter().map(|column| column.label.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 1);
        if self.display.show_headers {
            let header: Vec<String> = columns.iter().map(|column| column.label.to_string()).collect();
            lines.push(self.format_row(&header, &widths));
        }
        for row in &rows {
            lines.push(self.format_row(row, &widths));
        }
        lines.join("\n")
    }

    fn format_row(&self, cells: &[String], widths: &[usize]) -> String {
        let gap = " ".repeat(self.display.column_gap.max(1));
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(gap.as_str())
            .trim_end()
            .to_string()
    }
}
