//! Borderless text tables
//!
//! The generic "rows under named columns" sink. Columns are padded to the
//! widest cell (by display width) and separated by two spaces.

use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with empty cells, extra cells dropped
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.width());
            }
        }
        widths
    }

    /// Render with a leading blank line, an upper-cased header and one line per row
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut output = String::from("\n");

        let header: Vec<String> = self.headers.iter().map(|h| h.to_uppercase()).collect();
        write_line(&mut output, &header, &widths);
        for row in &self.rows {
            write_line(&mut output, row, &widths);
        }

        output
    }
}

fn write_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let padding = widths[idx].saturating_sub(cell.width());
        let _ = write!(line, "{:padding$}", "");
    }
    output.push_str(line.trim_end());
    output.push('\n');
}
