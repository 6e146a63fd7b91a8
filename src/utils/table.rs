//! Table rendering utilities for CLI outputs.

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            columns: headers
                .iter()
                .map(|h| Column {
                    header: h.to_string(),
                    width: h.chars().count(),
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Missing cells render empty; extra cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(&row) {
            col.width = col.width.max(cell.chars().count());
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.push_line(&mut out, self.columns.iter().map(|c| c.header.as_str()));

        for row in &self.rows {
            let cells = (0..self.columns.len()).map(|i| row.get(i).map(String::as_str).unwrap_or(""));
            self.push_line(&mut out, cells);
        }

        out
    }

    fn push_line<'a>(&self, out: &mut String, cells: impl Iterator<Item = &'a str>) {
        let line: Vec<String> = self
            .columns
            .iter()
            .zip(cells)
            .map(|(col, cell)| format!("{:<width$}", cell, width = col.width))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
}
