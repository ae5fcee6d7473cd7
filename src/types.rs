use serde::Serialize;

/// One veterinary pharmacy listing from the JSON source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PharmacyListing {
    pub status: Option<String>,
    pub primary_address: Option<String>,
    pub secondary_address: Option<String>,
}

/// One row of the pet registration spreadsheet, validated at load time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetCountRow {
    pub species: String,
    pub region: String,
    pub breed: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
    Text(String),
    Int(i64),
}

impl Cell {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{v}"),
        }
    }
}

/// A fully shaped report, ready to be handed to a writer as one sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(sheet_name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Find the first row whose leading cell is the given label
    pub fn row_by_label(&self, label: &str) -> Option<&[Cell]> {
        self.rows
            .iter()
            .find(|row| matches!(row.first(), Some(Cell::Text(s)) if s == label))
            .map(|row| row.as_slice())
    }

    /// Render as aligned plain text for console output
    pub fn render_text(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.to_string().chars().count());
            }
        }

        let mut out = String::new();
        let header_line: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:>width$}", h, width = widths[i]))
            .collect();
        out.push_str(header_line.join("  ").trim_end());
        out.push('\n');
        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .take(columns)
                .map(|(i, c)| format!("{:>width$}", c.to_string(), width = widths[i]))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_aligns_columns() {
        let mut table = Table::new("s", vec!["name".to_string(), "n".to_string()]);
        table.push_row(vec![Cell::from("a"), Cell::from(1234)]);
        table.push_row(vec![Cell::from("bb"), Cell::from(5)]);

        let text = table.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["name     n", "   a  1234", "  bb     5"]);
    }

    #[test]
    fn test_row_by_label() {
        let mut table = Table::new("s", vec!["k".to_string(), "v".to_string()]);
        table.push_row(vec![Cell::from("x"), Cell::from(1)]);
        assert_eq!(table.row_by_label("x").unwrap()[1], Cell::Int(1));
        assert!(table.row_by_label("y").is_none());
    }
}
