//! Tab-delimited row model
//!
//! Plain text tables are lines of literal-tab-separated cells. The first
//! tab-containing line fixes the column count; later short rows are padded
//! with empty cells to that width. Long rows keep their extra cells.

/// An open tab-delimited table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTable {
    columns: usize,
}

impl TabTable {
    /// Open a table from its header line, returning the table and the header cells.
    pub fn open(header_line: &str) -> (TabTable, Vec<String>) {
        let cells = split_cells(header_line);
        (
            TabTable {
                columns: cells.len(),
            },
            cells,
        )
    }

    /// Number of columns fixed by the header.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Split a data line, padding it to the header width.
    pub fn row(&self, line: &str) -> Vec<String> {
        let mut cells = split_cells(line);
        if cells.len() < self.columns {
            cells.resize(self.columns, String::new());
        }
        cells
    }
}

/// Whether a line takes part in a tab-delimited table.
pub fn is_table_line(line: &str) -> bool {
    line.contains('\t')
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('\t').map(|cell| cell.trim().to_string()).collect()
}
