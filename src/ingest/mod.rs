//! Encoding recovery and tabular parsing of the raw payload.

pub mod encoding;
pub mod parse;

/// Column-homogeneous in-memory table: header names plus row-major cells.
/// After parsing, every row holds exactly one cell per header; the empty
/// string is the explicit null marker.
#[derive(Debug)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the named column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell content, with the empty-string null marker mapped to `None`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        match self.rows[row][col].as_str() {
            "" => None,
            s => Some(s),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
