// ============================================================
// CSV TABLE
// ============================================================
// In-memory tabular dataset: named columns and rows of text cells

use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Ordered columns and rows. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Build a table, normalising header names and squaring off ragged rows.
    ///
    /// Blank headers become `Unnamed: {index}` and repeated headers get a
    /// `.1`, `.2`, ... suffix. Short rows are padded with empty cells, long
    /// rows are cut at the header width.
    pub fn new(raw_headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = normalize_headers(raw_headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Restrict to the named columns, in the order given.
    ///
    /// Unknown names are ignored and repeats collapse. When none of the
    /// names exist the table is left untouched and `false` is returned.
    pub fn retain_columns(&mut self, names: &[String]) -> bool {
        let mut seen = HashSet::new();
        let indices: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .filter(|idx| seen.insert(*idx))
            .collect();

        if indices.is_empty() {
            return false;
        }

        self.headers = indices.iter().map(|&i| self.headers[i].clone()).collect();
        for row in &mut self.rows {
            *row = indices.iter().map(|&i| row[i].clone()).collect();
        }
        true
    }

    /// Strip leading and trailing whitespace from every cell.
    pub fn trim_cells(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            let trimmed = cell.trim();
            if trimmed.len() != cell.len() {
                *cell = trimmed.to_string();
            }
        }
    }

    /// Drop rows identical to an earlier row. Returns how many were removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        before - self.rows.len()
    }
}

fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };

        let mut name = base.clone();
        while taken.contains(&name) {
            let count = counts.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{}.{}", base, count);
        }

        taken.insert(name.clone());
        headers.push(name);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_headers_are_deduplicated() {
        let table = CsvTable::new(strings(&["a", "b", "a", "a"]), Vec::new());
        assert_eq!(table.headers, strings(&["a", "b", "a.1", "a.2"]));
    }

    #[test]
    fn test_blank_headers_are_named() {
        let table = CsvTable::new(strings(&["", "name", " "]), Vec::new());
        assert_eq!(table.headers, strings(&["Unnamed: 0", "name", "Unnamed: 2"]));
    }

    #[test]
    fn test_ragged_rows_are_squared() {
        let table = CsvTable::new(
            strings(&["a", "b", "c"]),
            vec![strings(&["1"]), strings(&["1", "2", "3", "4"])],
        );
        assert_eq!(table.rows[0], strings(&["1", "", ""]));
        assert_eq!(table.rows[1], strings(&["1", "2", "3"]));
    }

    #[test]
    fn test_retain_columns_uses_requested_order() {
        let mut table = CsvTable::new(
            strings(&["a", "b", "c"]),
            vec![strings(&["1", "2", "3"])],
        );
        assert!(table.retain_columns(&strings(&["c", "missing", "a", "c"])));
        assert_eq!(table.headers, strings(&["c", "a"]));
        assert_eq!(table.rows[0], strings(&["3", "1"]));
    }

    #[test]
    fn test_retain_columns_without_matches_keeps_everything() {
        let mut table = CsvTable::new(strings(&["a", "b"]), vec![strings(&["1", "2"])]);
        assert!(!table.retain_columns(&strings(&["x"])));
        assert_eq!(table.headers, strings(&["a", "b"]));
    }

    #[test]
    fn test_drop_duplicates_keeps_first() {
        let mut table = CsvTable::new(
            strings(&["a"]),
            vec![strings(&["x"]), strings(&["y"]), strings(&["x"])],
        );
        assert_eq!(table.drop_duplicates(), 1);
        assert_eq!(table.rows, vec![strings(&["x"]), strings(&["y"])]);
    }

    #[test]
    fn test_head_clamps() {
        let table = CsvTable::new(strings(&["a"]), vec![strings(&["1"]), strings(&["2"])]);
        assert_eq!(table.head(20).len(), 2);
        assert_eq!(table.head(1).len(), 1);
    }
}
