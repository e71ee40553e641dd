//! Numeric comma-separated tables.
//!
//! The catalog files are plain CSV with a header row and numeric cells only,
//! so a line-oriented reader is all that is needed.

use super::CatalogError;
use std::path::{Path, PathBuf};

/// Header plus rows of numeric cells, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    /// Read and parse a table from disk.
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse table text. `source` is only used in error messages.
    pub fn parse(content: &str, source: &Path) -> Result<Self, CatalogError> {
        let malformed = |line: usize, message: String| CatalogError::Malformed {
            path: PathBuf::from(source),
            line,
            message,
        };

        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| malformed(1, "file has no header row".to_string()))?;

        let columns: Vec<String> = header
            .split(',')
            .map(|c| c.trim().trim_matches('"').to_string())
            .collect();
        if let Some(pos) = columns.iter().position(|c| c.is_empty()) {
            return Err(malformed(
                header_line,
                format!("empty column name at position {}", pos),
            ));
        }

        let mut rows = Vec::new();
        for (line_no, line) in lines {
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() != columns.len() {
                return Err(malformed(
                    line_no,
                    format!("expected {} cells, found {}", columns.len(), cells.len()),
                ));
            }
            let row = cells
                .iter()
                .zip(&columns)
                .map(|(cell, column)| {
                    cell.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| {
                            malformed(
                                line_no,
                                format!("column '{}' has non-numeric value '{}'", column, cell),
                            )
                        })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Table, CatalogError> {
        Table::parse(text, Path::new("test.csv"))
    }

    #[test]
    fn test_parse_header_and_rows() {
        let table = parse("a,b,c\n1,2,3\n4.5,5,6\n").unwrap();
        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(table.rows, vec![vec![1.0, 2.0, 3.0], vec![4.5, 5.0, 6.0]]);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("z"), None);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let table = parse("a,b\r\n\r\n1,2\r\n\n3,4\n").unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_parse_quoted_header() {
        let table = parse("\"id\",\"ram\"\n1,2048\n").unwrap();
        assert_eq!(table.columns, vec!["id", "ram"]);
    }

    #[test]
    fn test_parse_width_mismatch_reports_line() {
        let err = parse("a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { line: 3, .. }));
    }

    #[test]
    fn test_parse_non_numeric_cell() {
        let err = parse("a,b\n1,fast\n").unwrap_err();
        match err {
            CatalogError::Malformed { message, .. } => assert!(message.contains("'fast'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(matches!(parse(""), Err(CatalogError::Malformed { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let err = Table::read(Path::new("/nonexistent/train.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
