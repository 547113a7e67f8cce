//! Comma-delimited row reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::error::{LoaderError, LoaderResult};

/// One non-blank, non-comment input line split into trimmed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, fields: &[&str]) -> Self {
        Self {
            line,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Read every row of a beam file. The file is closed before this returns.
pub fn read_path(path: impl AsRef<Path>) -> LoaderResult<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Reading beam file {}", path.display());
    read_rows(file)
}

/// Read rows from in-memory text
pub fn read_str(text: &str) -> LoaderResult<Vec<RawRow>> {
    read_rows(text.as_bytes())
}

/// Read rows from any byte source
pub fn read_rows<R: Read>(source: R) -> LoaderResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(source);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if fields.iter().all(String::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(RawRow { line, fields });
    }

    debug!("Read {} row(s)", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let text = "# a comment\nRoof beam\n\n4800, 200000 ,1e9\n   \n0:P,4800:R\n";
        let rows = read_str(text).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].fields, vec!["Roof beam"]);
        assert_eq!(rows[1].fields, vec!["4800", "200000", "1e9"]);
        assert_eq!(rows[2].fields, vec!["0:P", "4800:R"]);
        assert!(rows[0].line < rows[1].line && rows[1].line < rows[2].line);
    }

    #[test]
    fn test_rows_may_differ_in_length() {
        let rows = read_str("1,2,3\n4\n5,6\n").unwrap();
        let lens: Vec<usize> = rows.iter().map(|r| r.fields.len()).collect();
        assert_eq!(lens, vec![3, 1, 2]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_path("/nonexistent/beam.txt").unwrap_err();
        assert!(matches!(err, LoaderError::Io { ref path, .. } if path.ends_with("beam.txt")));
    }
}
