//! Block boundary detection for bulk-copy sections.

use regex::{Regex, RegexBuilder};

/// Line that closes a bulk-copy data section.
pub const TERMINATOR: &str = "\\.";

/// Header of a bulk-copy block as found in the dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    /// Raw column list between the parentheses.
    pub column_list: String,
    /// Byte offset where the header starts.
    pub start: usize,
    /// Byte offset just past the header; the data region begins here.
    pub end: usize,
}

/// Finds block headers and terminators for one dump dialect.
///
/// Swapping the tokenizer is enough to support another dump flavour; row
/// decoding and namespace resolution stay untouched.
pub trait BlockTokenizer {
    /// Locate the header declaring `namespace.table`.
    fn find_header(&self, dump: &str, namespace: &str, table: &str) -> Option<BlockHeader>;

    /// Locate the terminator line at or after `from`.
    ///
    /// Returns the byte offset where the terminator line starts.
    fn find_terminator(&self, dump: &str, from: usize) -> Option<usize>;
}

/// Tokenizer for `COPY "ns"."table" (cols) FROM stdin;` blocks as written by pg_dump.
///
/// Keywords match case-insensitively and any run of whitespace is accepted
/// between tokens. Identifier quotes are optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyTokenizer;

impl CopyTokenizer {
    fn header_pattern(namespace: &str, table: &str) -> Option<Regex> {
        let pattern = format!(
            r#"COPY\s+"?{}"?\s*\.\s*"?{}"?\s*\(([^)]*)\)\s*FROM\s+stdin\s*;"#,
            regex::escape(namespace),
            regex::escape(table)
        );
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .ok()
    }
}

impl BlockTokenizer for CopyTokenizer {
    fn find_header(&self, dump: &str, namespace: &str, table: &str) -> Option<BlockHeader> {
        let re = Self::header_pattern(namespace, table)?;
        let caps = re.captures(dump)?;
        let whole = caps.get(0)?;
        Some(BlockHeader {
            column_list: caps.get(1)?.as_str().to_string(),
            start: whole.start(),
            end: whole.end(),
        })
    }

    fn find_terminator(&self, dump: &str, from: usize) -> Option<usize> {
        let mut offset = from;
        for line in dump.get(from..)?.split_inclusive('\n') {
            if line.trim_end_matches(['\n', '\r']) == TERMINATOR {
                return Some(offset);
            }
            offset += line.len();
        }
        None
    }
}

/// Split a declared column list into bare column names.
///
/// Returns `None` when the list is empty or contains an empty entry.
pub fn parse_column_list(list: &str) -> Option<Vec<String>> {
    let columns: Vec<String> = list
        .split(',')
        .map(|col| col.trim().replace('"', ""))
        .collect();

    if columns.iter().any(|c| c.is_empty()) {
        return None;
    }
    Some(columns)
}
