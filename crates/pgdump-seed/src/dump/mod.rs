//! Bulk-copy block extraction from textual database dumps.
//!
//! Extraction runs in two stages:
//!
//! - a [`BlockTokenizer`] finds where a block's header and terminator sit,
//! - [`decode_row`] turns each data line into a [`DecodedRow`].
//!
//! Namespace fallback is handled by [`resolve_first`], which walks an
//! ordered candidate list and stops at the first hit. Priority comes from
//! the list, never from where a block appears in the dump.
//!
//! Nothing in this module fails: a table that cannot be found or parsed
//! comes back as an empty [`TableExtract`] and a warning is logged.

mod row;
mod tokenizer;

pub use row::{decode_row, DecodedRow, FIELD_SEPARATOR, NULL_SENTINEL};
pub use tokenizer::{parse_column_list, BlockHeader, BlockTokenizer, CopyTokenizer, TERMINATOR};

use tracing::{debug, warn};

/// One table's block, as found in the dump.
///
/// Either fully populated or empty; there is no partial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExtract<'a> {
    /// Namespace the block was found under (empty when nothing matched).
    pub namespace: String,
    /// Logical table name that was requested.
    pub table: String,
    /// Declared columns; position `i` names field `i` of every row.
    pub columns: Vec<String>,
    /// Non-blank data lines, in dump order.
    pub raw_rows: Vec<&'a str>,
}

impl<'a> TableExtract<'a> {
    /// An extract holding no columns and no rows.
    pub fn empty(table: &str) -> Self {
        Self {
            namespace: String::new(),
            table: table.to_string(),
            columns: Vec::new(),
            raw_rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.raw_rows.len()
    }

    /// Decode every data line against the declared columns.
    pub fn rows(&self) -> impl Iterator<Item = DecodedRow<'_>> + '_ {
        self.raw_rows
            .iter()
            .map(move |line| decode_row(line, &self.columns))
    }

    /// `namespace.table`, or just the table when nothing matched.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.table.clone()
        } else {
            format!("{}.{}", self.namespace, self.table)
        }
    }
}

/// Return the first candidate, in list order, for which `probe` succeeds.
pub fn resolve_first<'c, C, T, F>(candidates: &'c [C], mut probe: F) -> Option<(&'c str, T)>
where
    C: AsRef<str>,
    F: FnMut(&str) -> Option<T>,
{
    candidates.iter().find_map(|candidate| {
        let name = candidate.as_ref();
        probe(name).map(|found| (name, found))
    })
}

/// Scans one dump for table blocks.
#[derive(Debug, Clone)]
pub struct DumpScanner<'a, T = CopyTokenizer> {
    dump: &'a str,
    tokenizer: T,
}

impl<'a> DumpScanner<'a, CopyTokenizer> {
    /// Scanner for pg_dump `COPY ... FROM stdin;` blocks.
    pub fn new(dump: &'a str) -> Self {
        Self::with_tokenizer(dump, CopyTokenizer)
    }
}

impl<'a, T: BlockTokenizer> DumpScanner<'a, T> {
    pub fn with_tokenizer(dump: &'a str, tokenizer: T) -> Self {
        Self { dump, tokenizer }
    }

    /// Locate `table` under the first namespace candidate that declares it.
    pub fn extract_table<C: AsRef<str>>(&self, table: &str, namespaces: &[C]) -> TableExtract<'a> {
        let Some((namespace, header)) = resolve_first(namespaces, |ns| {
            self.tokenizer.find_header(self.dump, ns, table)
        }) else {
            warn!("No COPY data found for table {}", table);
            return TableExtract::empty(table);
        };

        debug!(
            "Found COPY header for {}.{} at byte {}",
            namespace, table, header.start
        );

        let Some(columns) = parse_column_list(&header.column_list) else {
            warn!(
                "Unparseable column list for {}.{}: ({})",
                namespace, table, header.column_list
            );
            return TableExtract::empty(table);
        };

        let Some(end) = self.tokenizer.find_terminator(self.dump, header.end) else {
            warn!("No end marker found for COPY data in {}.{}", namespace, table);
            return TableExtract::empty(table);
        };

        let raw_rows: Vec<&'a str> = self.dump[header.end..end]
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        debug!(
            "Found {} rows in {}.{} ({} columns)",
            raw_rows.len(),
            namespace,
            table,
            columns.len()
        );

        TableExtract {
            namespace: namespace.to_string(),
            table: table.to_string(),
            columns,
            raw_rows,
        }
    }
}

/// Extract `table` from a pg_dump text dump, trying `namespaces` in order.
pub fn extract_table<'a, C: AsRef<str>>(
    dump: &'a str,
    table: &str,
    namespaces: &[C],
) -> TableExtract<'a> {
    DumpScanner::new(dump).extract_table(table, namespaces)
}
