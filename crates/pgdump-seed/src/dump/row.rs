//! Line-based reader for bulk-copy data rows.

/// Field separator inside a data line.
pub const FIELD_SEPARATOR: char = '\t';

/// Token standing for SQL NULL.
pub const NULL_SENTINEL: &str = "\\N";

/// One decoded data line: every declared column paired with its value.
///
/// `None` is SQL NULL; an empty field stays `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRow<'a> {
    columns: &'a [String],
    values: Vec<Option<&'a str>>,
}

impl<'a> DecodedRow<'a> {
    /// Number of columns, always equal to the declared column count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of `column`; `None` when the value is NULL or the column is unknown.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.position(column).and_then(|idx| self.values[idx])
    }

    /// Owned copy of [`DecodedRow::get`].
    pub fn get_owned(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }

    /// Whether `column` is declared and holds NULL.
    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.position(column), Some(idx) if self.values[idx].is_none())
    }

    /// Column/value pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Decode one tab-separated line against the declared columns.
///
/// Missing trailing fields decode to NULL, surplus fields are ignored.
pub fn decode_row<'a>(line: &'a str, columns: &'a [String]) -> DecodedRow<'a> {
    let mut fields = line.split(FIELD_SEPARATOR);
    let values = columns
        .iter()
        .map(|_| fields.next().and_then(decode_field))
        .collect();

    DecodedRow { columns, values }
}

fn decode_field(field: &str) -> Option<&str> {
    if field == NULL_SENTINEL {
        None
    } else {
        Some(field)
    }
}
