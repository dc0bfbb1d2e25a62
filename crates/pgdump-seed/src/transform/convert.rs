//! Field coercions applied to untyped dump values.
//!
//! Every "coerce or default" rule used by the transformer lives here so the
//! fallback behaviour can be read and tested in one place. None of these
//! functions fail.

/// Text used for a missing expiry date.
pub const NEVER_EXPIRES: &str = "9999-12-31T23:59:59.999Z";

/// `Some` only for a non-empty value.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Owned copy of a present value.
pub fn present_owned(value: Option<&str>) -> Option<String> {
    present(value).map(str::to_string)
}

/// Present value, or `default`.
pub fn text_or(value: Option<&str>, default: &str) -> String {
    present(value).unwrap_or(default).to_string()
}

/// Key column rendered as a document id, `None` when absent.
pub fn key_text(value: Option<&str>) -> Option<String> {
    present(value.map(str::trim)).map(str::to_string)
}

/// Parent key rendered as an id; absent or zero keys mean "no parent".
pub fn parent_key(value: Option<&str>) -> Option<String> {
    key_text(value).filter(|key| key.parse::<i64>().map_or(true, |n| n != 0))
}

/// Single-character boolean: `t` is true, anything else is false.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("t")
}

/// Whether a flag is explicitly false (`f`). NULL is not false.
pub fn is_false_flag(value: Option<&str>) -> bool {
    value == Some("f")
}

/// Integer with a default of 0; fractional input is truncated.
pub fn parse_int_or_zero(value: Option<&str>) -> i64 {
    let Some(text) = present(value.map(str::trim)) else {
        return 0;
    };
    text.parse::<i64>()
        .ok()
        .or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
        .unwrap_or(0)
}

/// Float with a default of 0.0.
pub fn parse_float_or_zero(value: Option<&str>) -> f64 {
    present(value.map(str::trim))
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

/// Target price from the legacy price columns.
///
/// A float price is multiplied by 100; otherwise an integer price is
/// divided by 100. The result is rounded to a whole number.
pub fn normalize_price(float_price: Option<&str>, int_price: Option<&str>) -> i64 {
    let price = if present(float_price).is_some() {
        parse_float_or_zero(float_price) * 100.0
    } else if present(int_price).is_some() {
        parse_int_or_zero(int_price) as f64 / 100.0
    } else {
        0.0
    };
    price.round() as i64
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Lower-case slug: runs of anything outside `[a-z0-9]` become one dash,
/// edge dashes are trimmed, then the result is capped at `max_len` chars.
pub fn slugify(title: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    truncate_chars(&slug, max_len)
}
