use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{ColumnRole, Result, SiftError};

use super::model::{value_at, HeaderIndex, Row, Table};

// ---------------------------------------------------------------------------
// Sort specification: direction + comparison mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
    /// Leave rows in input order. Never produced by [`SortSpec::parse`].
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Numeric when both values of a pair parse as numbers, text otherwise.
    #[default]
    Auto,
    /// Every key must be numeric; checked before any reordering.
    ForceNumeric,
    ForceString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub direction: SortDirection,
    pub mode: SortMode,
}

impl SortSpec {
    /// Parse a descriptor of the form `<direction>[:<mode>]`.
    ///
    /// * direction: `asc`/`lt`/`le` (or empty) or `desc`/`gt`/`ge`
    /// * mode: `auto` (or empty), `num`/`number`/`numeric`, `str`/`string`/`text`
    ///
    /// Case-insensitive; whitespace around the descriptor and each part is ignored.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let normalized = descriptor.trim().to_lowercase();

        let (base, mode) = match normalized.split_once(':') {
            Some((base, suffix)) => (base.trim(), parse_mode(suffix)?),
            None => (normalized.as_str(), SortMode::Auto),
        };

        let direction = match base {
            "" | "asc" | "lt" | "le" => SortDirection::Ascending,
            "desc" | "gt" | "ge" => SortDirection::Descending,
            _ => return Err(SiftError::UnsupportedSortDirection(descriptor.to_string())),
        };

        Ok(SortSpec { direction, mode })
    }
}

fn parse_mode(suffix: &str) -> Result<SortMode> {
    match suffix.trim() {
        "" | "auto" => Ok(SortMode::Auto),
        "num" | "number" | "numeric" => Ok(SortMode::ForceNumeric),
        "str" | "string" | "text" => Ok(SortMode::ForceString),
        _ => Err(SiftError::UnsupportedSortMode(suffix.to_string())),
    }
}

impl FromStr for SortSpec {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        SortSpec::parse(s)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
            SortDirection::Neutral => "none",
        };
        let mode = match self.mode {
            SortMode::Auto => "auto",
            SortMode::ForceNumeric => "num",
            SortMode::ForceString => "str",
        };
        write!(f, "{direction}:{mode}")
    }
}

// ---------------------------------------------------------------------------
// Pairwise key comparison
// ---------------------------------------------------------------------------

/// How a pair of keys ended up being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareKind {
    Numeric,
    Lexicographic,
}

/// Parse a key as `f64`, ignoring surrounding whitespace.
///
/// Keys that are not UTF-8 are never numeric. Literals too large for `f64`
/// are rejected instead of becoming infinity; `inf`/`infinity` spelled out
/// are accepted.
pub fn parse_number(value: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(value).ok()?.trim();
    let number = text.parse::<f64>().ok()?;
    if number.is_infinite() && !is_infinity_literal(text) {
        return None;
    }
    Some(number)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Strip surrounding whitespace, Unicode-aware when the key is UTF-8.
fn trim_key(value: &[u8]) -> &[u8] {
    match std::str::from_utf8(value) {
        Ok(text) => text.trim().as_bytes(),
        Err(_) => value.trim_ascii(),
    }
}

/// Compare two keys in ascending order.
///
/// Outside [`SortMode::ForceString`], a pair where both sides parse as
/// numbers is compared numerically; any other pair falls back to byte-wise
/// order. The decision is made per pair, so a mixed column need not
/// be totally ordered.
pub fn compare_keys(a: &[u8], b: &[u8], mode: SortMode) -> (Ordering, CompareKind) {
    if mode != SortMode::ForceString {
        if let (Some(x), Some(y)) = (parse_number(a), parse_number(b)) {
            // NaN compares equal to everything.
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            return (ord, CompareKind::Numeric);
        }
    }
    (a.cmp(b), CompareKind::Lexicographic)
}

// ---------------------------------------------------------------------------
// Sort engine
// ---------------------------------------------------------------------------

/// Stably reorder the data rows of `table` by `column`.
///
/// A table with no data rows is returned as-is without looking at `column`.
/// With [`SortMode::ForceNumeric`], every key is validated up front and the
/// first empty or non-numeric one fails the whole sort. `index` must come
/// from this table's header.
pub fn apply_sort(
    table: Table,
    index: &HeaderIndex,
    column: &str,
    spec: SortSpec,
) -> Result<Table> {
    if table.data_rows().is_empty() {
        return Ok(table);
    }

    let idx = index.resolve(column, ColumnRole::Sort)?;

    if spec.direction == SortDirection::Neutral {
        return Ok(table);
    }

    if spec.mode == SortMode::ForceNumeric {
        validate_numeric(table.data_rows(), idx)?;
    }

    let Some((header, mut data)) = table.into_parts() else {
        return Ok(Table::default());
    };

    let mut fallbacks = 0usize;
    merge_sort_by(&mut data, |a, b| {
        let (ord, kind) = compare_keys(value_at(a, idx), value_at(b, idx), spec.mode);
        if kind == CompareKind::Lexicographic {
            fallbacks += 1;
        }
        match spec.direction {
            SortDirection::Descending => ord.reverse(),
            _ => ord,
        }
    });

    log::debug!(
        "sorted {} rows by {column:?} ({spec}); {fallbacks} comparisons used text order",
        data.len()
    );
    Ok(Table::from_parts(header, data))
}

fn validate_numeric(rows: &[Row], idx: usize) -> Result<()> {
    for row in rows {
        let value = trim_key(value_at(row, idx));
        if value.is_empty() || parse_number(value).is_none() {
            return Err(SiftError::NumericValidationFailed {
                value: String::from_utf8_lossy(value).into_owned(),
            });
        }
    }
    Ok(())
}

/// Stable top-down merge sort.
///
/// `slice::sort_by` may panic when the comparator is not a total order,
/// which the mixed numeric/text comparison cannot promise.
fn merge_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let taken = std::mem::take(items);
    *items = merge_sort_inner(taken, &mut compare);
}

fn merge_sort_inner<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_inner(items, compare);
    let right = merge_sort_inner(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // Take from the right only when strictly smaller, keeping ties in order.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
