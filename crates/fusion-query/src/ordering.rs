//! Ordering types for query result sorting.
//!
//! Provides [`Dir`] for sort direction, [`OrderBy`] for field-based ordering,
//! [`sort_by_field`] to apply it and [`stable_sort_by`], the insertion sort it
//! falls back to.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::QueryError;
use crate::traits::Queryable;
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(QueryError::UnknownDirection(token.to_string())),
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sort order: one field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two field values according to this ordering.
    ///
    /// Pairs that cannot be ordered (an absent value, a kind mismatch, NaN)
    /// compare as `Equal`, so they keep their relative position under a
    /// stable sort.
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        compare_values(a, b)
            .map(|ordering| self.dir.apply(ordering))
            .unwrap_or(Ordering::Equal)
    }
}

/// Compares two possibly-absent field values.
///
/// Returns `None` if either value is absent or the pair is incomparable.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Option<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        _ => None,
    }
}

/// Sorts `items` in place with a stable insertion sort.
///
/// The comparator used for field ordering is not a total order: an absent
/// value compares `Equal` to everything, which breaks transitivity. An element
/// therefore only moves left past neighbours that compare strictly `Greater`,
/// and an `Equal` neighbour stops it. Elements that compare `Equal` to all
/// others never move.
///
/// Runs in O(n²) comparisons in the worst case.
pub fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Sorts `items` by `order`.
///
/// The result is the one [`stable_sort_by`] gives with [`OrderBy::compare`],
/// in fewer comparisons. A value that cannot be compared even with itself
/// (absent, null, sequence, mapping, NaN) is incomparable with everything, so
/// its item never moves and splits the slice into runs that sort on their
/// own. A run whose values share one kind is totally ordered and goes through
/// `sort_by` in O(n log n); a run mixing kinds uses the insertion sort.
pub fn sort_by_field<T: Queryable>(items: &mut [T], order: &OrderBy) {
    let compare =
        |a: &T, b: &T| order.compare(a.field_value(&order.field), b.field_value(&order.field));
    let is_barrier = |item: &T| match item.field_value(&order.field) {
        Some(value) => value.compare(value).is_none(),
        None => true,
    };

    let mut start = 0;
    while start < items.len() {
        if is_barrier(&items[start]) {
            start += 1;
            continue;
        }

        let mut end = start + 1;
        while end < items.len() && !is_barrier(&items[end]) {
            end += 1;
        }

        let run = &mut items[start..end];
        if has_uniform_kind(run, &order.field) {
            run.sort_by(compare);
        } else {
            stable_sort_by(run, compare);
        }
        start = end;
    }
}

// Integers and floats count as different kinds: comparing them goes through
// f64, which is not transitive for large integers.
fn has_uniform_kind<T: Queryable>(run: &[T], field: &str) -> bool {
    let kind = |item: &T| match item.field_value(field) {
        Some(Value::String(_)) => Some(0),
        Some(Value::Bool(_)) => Some(1),
        Some(Value::Number(Number::I64(_) | Number::U64(_))) => Some(2),
        Some(Value::Number(Number::F64(_))) => Some(3),
        _ => None,
    };

    let Some(first) = run.first().and_then(kind) else {
        return false;
    };
    run.iter().all(|item| kind(item) == Some(first))
}
