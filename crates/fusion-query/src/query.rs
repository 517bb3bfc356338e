//! Query builder and executor.
//!
//! The [`Query`] struct holds pending query state (filter clauses, one sort
//! order and a result cap) and evaluates it against a slice of
//! [`Queryable`] items in a single pass: filter, then sort, then limit.

use log::{trace, warn};

use crate::clause::Clause;
use crate::error::Result;
use crate::op::Op;
use crate::ordering::{sort_by_field, Dir, OrderBy};
use crate::traits::Queryable;
use crate::value::Value;

/// Pending filter, sort and limit state.
///
/// Clauses combine with AND: an item is kept only if every clause matches.
/// At most one sort order is active; setting another replaces it.
///
/// Two builder styles are available. The consuming methods (`and_eq`,
/// `order_desc`, ...) read naturally when a query is assembled in one
/// expression; the `push`/`set_*` methods update a query held in place.
///
/// # Example
///
/// ```
/// use fusion_query::{Query, Dir};
///
/// let query = Query::new()
///     .and_eq("draft", false)
///     .and_gte("date", "2023-01-01")
///     .order_by("date", Dir::Desc)
///     .limit(10)
///     .build();
///
/// assert_eq!(query.clauses().len(), 2);
/// assert_eq!(query.get_limit(), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    clauses: Vec<Clause>,
    order: Option<OrderBy>,
    limit: Option<usize>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items and keeps their order.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Clause builders
    // ========================================================================

    /// Adds a clause.
    pub fn and(mut self, field: &str, op: Op, value: impl Into<Value>) -> Self {
        self.push(Clause::new(field, op, value));
        self
    }

    /// Adds a clause from an operator token, rejecting unknown tokens.
    pub fn and_op(self, field: &str, token: &str, value: impl Into<Value>) -> Result<Self> {
        let op = token.parse::<Op>()?;
        Ok(self.and(field, op, value))
    }

    /// Adds a strict equality clause.
    pub fn and_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::Eq, value)
    }

    /// Adds a strict not-equal clause.
    pub fn and_ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::Ne, value)
    }

    /// Adds a loose equality clause.
    pub fn and_loose_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::LooseEq, value)
    }

    /// Adds a loose not-equal clause.
    pub fn and_loose_ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::LooseNe, value)
    }

    /// Adds a greater-than clause.
    pub fn and_gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::Gt, value)
    }

    /// Adds a greater-than-or-equal clause.
    pub fn and_gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::Gte, value)
    }

    /// Adds a less-than clause.
    pub fn and_lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::Lt, value)
    }

    /// Adds a less-than-or-equal clause.
    pub fn and_lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(field, Op::Lte, value)
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sets the sort order, replacing any previous one.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.set_order(Some(OrderBy::new(field, dir)));
        self
    }

    /// Sorts ascending by `field`.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by `field`.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Sets the maximum number of results to return.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // In-place updates
    // ========================================================================

    /// Appends a clause.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Replaces the sort order.
    pub fn set_order(&mut self, order: Option<OrderBy>) {
        self.order = order;
    }

    /// Replaces the result cap. `None` means unlimited.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    /// Clears clauses, sort order and cap.
    pub fn clear(&mut self) {
        *self = Query::default();
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the filter clauses in insertion order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the sort order, if set.
    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns `true` if the query has no clauses, no ordering and no limit.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.order.is_none() && self.limit.is_none()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item passes every clause.
    pub fn matches<T: Queryable + ?Sized>(&self, item: &T) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.matches(item.field_value(&clause.field)))
    }

    /// Evaluates the query against `items`.
    ///
    /// Applies, in order: the filter clauses, the sort order (stable;
    /// incomparable pairs keep their relative order), and the limit. The input
    /// slice is not modified.
    pub fn execute<'a, T: Queryable>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.warn_unsupported();

        let mut results: Vec<&'a T> = items.iter().filter(|item| self.matches(*item)).collect();

        if let Some(order) = &self.order {
            sort_by_field(&mut results, order);
        }

        if let Some(limit) = self.limit {
            results.truncate(limit);
        }

        trace!(
            "query kept {} of {} items ({} clauses, order: {}, limit: {:?})",
            results.len(),
            items.len(),
            self.clauses.len(),
            self.order
                .as_ref()
                .map_or_else(|| "none".to_string(), |o| format!("{} {}", o.field, o.dir)),
            self.limit,
        );

        results
    }

    /// Evaluates the query and clones the matching items.
    pub fn execute_cloned<T: Queryable + Clone>(&self, items: &[T]) -> Vec<T> {
        self.execute(items).into_iter().cloned().collect()
    }

    /// Counts the items passing every clause. Sorting and limit do not apply.
    pub fn count<T: Queryable>(&self, items: &[T]) -> usize {
        self.warn_unsupported();
        items.iter().filter(|item| self.matches(*item)).count()
    }

    fn warn_unsupported(&self) {
        for clause in self.clauses.iter().filter(|c| !c.is_supported()) {
            warn!(
                "filter on '{}' uses unsupported operator '{}'; it matches nothing",
                clause.field,
                clause.token()
            );
        }
    }
}
