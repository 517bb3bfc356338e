//! Clause types for query predicates.
//!
//! A [`Clause`] represents a single filter predicate: a field name,
//! an operator, and a comparison value.

use crate::op::Op;
use crate::value::Value;

/// A single filter predicate.
///
/// A clause consists of:
/// - A field name (the field to compare)
/// - An operator (how to compare)
/// - A value (what to compare against)
///
/// A clause built from an operator token that could not be parsed keeps the
/// token for diagnostics and never matches anything.
///
/// # Example
///
/// ```
/// use fusion_query::{Clause, Op, Value};
///
/// let clause = Clause::new("title", Op::Eq, "Post One");
/// assert!(clause.matches(Some(&Value::from("Post One"))));
/// assert!(!clause.matches(None));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator, `None` if the token was not recognized.
    pub op: Option<Op>,
    /// The value to compare against.
    pub value: Value,
    token: String,
}

impl Clause {
    /// Creates a new clause.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Clause {
            field: field.into(),
            op: Some(op),
            value: value.into(),
            token: op.as_str().to_string(),
        }
    }

    /// Creates a clause from an operator token.
    ///
    /// Unknown tokens produce an unsupported clause rather than an error; use
    /// [`str::parse::<Op>`] directly to reject them instead.
    pub fn parse(field: impl Into<String>, token: &str, value: impl Into<Value>) -> Self {
        Clause {
            field: field.into(),
            op: token.parse().ok(),
            value: value.into(),
            token: token.to_string(),
        }
    }

    /// Returns the operator as it was spelled when the clause was built.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns `true` if the operator was recognized.
    pub fn is_supported(&self) -> bool {
        self.op.is_some()
    }

    /// Evaluates this clause against a field value.
    ///
    /// `field_value` is `None` when the item has no such field. An absent
    /// field fails every positive test and passes the negated ones, except
    /// that it is loosely equal to an explicit null.
    pub fn matches(&self, field_value: Option<&Value>) -> bool {
        let Some(op) = self.op else {
            return false;
        };

        match op {
            Op::Eq => self.strict_eq(field_value),
            Op::Ne => !self.strict_eq(field_value),
            Op::LooseEq => self.loose_eq(field_value),
            Op::LooseNe => !self.loose_eq(field_value),
            Op::Gt | Op::Gte | Op::Lt | Op::Lte => field_value
                .and_then(|v| v.compare(&self.value))
                .is_some_and(|ordering| op.eval_ordering(ordering)),
        }
    }

    fn strict_eq(&self, field_value: Option<&Value>) -> bool {
        field_value.is_some_and(|v| v.strict_eq(&self.value))
    }

    fn loose_eq(&self, field_value: Option<&Value>) -> bool {
        match field_value {
            Some(v) => v.loose_eq(&self.value),
            None => self.value.is_null(),
        }
    }
}
