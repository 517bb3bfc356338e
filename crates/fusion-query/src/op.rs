//! Comparison operators for query clauses.
//!
//! The [`Op`] enum defines the supported comparison operators. Operators can
//! also be parsed from their symbolic (`===`, `>=`, ...) or word (`eq`, `gte`,
//! ...) spellings via [`str::parse`].

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::QueryError;

/// Comparison operator for a query clause.
///
/// Equality comes in two flavours:
/// - **Strict** (`Eq`, `Ne`): kinds must match exactly
/// - **Loose** (`LooseEq`, `LooseNe`): mixed scalars are coerced first
///
/// The ordering operators (`Gt`, `Gte`, `Lt`, `Lte`) are false whenever the
/// two values cannot be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Op {
    /// Strict equality (`===`).
    #[default]
    Eq,
    /// Loose equality (`==`).
    LooseEq,
    /// Strict inequality (`!==`).
    Ne,
    /// Loose inequality (`!=`).
    LooseNe,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl Op {
    /// All operators, in declaration order.
    pub const ALL: [Op; 8] = [
        Op::Eq,
        Op::LooseEq,
        Op::Ne,
        Op::LooseNe,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
    ];

    /// Returns `true` for the four equality operators.
    pub fn is_equality(self) -> bool {
        matches!(self, Op::Eq | Op::LooseEq | Op::Ne | Op::LooseNe)
    }

    /// Returns `true` for the four ordering operators.
    pub fn is_ordering(self) -> bool {
        matches!(self, Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Returns `true` if this operator negates an equality test.
    pub fn is_negated(self) -> bool {
        matches!(self, Op::Ne | Op::LooseNe)
    }

    /// Evaluates a comparison given an ordering result.
    ///
    /// Only meaningful for the ordering operators; equality operators go
    /// through [`Value::strict_eq`](crate::Value::strict_eq) and
    /// [`Value::loose_eq`](crate::Value::loose_eq) instead.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the symbolic spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "===",
            Op::LooseEq => "==",
            Op::Ne => "!==",
            Op::LooseNe => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl FromStr for Op {
    type Err = QueryError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let op = match token.trim() {
            "===" | "eq" | "equals" => Op::Eq,
            "==" | "loose_eq" => Op::LooseEq,
            "!==" | "ne" | "not_equals" => Op::Ne,
            "!=" | "loose_ne" => Op::LooseNe,
            ">" | "gt" => Op::Gt,
            ">=" | "gte" => Op::Gte,
            "<" | "lt" => Op::Lt,
            "<=" | "lte" => Op::Lte,
            other => return Err(QueryError::UnknownOperator(other.to_string())),
        };
        Ok(op)
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
