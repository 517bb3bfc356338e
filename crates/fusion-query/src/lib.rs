//! Fusion Query - deferred filter, sort and limit over dynamic fields.
//!
//! This crate is the evaluation engine behind `fusion` collections. It knows
//! nothing about documents or files: anything implementing [`Queryable`] (a
//! by-name field lookup returning a [`Value`]) can be filtered and sorted.
//!
//! - Dynamic values: null, bool, number, string, sequence, mapping
//! - Strict and loose equality, plus the four ordering comparisons
//! - One sort order, stable, tolerant of missing fields
//! - A result cap
//!
//! # Quick Start
//!
//! ```rust
//! use fusion_query::{Mapping, Query, Value};
//!
//! let mut one = Mapping::new();
//! one.insert("title".into(), Value::from("Post One"));
//! one.insert("date".into(), Value::from("2023-01-01"));
//!
//! let mut two = Mapping::new();
//! two.insert("title".into(), Value::from("Post Two"));
//! two.insert("date".into(), Value::from("2023-02-01"));
//!
//! let posts = vec![one, two];
//! let query = Query::new()
//!     .and_gte("date", "2023-01-01")
//!     .order_desc("date")
//!     .limit(1)
//!     .build();
//!
//! let results = query.execute(&posts);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0]["title"], Value::from("Post Two"));
//! ```
//!
//! # Evaluation Order
//!
//! ```text
//! items ─▶ filter (all clauses AND) ─▶ sort (stable) ─▶ limit ─▶ results
//! ```
//!
//! # Operators
//!
//! | Op | Token | Meaning |
//! |----|-------|---------|
//! | `Eq` | `===` | same kind and value |
//! | `LooseEq` | `==` | equal after scalar coercion |
//! | `Ne` | `!==` | negation of `Eq` |
//! | `LooseNe` | `!=` | negation of `LooseEq` |
//! | `Gt`, `Gte`, `Lt`, `Lte` | `>`, `>=`, `<`, `<=` | ordering; false if incomparable |
//!
//! A clause built from an unrecognized token matches nothing and is reported
//! with a `log::warn!` each time the query runs.

mod clause;
mod error;
mod op;
mod ordering;
mod query;
mod traits;
mod value;

// Re-export public API
pub use clause::Clause;
pub use error::{QueryError, Result};
pub use op::Op;
pub use ordering::{compare_values, sort_by_field, stable_sort_by, Dir, OrderBy};
pub use query::Query;
pub use traits::Queryable;
pub use value::{Mapping, Number, Value};
