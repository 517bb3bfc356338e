//! The [`Queryable`] trait: field access for query execution.

use std::rc::Rc;
use std::sync::Arc;

use crate::value::{Mapping, Value};

/// Trait for types that can be queried.
///
/// The query engine reads fields by name and never needs anything else from
/// an item, so any type that can hand out a borrowed [`Value`] per field name
/// can be filtered and sorted.
///
/// # Example
///
/// ```
/// use fusion_query::{Queryable, Query, Value};
///
/// struct Post {
///     title: Value,
/// }
///
/// impl Queryable for Post {
///     fn field_value(&self, field: &str) -> Option<&Value> {
///         match field {
///             "title" => Some(&self.title),
///             _ => None,
///         }
///     }
/// }
///
/// let posts = vec![Post { title: "Hello".into() }, Post { title: "Bye".into() }];
/// let query = Query::new().and_eq("title", "Hello").build();
/// assert_eq!(query.execute(&posts).len(), 1);
/// ```
pub trait Queryable {
    /// Returns the value of a field, or `None` if the item has no such field.
    fn field_value(&self, field: &str) -> Option<&Value>;
}

impl Queryable for Mapping {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl<T: Queryable + ?Sized> Queryable for &T {
    fn field_value(&self, field: &str) -> Option<&Value> {
        (**self).field_value(field)
    }
}

impl<T: Queryable + ?Sized> Queryable for Box<T> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        (**self).field_value(field)
    }
}

impl<T: Queryable + ?Sized> Queryable for Rc<T> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        (**self).field_value(field)
    }
}

impl<T: Queryable + ?Sized> Queryable for Arc<T> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        (**self).field_value(field)
    }
}
