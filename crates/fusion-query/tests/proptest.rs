//! Property-based tests for the query engine using proptest.

use proptest::prelude::*;
use fusion_query::{sort_by_field, stable_sort_by, Dir, Mapping, Op, OrderBy, Query, Queryable, Value};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    id: usize,
    fields: Mapping,
}

impl Queryable for TestItem {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

// Each field is present about two times in three.
fn optional_field<S>(strategy: S) -> impl Strategy<Value = Option<Value>>
where
    S: Strategy,
    S::Value: Into<Value>,
{
    prop_oneof![
        1 => Just(None::<Value>),
        2 => strategy.prop_map(|v: S::Value| Some(v.into())),
    ]
}

fn items_strategy() -> impl Strategy<Value = Vec<TestItem>> {
    prop::collection::vec(
        (
            optional_field(-50i64..50),
            optional_field("[a-e]{1,3}"),
            optional_field(any::<bool>()),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (value, name, active))| {
                let mut fields = Mapping::new();
                if let Some(value) = value {
                    fields.insert("value".into(), value);
                }
                if let Some(name) = name {
                    fields.insert("name".into(), name);
                }
                if let Some(active) = active {
                    fields.insert("active".into(), active);
                }
                TestItem { id, fields }
            })
            .collect()
    })
}

fn ids(results: &[&TestItem]) -> Vec<usize> {
    results.iter().map(|item| item.id).collect()
}

// Mixed kinds, including values that cannot be compared with anything.
fn mixed_value_strategy() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None::<Value>),
        Just(Some(Value::Null)),
        (-5i64..5).prop_map(|n| Some(Value::from(n))),
        (-5i64..5).prop_map(|n| Some(Value::from(n as f64 / 2.0))),
        "[0-9]|[a-c]".prop_map(|s| Some(Value::from(s))),
        any::<bool>().prop_map(|b| Some(Value::from(b))),
        Just(Some(Value::Sequence(vec![]))),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop::sample::select(Op::ALL.to_vec())
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Filtering never grows the collection and preserves input order.
    #[test]
    fn filter_is_an_ordered_subsequence(
        items in items_strategy(),
        op in op_strategy(),
        threshold in -50i64..50,
    ) {
        let results = Query::new().and("value", op, threshold).execute(&items);
        prop_assert!(results.len() <= items.len());

        let ids = ids(&results);
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    /// Clauses on disjoint fields commute.
    #[test]
    fn and_is_commutative(
        items in items_strategy(),
        threshold in -50i64..50,
        active in any::<bool>(),
    ) {
        let ab = Query::new().and_gte("value", threshold).and_eq("active", active);
        let ba = Query::new().and_eq("active", active).and_gte("value", threshold);
        prop_assert_eq!(ids(&ab.execute(&items)), ids(&ba.execute(&items)));
    }

    /// Negated equality is the exact complement of equality.
    #[test]
    fn ne_complements_eq(
        items in items_strategy(),
        threshold in -50i64..50,
    ) {
        let eq = Query::new().and_eq("value", threshold).count(&items);
        let ne = Query::new().and_ne("value", threshold).count(&items);
        prop_assert_eq!(eq + ne, items.len());

        let loose_eq = Query::new().and_loose_eq("value", threshold).count(&items);
        let loose_ne = Query::new().and_loose_ne("value", threshold).count(&items);
        prop_assert_eq!(loose_eq + loose_ne, items.len());
    }

    /// count() equals the length of an unlimited execute().
    #[test]
    fn count_equals_execute_len(
        items in items_strategy(),
        threshold in -50i64..50,
    ) {
        let query = Query::new().and_lt("value", threshold);
        prop_assert_eq!(query.count(&items), query.execute(&items).len());
    }

    /// limit(0) is always empty; limit(n >= len) changes nothing.
    #[test]
    fn limit_bounds(
        items in items_strategy(),
        extra in 0usize..10,
    ) {
        prop_assert!(Query::new().limit(0).execute(&items).is_empty());

        let all = Query::new().order_asc("name").execute(&items);
        let capped = Query::new()
            .order_asc("name")
            .limit(items.len() + extra)
            .execute(&items);
        prop_assert_eq!(ids(&all), ids(&capped));
    }

    /// Limit takes a prefix of the sorted result.
    #[test]
    fn limit_is_prefix_of_sorted(
        items in items_strategy(),
        limit in 0usize..20,
    ) {
        let full = ids(&Query::new().order_desc("value").execute(&items));
        let capped = ids(&Query::new().order_desc("value").limit(limit).execute(&items));
        prop_assert_eq!(&full[..capped.len()], &capped[..]);
        prop_assert_eq!(capped.len(), limit.min(items.len()));
    }

    /// Sorting is a permutation, and items without the field never move.
    #[test]
    fn sort_pins_items_missing_the_field(items in items_strategy()) {
        let results = Query::new().order_asc("value").execute(&items);
        prop_assert_eq!(results.len(), items.len());

        for (position, item) in results.iter().enumerate() {
            if item.field_value("value").is_none() {
                prop_assert_eq!(item.id, position);
            }
        }
    }

    /// When every item has the field, ascending sort is non-decreasing
    /// and ties keep input order.
    #[test]
    fn sort_is_ordered_and_stable(
        values in prop::collection::vec(-5i64..5, 0..40),
    ) {
        let items: Vec<TestItem> = values
            .iter()
            .enumerate()
            .map(|(id, v)| {
                let mut fields = Mapping::new();
                fields.insert("value".into(), Value::from(*v));
                TestItem { id, fields }
            })
            .collect();

        let results = Query::new().order_asc("value").execute(&items);
        for pair in results.windows(2) {
            let a = values[pair[0].id];
            let b = values[pair[1].id];
            prop_assert!(a < b || (a == b && pair[0].id < pair[1].id));
        }
    }

    /// Splitting into runs gives the same order as the plain insertion sort.
    #[test]
    fn sort_by_field_agrees_with_insertion_sort(
        values in prop::collection::vec(mixed_value_strategy(), 0..40),
        desc in any::<bool>(),
    ) {
        let items: Vec<TestItem> = values
            .into_iter()
            .enumerate()
            .map(|(id, value)| {
                let mut fields = Mapping::new();
                if let Some(value) = value {
                    fields.insert("value".into(), value);
                }
                TestItem { id, fields }
            })
            .collect();
        let order = OrderBy::new("value", if desc { Dir::Desc } else { Dir::Asc });

        let mut fast: Vec<&TestItem> = items.iter().collect();
        sort_by_field(&mut fast, &order);

        let mut slow: Vec<&TestItem> = items.iter().collect();
        stable_sort_by(&mut slow, |a, b| {
            order.compare(a.field_value("value"), b.field_value("value"))
        });

        prop_assert_eq!(ids(&fast), ids(&slow));
    }
}
