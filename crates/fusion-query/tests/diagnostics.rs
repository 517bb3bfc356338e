//! Log output emitted while queries run.
//!
//! Installs a capturing logger for this test binary. Each test filters the
//! captured records by a field name only it uses, so tests can run in
//! parallel.

use std::sync::{Mutex, Once};

use fusion_query::{Clause, Mapping, Query, Value};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn install() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn warnings_mentioning(needle: &str) -> Vec<String> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == Level::Warn && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}

fn posts() -> Vec<Mapping> {
    ["Post One", "Post Two"]
        .iter()
        .map(|title| {
            let mut post = Mapping::new();
            post.insert("title".into(), Value::from(*title));
            post.insert("nickname".into(), Value::from("p"));
            post
        })
        .collect()
}

#[test]
fn unknown_operator_warns_once_per_execute() {
    install();
    let posts = posts();

    let mut query = Query::new().and_eq("title", "Post One");
    query.push(Clause::parse("nickname", "~=", "p"));

    assert!(query.execute(&posts).is_empty());
    let warnings = warnings_mentioning("'nickname'");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("'~='"));

    let _ = query.execute(&posts);
    assert_eq!(warnings_mentioning("'nickname'").len(), 2);
}

#[test]
fn each_unknown_clause_warns() {
    install();
    let posts = posts();

    let mut query = Query::new();
    query.push(Clause::parse("alias_a", "like", "x"));
    query.push(Clause::parse("alias_b", "between", "x"));

    assert_eq!(query.count(&posts), 0);
    assert_eq!(warnings_mentioning("'alias_a'").len(), 1);
    assert_eq!(warnings_mentioning("'alias_b'").len(), 1);
}

#[test]
fn supported_clauses_do_not_warn() {
    install();
    let posts = posts();

    let query = Query::new().and_op("subtitle", ">=", "a").unwrap();
    let _ = query.execute(&posts);
    assert!(warnings_mentioning("'subtitle'").is_empty());
}
