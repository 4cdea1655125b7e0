//! Log capture for tests. Records are kept per thread so tests running in
//! parallel only see their own output.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

struct ThreadLogger;

impl Log for ThreadLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| records.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: ThreadLogger = ThreadLogger;
static INIT: Once = Once::new();

/// Installs the logger on first use and forgets this thread's earlier records.
pub(crate) fn capture() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

pub(crate) fn records() -> Vec<(Level, String)> {
    RECORDS.with(|records| records.borrow().clone())
}

pub(crate) fn contains(level: Level, message: &str) -> bool {
    records().iter().any(|(l, m)| *l == level && m == message)
}
