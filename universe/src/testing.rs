// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Log capture for unit tests
//!
//! Installs a process-wide [`log::Log`] once and records messages only for
//! threads that asked for them, so tests running in parallel do not see
//! each other's output.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::{Cell, RefCell};
use std::sync::Once;

thread_local! {
    static CAPTURING: Cell<bool> = Cell::new(false);
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        CAPTURING.with(Cell::get)
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            RECORDS.with(|records| {
                records
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Start recording log messages emitted on this thread
pub(crate) fn capture() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    CAPTURING.with(|capturing| capturing.set(true));
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Messages logged on this thread at `level` since the last call
pub(crate) fn take(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        let mut records = records.borrow_mut();
        let (matching, rest): (Vec<_>, Vec<_>) =
            records.drain(..).partition(|(recorded, _)| *recorded == level);
        *records = rest;
        matching.into_iter().map(|(_, message)| message).collect()
    })
}
