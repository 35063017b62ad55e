//! In-memory sink for tests.
//!
//! Every [`MemoryConnection`] opened from one [`MemoryConnector`] appends
//! into the same shared log, so callers can inspect exactly which chunks
//! reached the sink and in what order.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::connection::{Connector, SinkConnection};
use crate::error::{self, SinkError};

#[derive(Debug, Default)]
struct MemoryState {
    /// Every execute call in order, successful or not.
    calls: Vec<Vec<String>>,
    /// Records from successful executes.
    rows: Vec<String>,
    fail_calls: HashSet<usize>,
    refuse_connections: bool,
    opened: usize,
    closed: usize,
}

/// Connector backed by shared in-memory state.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`th execute call (zero-based, counted across all
    /// connections) fail.
    #[must_use]
    pub fn failing_call(self, n: usize) -> Self {
        self.lock().fail_calls.insert(n);
        self
    }

    /// Make every `connect` fail.
    #[must_use]
    pub fn refusing_connections(self) -> Self {
        self.lock().refuse_connections = true;
        self
    }

    /// Records passed to each execute call, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.lock().calls.clone()
    }

    /// Records that were written successfully, in write order.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.lock().rows.clone()
    }

    #[must_use]
    pub fn connections_opened(&self) -> usize {
        self.lock().opened
    }

    #[must_use]
    pub fn connections_closed(&self) -> usize {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panicking test thread must not hide the log from the others.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Connector for MemoryConnector {
    type Connection = MemoryConnection;

    fn connect(&self) -> error::Result<MemoryConnection> {
        let mut state = self.lock();
        if state.refuse_connections {
            return Err(SinkError::rejected("connect", "connection refused"));
        }
        state.opened += 1;
        Ok(MemoryConnection {
            state: Arc::clone(&self.state),
            released: false,
        })
    }

    fn endpoint(&self) -> String {
        "memory".to_string()
    }
}

/// Connection into a [`MemoryConnector`]'s shared state.
#[derive(Debug)]
pub struct MemoryConnection {
    state: Arc<Mutex<MemoryState>>,
    released: bool,
}

impl MemoryConnection {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.lock().closed += 1;
        }
    }
}

impl SinkConnection for MemoryConnection {
    type Prepared = String;

    fn prepare(&mut self, sql: &str) -> error::Result<String> {
        if !sql.contains("$1") {
            return Err(SinkError::rejected(
                "prepare",
                "statement has no positional parameter",
            ));
        }
        Ok(sql.to_string())
    }

    fn execute(&mut self, _prepared: &String, records: &[String]) -> error::Result<u64> {
        let mut state = self.lock();
        let call = state.calls.len();
        state.calls.push(records.to_vec());
        if state.fail_calls.contains(&call) {
            return Err(SinkError::rejected(
                "execute",
                format!("injected failure on call {call}"),
            ));
        }
        state.rows.extend_from_slice(records);
        Ok(records.len() as u64)
    }

    fn close(mut self) -> error::Result<()> {
        self.release();
        Ok(())
    }
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.release();
    }
}
