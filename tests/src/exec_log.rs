use crate::logging_driver::DriverOp;
use recipe_share_core::driver::{operation::QueryProfiles, Operation};
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    pub fn joined_reads(&self) -> usize {
        self.count(Operation::is_joined_read)
    }

    pub fn plain_reads(&self) -> usize {
        self.count(Operation::is_plain_read)
    }

    pub fn profile_reads(&self) -> usize {
        self.count(Operation::is_query_profiles)
    }

    pub fn writes(&self) -> usize {
        self.count(Operation::is_write)
    }

    /// Number of operations the store failed
    pub fn failures(&self) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.response.is_err())
            .count()
    }

    /// Every profile read, in execution order
    pub fn profile_queries(&self) -> Vec<QueryProfiles> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match &op.operation {
                Operation::QueryProfiles(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// The operations, without their outcomes, in execution order
    pub fn operations(&self) -> Vec<Operation> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.clone())
            .collect()
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }
}
