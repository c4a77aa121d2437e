use recipe_share_core::{
    async_trait,
    driver::{Operation, Response},
    Driver, Error, Result,
};
use std::sync::{Arc, Mutex};

/// A driver wrapper that logs every operation and its outcome
#[derive(Debug)]
pub struct LoggingDriver {
    /// The underlying driver that actually executes operations
    inner: Arc<dyn Driver>,

    /// Log of all operations executed through this driver
    /// Using Arc<Mutex> for thread-safe access from tests
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl LoggingDriver {
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }
}

#[derive(Debug, Clone)]
pub struct DriverOp {
    pub operation: Operation,

    /// Failed attempts are logged too; the resolver's fallback starts from one.
    pub response: std::result::Result<Response, Error>,
}

#[async_trait]
impl Driver for LoggingDriver {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn exec(&self, operation: Operation) -> Result<Response> {
        let response = self.inner.exec(operation.clone()).await;

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                operation,
                response: response.clone(),
            });

        response
    }

    async fn push_schema(&self) -> Result<()> {
        self.inner.push_schema().await
    }

    async fn reset_db(&self) -> Result<()> {
        self.inner.reset_db().await
    }
}
