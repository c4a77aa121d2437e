use recipe_share_core::{
    async_trait,
    driver::{Operation, Response},
    Driver, Error, Result,
};
use std::sync::Arc;

/// Fails selected operations with a fixed error and forwards the rest.
#[derive(Debug)]
pub struct FaultDriver {
    inner: Arc<dyn Driver>,
    faults: Vec<(fn(&Operation) -> bool, Error)>,
}

impl FaultDriver {
    pub fn new(inner: Arc<dyn Driver>) -> Self {
        Self {
            inner,
            faults: vec![],
        }
    }

    /// Operations matching `predicate` fail with `error`. The first matching
    /// rule wins.
    pub fn fail_when(mut self, predicate: fn(&Operation) -> bool, error: Error) -> Self {
        self.faults.push((predicate, error));
        self
    }
}

#[async_trait]
impl Driver for FaultDriver {
    fn name(&self) -> &'static str {
        "fault"
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        if let Some((_, error)) = self.faults.iter().find(|(predicate, _)| predicate(&op)) {
            return Err(error.clone());
        }

        self.inner.exec(op).await
    }

    async fn push_schema(&self) -> Result<()> {
        self.inner.push_schema().await
    }

    async fn reset_db(&self) -> Result<()> {
        self.inner.reset_db().await
    }
}
