use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// 作用域内的工作单元：每次分发各持一份，互不可见
#[derive(Debug)]
pub struct UnitOfWork {
    scope_id: u64,
    ops: AtomicUsize,
}

impl UnitOfWork {
    pub fn new(scope_id: u64) -> Self {
        Self {
            scope_id,
            ops: AtomicUsize::new(0),
        }
    }

    pub fn scope_id(&self) -> u64 {
        self.scope_id
    }

    pub fn record(&self, op: &str) {
        let n = self.ops.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(scope = self.scope_id, n, op, "unit of work");
    }

    pub fn recorded(&self) -> usize {
        self.ops.load(Ordering::Relaxed)
    }
}
