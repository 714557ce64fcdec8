//! Customer 模块：顾客档案与评价额度
use crate::events::CheckCustomerExistsForAddingReview;
use crate::unit_of_work::UnitOfWork;
use async_trait::async_trait;
use modulith_bus::{BusError, DispatchContext, InMemoryEventBus, VoidHandler};
use modulith_core::{Outcome, StatusClass, VoidOutcome};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// 每位顾客可提交的评价数
pub const REVIEW_QUOTA: u32 = 2;

#[derive(Debug, Default)]
pub struct CustomerDirectory {
    // 顾客 ID → 已提交评价数
    customers: Mutex<HashMap<Uuid, u32>>,
}

impl CustomerDirectory {
    pub fn enroll(&self, id: Uuid) {
        if let Ok(mut customers) = self.customers.lock() {
            customers.entry(id).or_insert(0);
        }
    }

    pub fn reviews_of(&self, id: &Uuid) -> Option<u32> {
        self.customers.lock().ok()?.get(id).copied()
    }
}

struct EnsureCustomerExists {
    directory: Arc<CustomerDirectory>,
}

#[async_trait]
impl VoidHandler<CheckCustomerExistsForAddingReview> for EnsureCustomerExists {
    async fn handle(
        &self,
        _ctx: &DispatchContext,
        ev: &CheckCustomerExistsForAddingReview,
    ) -> VoidOutcome {
        match self.directory.reviews_of(&ev.customer_id) {
            Some(_) => Outcome::success(()),
            None => Outcome::failure_with("customer not found", StatusClass::NotFound),
        }
    }
}

struct ConsumeReviewQuota {
    directory: Arc<CustomerDirectory>,
    uow: Arc<UnitOfWork>,
}

#[async_trait]
impl VoidHandler<CheckCustomerExistsForAddingReview> for ConsumeReviewQuota {
    async fn handle(
        &self,
        _ctx: &DispatchContext,
        ev: &CheckCustomerExistsForAddingReview,
    ) -> VoidOutcome {
        let Ok(mut customers) = self.directory.customers.lock() else {
            return Outcome::failure_with("customer store unavailable", StatusClass::InternalError);
        };
        let Some(used) = customers.get_mut(&ev.customer_id) else {
            return Outcome::failure_with("customer not found", StatusClass::NotFound);
        };
        if *used >= REVIEW_QUOTA {
            return Outcome::failure_with("review quota exhausted", StatusClass::Forbidden);
        }
        *used += 1;
        self.uow.record("consume review quota");
        Outcome::success(())
    }
}

/// 存在性检查先于额度扣减注册
pub fn register(bus: &InMemoryEventBus) -> Result<(), BusError> {
    bus.register_void::<CheckCustomerExistsForAddingReview, _, _>(|scope| {
        Ok(EnsureCustomerExists {
            directory: scope.resolve()?,
        })
    })?;
    bus.register_void::<CheckCustomerExistsForAddingReview, _, _>(|scope| {
        Ok(ConsumeReviewQuota {
            directory: scope.resolve()?,
            uow: scope.resolve()?,
        })
    })
}
