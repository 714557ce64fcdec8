//! Identity 模块：登录账号
use crate::events::{CreateAdmin, DeleteAdminAccount};
use crate::unit_of_work::UnitOfWork;
use async_trait::async_trait;
use modulith_bus::{BusError, DispatchContext, InMemoryEventBus, ResultHandler, VoidHandler};
use modulith_core::{Outcome, StatusClass, VoidOutcome};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Mutex<HashMap<Uuid, String>>,
}

impl AccountStore {
    pub fn contains(&self, id: &Uuid) -> bool {
        self.accounts
            .lock()
            .map(|a| a.contains_key(id))
            .unwrap_or(false)
    }
}

struct DeleteAccount {
    store: Arc<AccountStore>,
    uow: Arc<UnitOfWork>,
}

#[async_trait]
impl VoidHandler<DeleteAdminAccount> for DeleteAccount {
    async fn handle(&self, _ctx: &DispatchContext, ev: &DeleteAdminAccount) -> VoidOutcome {
        let Ok(mut accounts) = self.store.accounts.lock() else {
            return Outcome::failure_with("account store unavailable", StatusClass::InternalError);
        };
        if accounts.remove(&ev.account_id).is_none() {
            return Outcome::failure_with(
                format!("account {} not found", ev.account_id),
                StatusClass::NotFound,
            );
        }
        self.uow.record("delete account");
        info!(
            scope = self.uow.scope_id(),
            ops = self.uow.recorded(),
            account = %ev.account_id,
            "account deleted"
        );
        Outcome::success(())
    }
}

struct CreateAccount {
    store: Arc<AccountStore>,
    uow: Arc<UnitOfWork>,
}

#[async_trait]
impl ResultHandler<CreateAdmin, Uuid> for CreateAccount {
    async fn handle(&self, _ctx: &DispatchContext, ev: CreateAdmin) -> Outcome<Uuid> {
        let Ok(mut accounts) = self.store.accounts.lock() else {
            return Outcome::failure_with("account store unavailable", StatusClass::InternalError);
        };
        if accounts.values().any(|email| *email == ev.email) {
            return Outcome::failure_with(
                format!("email {} already registered", ev.email),
                StatusClass::Conflict,
            );
        }
        let id = Uuid::new_v4();
        accounts.insert(id, ev.email);
        self.uow.record("create account");
        Outcome::created(id)
    }
}

pub fn register(bus: &InMemoryEventBus) -> Result<(), BusError> {
    bus.register_void::<DeleteAdminAccount, _, _>(|scope| {
        Ok(DeleteAccount {
            store: scope.resolve()?,
            uow: scope.resolve()?,
        })
    })?;
    bus.register_result::<CreateAdmin, Uuid, _, _>(|scope| {
        Ok(CreateAccount {
            store: scope.resolve()?,
            uow: scope.resolve()?,
        })
    })
}
