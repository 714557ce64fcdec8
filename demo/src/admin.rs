//! Admin 模块：管理员生命周期
//!
//! 不直接依赖 Identity，只发布集成事件并转发其失败。
use crate::events::{CreateAdmin, DeleteAdminAccount};
use modulith_bus::{DispatchContext, EventBus};
use modulith_core::{Outcome, StatusClass, VoidOutcome};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admin {
    pub account_id: Uuid,
    pub email: String,
}

pub struct AdminService<B> {
    bus: B,
    admins: Mutex<HashMap<Uuid, Admin>>,
}

impl<B: EventBus> AdminService<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            admins: Mutex::new(HashMap::new()),
        }
    }

    pub async fn create(&self, ctx: &DispatchContext, email: &str) -> Outcome<Admin> {
        let account = self
            .bus
            .publish_single_result::<_, Uuid>(
                ctx,
                CreateAdmin {
                    email: email.to_string(),
                },
            )
            .await;
        if account.is_failure() {
            return Outcome::forward(&account);
        }

        let admin = Admin {
            account_id: account.into_value(),
            email: email.to_string(),
        };
        let Ok(mut admins) = self.admins.lock() else {
            return Outcome::failure_with("admin store unavailable", StatusClass::InternalError);
        };
        admins.insert(admin.account_id, admin.clone());
        Outcome::created(admin)
    }

    pub async fn delete(&self, ctx: &DispatchContext, account_id: Uuid) -> VoidOutcome {
        let deleted = self
            .bus
            .publish_void(ctx, DeleteAdminAccount { account_id })
            .await;
        if deleted.is_failure() {
            return Outcome::forward(&deleted);
        }

        let Ok(mut admins) = self.admins.lock() else {
            return Outcome::failure_with("admin store unavailable", StatusClass::InternalError);
        };
        admins.remove(&account_id);
        Outcome::success_with((), StatusClass::NoContent)
    }

    pub fn count(&self) -> usize {
        self.admins.lock().map(|a| a.len()).unwrap_or(0)
    }
}
