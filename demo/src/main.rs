mod admin;
mod catalog;
mod customer;
mod events;
mod identity;
mod unit_of_work;

use admin::AdminService;
use catalog::ReviewService;
use customer::CustomerDirectory;
use events::CreateAdmin;
use identity::AccountStore;
use modulith_bus::{DispatchContext, EventBus, EventBusConfig, InMemoryEventBus, ServiceProvider};
use modulith_core::{BusinessContext, Outcome};
use std::fmt::Debug;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use unit_of_work::UnitOfWork;
use uuid::Uuid;

fn build_bus(
    accounts: Arc<AccountStore>,
    customers: Arc<CustomerDirectory>,
) -> anyhow::Result<Arc<InMemoryEventBus>> {
    let mut services = ServiceProvider::builder();
    services
        .add_singleton(accounts)
        .add_singleton(customers)
        .add_scoped(|scope| Ok(UnitOfWork::new(scope.id())));

    let config = EventBusConfig::builder()
        .reject_duplicate_result_handlers(true)
        .build();
    let bus = InMemoryEventBus::new(Arc::new(services.build())).with_config(config);
    identity::register(&bus)?;
    customer::register(&bus)?;

    Ok(Arc::new(bus))
}

// HTTP 边界：把结果渲染为状态码
fn respond<T: Debug>(action: &str, out: &Outcome<T>) {
    let code = out.status().http_status();
    match out.fault() {
        None => info!(code, value = ?out.value(), "{action}"),
        Some(fault) if fault.is_configuration() => {
            warn!(code, error = fault.message(), "{action}: misconfigured")
        }
        Some(fault) => info!(code, error = fault.message(), "{action}"),
    }
}

fn request(module: &str, token: &CancellationToken) -> DispatchContext {
    DispatchContext::new(token.child_token()).with_biz(
        BusinessContext::builder()
            .correlation_id(Uuid::new_v4().to_string())
            .source_module(module.to_string())
            .build(),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,modulith_bus=debug")),
        )
        .init();

    let accounts = Arc::new(AccountStore::default());
    let customers = Arc::new(CustomerDirectory::default());
    let bus = build_bus(accounts.clone(), customers.clone())?;
    info!(
        void_events = ?bus.registered_void_events(),
        result_events = ?bus.registered_result_events(),
        "event bus ready"
    );

    let shutdown = CancellationToken::new();
    let admins = AdminService::new(bus.clone());
    let reviews = ReviewService::new(bus.clone());

    // Admin ↔ Identity
    let ctx = request("admin", &shutdown);
    let created = admins.create(&ctx, "root@example.com").await;
    respond("POST /admins", &created);
    respond(
        "POST /admins (duplicate)",
        &admins.create(&ctx, "root@example.com").await,
    );

    if let Some(admin) = created.try_value() {
        respond("DELETE /admins", &admins.delete(&ctx, admin.account_id).await);
        respond("DELETE /admins (again)", &admins.delete(&ctx, admin.account_id).await);
        info!(
            email = %admin.email,
            admins = admins.count(),
            account_left = accounts.contains(&admin.account_id),
            "admin removed"
        );
    }

    // Catalog ↔ Customer
    let ctx = request("catalog", &shutdown);
    let customer_id = Uuid::new_v4();
    customers.enroll(customer_id);
    for rating in [5, 4, 3] {
        respond(
            "POST /reviews",
            &reviews.add_review(&ctx, customer_id, rating).await,
        );
    }
    respond(
        "POST /reviews (unknown customer)",
        &reviews.add_review(&ctx, Uuid::new_v4(), 5).await,
    );
    info!(
        reviews = reviews.count(),
        average = ?reviews.average_rating_of(&customer_id),
        used = ?customers.reviews_of(&customer_id),
        "reviews stored"
    );

    // 未注册的 (事件, 结果) 组合
    let unmapped: Outcome<String> = bus
        .publish_single_result(
            &ctx,
            CreateAdmin {
                email: "ops@example.com".into(),
            },
        )
        .await;
    respond("POST /admins (wrong result type)", &unmapped);

    shutdown.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modulith_core::StatusClass;

    fn services() -> (
        Arc<AccountStore>,
        Arc<CustomerDirectory>,
        AdminService<Arc<InMemoryEventBus>>,
        ReviewService<Arc<InMemoryEventBus>>,
    ) {
        let accounts = Arc::new(AccountStore::default());
        let customers = Arc::new(CustomerDirectory::default());
        let bus = build_bus(accounts.clone(), customers.clone()).unwrap();
        (
            accounts,
            customers,
            AdminService::new(bus.clone()),
            ReviewService::new(bus),
        )
    }

    #[tokio::test]
    async fn admin_lifecycle_goes_through_identity() {
        let (accounts, _, admins, _) = services();
        let ctx = DispatchContext::default();

        let admin = admins.create(&ctx, "a@example.com").await;
        assert_eq!(admin.status(), StatusClass::Created);
        let id = admin.value().account_id;
        assert!(accounts.contains(&id));

        let dup = admins.create(&ctx, "a@example.com").await;
        assert_eq!(dup.status(), StatusClass::Conflict);
        assert_eq!(admins.count(), 1);

        assert_eq!(admins.delete(&ctx, id).await.status(), StatusClass::NoContent);
        assert!(!accounts.contains(&id));
        assert_eq!(admins.count(), 0);

        let again = admins.delete(&ctx, id).await;
        assert_eq!(again.status(), StatusClass::NotFound);
    }

    #[tokio::test]
    async fn unknown_customer_never_reaches_the_quota_handler() {
        let (_, customers, _, reviews) = services();
        let ctx = DispatchContext::default();
        let known = Uuid::new_v4();
        customers.enroll(known);

        let out = reviews.add_review(&ctx, Uuid::new_v4(), 4).await;
        assert_eq!(out.status(), StatusClass::NotFound);
        assert_eq!(out.error_message(), Some("customer not found"));
        assert_eq!(customers.reviews_of(&known), Some(0));
        assert_eq!(reviews.count(), 0);
    }

    #[tokio::test]
    async fn quota_failure_is_forwarded_to_catalog() {
        let (_, customers, _, reviews) = services();
        let ctx = DispatchContext::default();
        let id = Uuid::new_v4();
        customers.enroll(id);

        for _ in 0..customer::REVIEW_QUOTA {
            assert!(reviews.add_review(&ctx, id, 5).await.is_success());
        }
        let out = reviews.add_review(&ctx, id, 5).await;

        assert_eq!(out.status(), StatusClass::Forbidden);
        assert_eq!(reviews.count(), customer::REVIEW_QUOTA as usize);
        assert_eq!(reviews.average_rating_of(&id), Some(5.0));
    }

    #[tokio::test]
    async fn invalid_rating_fails_before_dispatch() {
        let (_, customers, _, reviews) = services();
        let id = Uuid::new_v4();
        customers.enroll(id);

        let out = reviews.add_review(&DispatchContext::default(), id, 9).await;
        assert_eq!(out.status(), StatusClass::BadRequest);
        assert_eq!(customers.reviews_of(&id), Some(0));
    }
}
