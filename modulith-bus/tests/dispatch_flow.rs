use async_trait::async_trait;
use modulith_bus::{
    DispatchContext, EventBus, InMemoryEventBus, ResultHandler, ScopeFactory, ServiceProvider,
    VoidHandler,
};
use modulith_core::{Outcome, StatusClass, VoidOutcome};
use modulith_macros::integration_event;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ---- Admin 模块（生产方）----

#[integration_event]
struct DeleteAdminAccount {
    account_id: Uuid,
}

#[integration_event]
struct CreateAdmin {
    email: String,
}

#[derive(Default)]
struct AdminRepository {
    deleted: Mutex<Vec<Uuid>>,
}

struct AdminService<B> {
    bus: B,
    repo: Arc<AdminRepository>,
}

impl<B: EventBus> AdminService<B> {
    async fn create(&self, ctx: &DispatchContext, email: &str) -> Outcome<Uuid> {
        let created = self
            .bus
            .publish_single_result::<_, Uuid>(
                ctx,
                CreateAdmin {
                    email: email.to_string(),
                },
            )
            .await;
        if created.is_failure() {
            return Outcome::forward(&created);
        }
        Outcome::created(*created.value())
    }

    async fn delete(&self, ctx: &DispatchContext, account_id: Uuid) -> VoidOutcome {
        let deleted = self
            .bus
            .publish_void(ctx, DeleteAdminAccount { account_id })
            .await;
        if deleted.is_failure() {
            return Outcome::forward(&deleted);
        }
        self.repo.deleted.lock().unwrap().push(account_id);
        Outcome::success_with((), StatusClass::NoContent)
    }
}

// ---- Identity 模块（消费方）----

struct FailingAccountDeletion;

#[async_trait]
impl VoidHandler<DeleteAdminAccount> for FailingAccountDeletion {
    async fn handle(&self, _ctx: &DispatchContext, _ev: &DeleteAdminAccount) -> VoidOutcome {
        Outcome::failure("Delete failed")
    }
}

struct AccountDeletion {
    removed: Arc<AtomicUsize>,
}

#[async_trait]
impl VoidHandler<DeleteAdminAccount> for AccountDeletion {
    async fn handle(&self, _ctx: &DispatchContext, _ev: &DeleteAdminAccount) -> VoidOutcome {
        self.removed.fetch_add(1, Ordering::SeqCst);
        Outcome::success(())
    }
}

struct AccountCreation {
    account_id: Uuid,
}

#[async_trait]
impl ResultHandler<CreateAdmin, Uuid> for AccountCreation {
    async fn handle(&self, _ctx: &DispatchContext, _ev: CreateAdmin) -> Outcome<Uuid> {
        Outcome::success(self.account_id)
    }
}

fn admin_service(bus: Arc<InMemoryEventBus>) -> AdminService<Arc<InMemoryEventBus>> {
    AdminService {
        bus,
        repo: Arc::new(AdminRepository::default()),
    }
}

#[tokio::test]
async fn delete_returns_failure_when_delete_account_event_fails() {
    let bus = Arc::new(InMemoryEventBus::default());
    bus.register_void_handler::<DeleteAdminAccount, _>(Arc::new(FailingAccountDeletion))
        .unwrap();
    let service = admin_service(bus);

    let out = service
        .delete(&DispatchContext::default(), Uuid::new_v4())
        .await;

    assert!(out.is_failure());
    assert_eq!(out.error_message(), Some("Delete failed"));
    assert_eq!(out.status(), StatusClass::BadRequest);
    assert!(service.repo.deleted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_proceeds_when_identity_confirms() {
    let bus = Arc::new(InMemoryEventBus::default());
    let removed = Arc::new(AtomicUsize::new(0));
    bus.register_void_handler::<DeleteAdminAccount, _>(Arc::new(AccountDeletion {
        removed: removed.clone(),
    }))
    .unwrap();
    let service = admin_service(bus);
    let id = Uuid::new_v4();

    let out = service.delete(&DispatchContext::default(), id).await;

    assert_eq!(out.status(), StatusClass::NoContent);
    assert_eq!(removed.load(Ordering::SeqCst), 1);
    assert_eq!(*service.repo.deleted.lock().unwrap(), vec![id]);
}

#[tokio::test]
async fn create_returns_the_exact_account_id() {
    let account_id = Uuid::new_v4();
    let bus = Arc::new(InMemoryEventBus::default());
    bus.register_result_handler::<CreateAdmin, Uuid, _>(Arc::new(AccountCreation { account_id }))
        .unwrap();
    let service = admin_service(bus);

    let out = service
        .create(&DispatchContext::default(), "root@example.com")
        .await;

    assert_eq!(out, Outcome::created(account_id));
}

#[tokio::test]
async fn create_without_identity_handler_is_a_configuration_error() {
    let service = admin_service(Arc::new(InMemoryEventBus::default()));

    let out = service
        .create(&DispatchContext::default(), "root@example.com")
        .await;

    let fault = out.fault().unwrap();
    assert!(fault.is_configuration());
    assert_eq!(fault.status(), StatusClass::InternalError);
}

// ---- 作用域隔离 ----

struct UnitOfWork;

#[integration_event]
struct CheckCustomerExistsForAddingReview {
    customer_id: Uuid,
}

struct CustomerLookup {
    uow: Arc<UnitOfWork>,
    seen: Arc<Mutex<Option<Arc<UnitOfWork>>>>,
}

#[async_trait]
impl VoidHandler<CheckCustomerExistsForAddingReview> for CustomerLookup {
    async fn handle(
        &self,
        _ctx: &DispatchContext,
        _ev: &CheckCustomerExistsForAddingReview,
    ) -> VoidOutcome {
        *self.seen.lock().unwrap() = Some(self.uow.clone());
        Outcome::success(())
    }
}

#[tokio::test]
async fn handler_scope_is_isolated_from_the_callers_scope() {
    let mut services = ServiceProvider::builder();
    services.add_scoped(|_| Ok(UnitOfWork));
    let provider = services.build();

    let bus = InMemoryEventBus::new(Arc::new(provider.clone()));
    let seen = Arc::new(Mutex::new(None));
    {
        let seen = seen.clone();
        bus.register_void::<CheckCustomerExistsForAddingReview, _, _>(move |scope| {
            Ok(CustomerLookup {
                uow: scope.resolve::<UnitOfWork>()?,
                seen: seen.clone(),
            })
        })
        .unwrap();
    }

    // 调用方（Catalog 请求）自身的作用域与工作单元
    let ambient = provider.create_scope();
    let callers_uow = ambient.resolve::<UnitOfWork>().unwrap();

    let out = bus
        .publish_void(
            &DispatchContext::default(),
            CheckCustomerExistsForAddingReview {
                customer_id: Uuid::new_v4(),
            },
        )
        .await;
    assert!(out.is_success());

    let handlers_uow = seen.lock().unwrap().clone().unwrap();
    assert!(!Arc::ptr_eq(&callers_uow, &handlers_uow));
    assert!(Arc::ptr_eq(
        &callers_uow,
        &ambient.resolve::<UnitOfWork>().unwrap()
    ));
}

// ---- 顺序与短路 ----

#[integration_event]
struct ProductMediaAdded {
    product_id: Uuid,
    url: String,
}

struct Step {
    name: &'static str,
    log: StepLog,
    outcome: VoidOutcome,
}

#[async_trait]
impl VoidHandler<ProductMediaAdded> for Step {
    async fn handle(&self, _ctx: &DispatchContext, _ev: &ProductMediaAdded) -> VoidOutcome {
        self.log.lock().unwrap().push(self.name);
        self.outcome.clone()
    }
}

type StepLog = Arc<Mutex<Vec<&'static str>>>;

fn media_bus(steps: &[(&'static str, VoidOutcome)]) -> (InMemoryEventBus, StepLog) {
    let bus = InMemoryEventBus::default();
    let log = Arc::new(Mutex::new(Vec::new()));
    for (name, outcome) in steps {
        bus.register_void_handler::<ProductMediaAdded, _>(Arc::new(Step {
            name: *name,
            log: log.clone(),
            outcome: outcome.clone(),
        }))
        .unwrap();
    }
    (bus, log)
}

fn media_added() -> ProductMediaAdded {
    ProductMediaAdded {
        product_id: Uuid::new_v4(),
        url: "https://cdn.example.com/p.png".into(),
    }
}

#[tokio::test]
async fn failing_middle_handler_stops_the_chain() {
    let conflict: VoidOutcome = Outcome::failure_with("media already attached", StatusClass::Conflict);
    let (bus, log) = media_bus(&[
        ("h1", Outcome::success(())),
        ("h2", conflict.clone()),
        ("h3", Outcome::success(())),
    ]);

    let out = bus
        .publish_void(&DispatchContext::default(), media_added())
        .await;

    assert_eq!(out, conflict);
    assert_eq!(*log.lock().unwrap(), vec!["h1", "h2"]);
}

#[tokio::test]
async fn successful_handlers_observe_registration_order() {
    let (bus, log) = media_bus(&[("h1", Outcome::success(())), ("h2", Outcome::success(()))]);

    let out = bus
        .publish_void(&DispatchContext::default(), media_added())
        .await;

    assert!(out.is_success());
    assert_eq!(*log.lock().unwrap(), vec!["h1", "h2"]);
}

#[tokio::test]
async fn no_handlers_is_vacuous_success() {
    let (bus, log) = media_bus(&[]);

    let out = bus
        .publish_void(&DispatchContext::default(), media_added())
        .await;

    assert_eq!(out, VoidOutcome::success(()));
    assert!(log.lock().unwrap().is_empty());
}

// ---- 转发保真 ----

#[tokio::test]
async fn forwarded_failures_survive_every_hop() {
    let statuses = [
        StatusClass::BadRequest,
        StatusClass::NotFound,
        StatusClass::Conflict,
        StatusClass::Forbidden,
        StatusClass::InternalError,
    ];

    for status in statuses {
        let origin: VoidOutcome = Outcome::failure_with(format!("failed with {status}"), status);
        let as_id: Outcome<Uuid> = Outcome::forward(&origin);
        let as_text: Outcome<String> = Outcome::forward(&as_id);
        let back: VoidOutcome = Outcome::forward(&as_text);

        assert_eq!(as_id.error_message(), origin.error_message());
        assert_eq!(as_text.status(), origin.status());
        assert_eq!(back, origin);
    }
}
