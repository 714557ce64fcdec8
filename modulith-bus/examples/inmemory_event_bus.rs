use async_trait::async_trait;
use modulith_bus::{DispatchContext, EventBus, InMemoryEventBus, ResultHandler, VoidHandler};
use modulith_core::{BusinessContext, Outcome, StatusClass, VoidOutcome};
use modulith_macros::integration_event;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[integration_event]
struct CheckCategoryRegistered {
    category_id: u32,
    name: String,
}

struct CategoryRegistry;

#[async_trait]
impl VoidHandler<CheckCategoryRegistered> for CategoryRegistry {
    async fn handle(&self, _ctx: &DispatchContext, ev: &CheckCategoryRegistered) -> VoidOutcome {
        println!("CheckCategoryRegistered: id={} name={}", ev.category_id, ev.name);
        if ev.category_id == 0 {
            return Outcome::failure_with("category not registered", StatusClass::NotFound);
        }
        Outcome::success(())
    }
}

#[integration_event]
struct CreateSellerProfile {
    display_name: String,
}

struct SellerProfiles;

#[async_trait]
impl ResultHandler<CreateSellerProfile, u64> for SellerProfiles {
    async fn handle(&self, _ctx: &DispatchContext, ev: CreateSellerProfile) -> Outcome<u64> {
        println!("CreateSellerProfile: name={}", ev.display_name);
        Outcome::created(7)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus = InMemoryEventBus::default();
    bus.register_void_handler::<CheckCategoryRegistered, _>(Arc::new(CategoryRegistry))?;
    bus.register_result_handler::<CreateSellerProfile, u64, _>(Arc::new(SellerProfiles))?;

    let ctx = DispatchContext::new(CancellationToken::new()).with_biz(
        BusinessContext::builder()
            .correlation_id("cor-1".into())
            .source_module("catalog".into())
            .actor_type("user".into())
            .actor_id("u-1".into())
            .build(),
    );

    let checked = bus
        .publish_void(
            &ctx,
            CheckCategoryRegistered {
                category_id: 3,
                name: "Books".into(),
            },
        )
        .await;
    println!("registered category -> {:?}", checked.status());

    let missing = bus
        .publish_void(
            &ctx,
            CheckCategoryRegistered {
                category_id: 0,
                name: "Ghost".into(),
            },
        )
        .await;
    println!("unknown category -> {:?}", missing.fault());

    let seller_id = bus
        .publish_single_result::<_, u64>(
            &ctx,
            CreateSellerProfile {
                display_name: "Acme".into(),
            },
        )
        .await
        .into_result()?;
    println!("seller profile created: {seller_id}");

    // 未注册的结果事件 -> 返回配置错误
    #[integration_event]
    struct FetchSupportTicket {
        ticket_id: u64,
    }

    let out = bus
        .publish_single_result::<_, String>(&ctx, FetchSupportTicket { ticket_id: 1 })
        .await;
    if let Some(fault) = out.fault().filter(|f| f.is_configuration()) {
        eprintln!("configuration error as expected: {}", fault);
    }
    Ok(())
}
