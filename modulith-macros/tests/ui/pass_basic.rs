use modulith_core::integration_event::IntegrationEvent;
use modulith_macros::integration_event;
use uuid::Uuid;

#[integration_event]
struct CheckCustomerExistsForAddingReview {
    customer_id: Uuid,
}

#[integration_event(name = "catalog.category_and_products_deleted")]
struct CategoryAndProductsDeleted(Uuid);

#[integration_event]
#[derive(Clone, Eq)]
struct ProductMediaAdded {
    product_id: Uuid,
    media_url: String,
}

#[integration_event]
struct PingModules;

fn main() {
    let ev = CheckCustomerExistsForAddingReview {
        customer_id: Uuid::new_v4(),
    };
    // 默认派生 Debug / Clone / PartialEq
    let _ = format!("{:?}", ev);
    assert!(ev.clone() == ev);
    assert_eq!(CheckCustomerExistsForAddingReview::NAME, "CheckCustomerExistsForAddingReview");

    let deleted = CategoryAndProductsDeleted(Uuid::nil());
    assert_eq!(deleted.event_name(), "catalog.category_and_products_deleted");

    // 已有 derive 与默认派生合并去重
    let media = ProductMediaAdded {
        product_id: Uuid::nil(),
        media_url: "https://cdn.example.com/p.png".into(),
    };
    assert_eq!(media.clone(), media);

    assert_eq!(PingModules.event_name(), "PingModules");
}
