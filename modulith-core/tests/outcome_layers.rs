use modulith_core::{Fault, IntegrationEvent, Outcome, StatusClass, VoidOutcome};
use modulith_macros::integration_event;

#[integration_event(name = "catalog.check_seller_eligibility")]
struct CheckSellerEligibility {
    seller_id: u64,
}

// 领域层：判定卖家资格
fn check_eligibility(ev: &CheckSellerEligibility) -> VoidOutcome {
    match ev.seller_id {
        0 => Outcome::failure_with("seller not found", StatusClass::NotFound),
        id if id % 2 == 1 => Outcome::failure_with("seller is suspended", StatusClass::Forbidden),
        _ => Outcome::success(()),
    }
}

// 应用层：失败原样转发，成功则继续
fn publish_product(ev: CheckSellerEligibility) -> Outcome<String> {
    let eligible = check_eligibility(&ev);
    if eligible.is_failure() {
        return Outcome::forward(&eligible);
    }
    Outcome::created(format!("product-of-{}", ev.seller_id))
}

// HTTP 边界：(状态码, 响应体)
fn render(out: Outcome<String>) -> (u16, String) {
    let status = out.status().http_status();
    out.map(
        |body| (status, body),
        |fault: Fault| (status, fault.message().to_string()),
    )
}

#[test]
fn failures_reach_the_boundary_unchanged() {
    assert_eq!(
        render(publish_product(CheckSellerEligibility { seller_id: 0 })),
        (404, "seller not found".to_string())
    );
    assert_eq!(
        render(publish_product(CheckSellerEligibility { seller_id: 3 })),
        (403, "seller is suspended".to_string())
    );
}

#[test]
fn success_reaches_the_boundary_with_its_status() {
    assert_eq!(
        render(publish_product(CheckSellerEligibility { seller_id: 4 })),
        (201, "product-of-4".to_string())
    );
}

#[test]
fn event_name_comes_from_the_attribute() {
    let ev = CheckSellerEligibility { seller_id: 8 };
    assert_eq!(
        CheckSellerEligibility::NAME,
        "catalog.check_seller_eligibility"
    );
    assert_eq!(ev.event_name(), CheckSellerEligibility::NAME);
    assert_eq!(ev.clone(), ev);
}
