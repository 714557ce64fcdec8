use modulith_core::integration_event::IntegrationEvent;
use modulith_macros::integration_event;

#[integration_event(debug = false)]
struct SellerEligibilityChecked {
    seller_id: u64,
}

impl std::fmt::Debug for SellerEligibilityChecked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SellerEligibilityChecked(..)")
    }
}

fn main() {
    // 手写 Debug 可编译即说明未自动派生 Debug
    let ev = SellerEligibilityChecked { seller_id: 1 };
    let _ = format!("{:?}", ev);
    let _ = ev.seller_id;
    assert_eq!(SellerEligibilityChecked::NAME, "SellerEligibilityChecked");
}
