//! 模块之间共享的唯一契约：集成事件
use modulith_macros::integration_event;
use uuid::Uuid;

/// Admin → Identity：删除管理员前先删除其登录账号
#[integration_event(name = "identity.delete_admin_account")]
pub struct DeleteAdminAccount {
    pub account_id: Uuid,
}

/// Admin → Identity：创建登录账号，返回账号 ID
#[integration_event(name = "identity.create_admin")]
pub struct CreateAdmin {
    pub email: String,
}

/// Catalog → Customer：添加评价前确认顾客存在
#[integration_event(name = "customer.check_exists_for_adding_review")]
pub struct CheckCustomerExistsForAddingReview {
    pub customer_id: Uuid,
}
