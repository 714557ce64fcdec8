//! 集成事件相关过程宏（modulith-macros）
//!
use proc_macro::TokenStream;

mod derive_utils;
mod integration_event;

/// 集成事件宏
/// - 用于跨模块请求的数据记录，例如 `struct DeleteAdminAccount { account_id: Uuid }`
/// - 追加派生 `Debug, Clone, PartialEq`（与已有 derive 合并去重）
/// - 实现 `::modulith_core::integration_event::IntegrationEvent`
/// - 支持参数：`#[integration_event(name = "...")]` 覆写事件名称（默认类型名），
///   `#[integration_event(debug = false)]` 关闭 `Debug` 派生
#[proc_macro_attribute]
pub fn integration_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    integration_event::expand(attr, item)
}
