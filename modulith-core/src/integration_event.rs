//! 集成事件（Integration Event）
//!
//! 跨模块请求的纯数据载体：不可变、无标识、无行为，每个用例一个具体类型。
//! 命名约定为从生产方视角出发的陈述式事实，例如
//! `CheckCustomerExistsForAddingReview`、`ProductMediaAdded`。
//!
//! 两种约定用法（不区分为不同类型）：
//! - 无返回事件：由零或多个处理器确认存在性/有效性；
//! - 结果事件：由唯一处理器计算并返回值（如新建记录的 ID）。

/// 集成事件标记 trait
///
/// 可使用 `#[integration_event]` 宏自动实现。
pub trait IntegrationEvent: Send + Sync + 'static {
    /// 事件的稳定名称，用于日志与诊断；避免依赖 `type_name::<T>()`
    const NAME: &'static str;

    fn event_name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modulith_macros::integration_event;

    struct CategoryAndProductsDeleted {
        #[allow(dead_code)]
        category_id: u64,
    }

    impl IntegrationEvent for CategoryAndProductsDeleted {
        const NAME: &'static str = "CategoryAndProductsDeleted";
    }

    #[integration_event]
    struct ProductMediaAdded {
        product_id: u64,
    }

    #[test]
    fn event_name_defaults_to_const() {
        let ev = CategoryAndProductsDeleted { category_id: 3 };
        assert_eq!(ev.event_name(), "CategoryAndProductsDeleted");
    }

    #[test]
    fn macro_resolves_inside_this_crate() {
        let ev = ProductMediaAdded { product_id: 1 };
        assert_eq!(ev.event_name(), "ProductMediaAdded");
        assert_eq!(ev.clone(), ev);
        assert_eq!(ev.product_id, 1);
    }
}
