use crate::context::DispatchContext;
use async_trait::async_trait;
use modulith_core::{IntegrationEvent, Outcome, VoidOutcome};
use std::sync::Arc;

/// 事件总线（Event Bus）
///
/// - 负责根据事件的具体类型路由到对应的处理器，并聚合/转发其结果；
/// - 每次分发创建独立的解析作用域，同步等待处理器完成，不排队、不重试；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
#[async_trait]
pub trait EventBus: Send + Sync {
    /// 分发无返回事件
    ///
    /// 按注册顺序依次调用全部处理器，首个失败即短路并原样返回；
    /// 未注册任何处理器视为成功。
    async fn publish_void<E>(&self, ctx: &DispatchContext, event: E) -> VoidOutcome
    where
        E: IntegrationEvent;

    /// 分发结果事件
    ///
    /// 恰好调用一个处理器并原样返回其结果；未注册（或重复注册）时返回配置错误。
    async fn publish_single_result<E, R>(&self, ctx: &DispatchContext, event: E) -> Outcome<R>
    where
        E: IntegrationEvent,
        R: Send + 'static;
}

#[async_trait]
impl<B> EventBus for Arc<B>
where
    B: EventBus,
{
    async fn publish_void<E>(&self, ctx: &DispatchContext, event: E) -> VoidOutcome
    where
        E: IntegrationEvent,
    {
        (**self).publish_void(ctx, event).await
    }

    async fn publish_single_result<E, R>(&self, ctx: &DispatchContext, event: E) -> Outcome<R>
    where
        E: IntegrationEvent,
        R: Send + 'static,
    {
        (**self).publish_single_result::<E, R>(ctx, event).await
    }
}
