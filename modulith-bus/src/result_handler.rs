use crate::context::DispatchContext;
use async_trait::async_trait;
use modulith_core::{IntegrationEvent, Outcome};
use std::sync::Arc;

/// 结果事件处理器
///
/// 生产方需要取回数据时使用（如新建记录的 ID、查询到的资料）。
/// 每个 (事件, 结果) 组合必须恰好注册一个。
#[async_trait]
pub trait ResultHandler<E, R>: Send + Sync
where
    E: IntegrationEvent,
    R: Send + 'static,
{
    async fn handle(&self, ctx: &DispatchContext, event: E) -> Outcome<R>;
}

#[async_trait]
impl<E, R, H> ResultHandler<E, R> for Arc<H>
where
    E: IntegrationEvent,
    R: Send + 'static,
    H: ResultHandler<E, R> + ?Sized,
{
    async fn handle(&self, ctx: &DispatchContext, event: E) -> Outcome<R> {
        (**self).handle(ctx, event).await
    }
}
