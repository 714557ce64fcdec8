use crate::context::DispatchContext;
use async_trait::async_trait;
use modulith_core::{IntegrationEvent, VoidOutcome};
use std::sync::Arc;

/// 无返回事件处理器
///
/// 用于校验/副作用类事件，仅返回成功或失败。同一事件可注册多个，按注册顺序依次执行，
/// 任一失败即短路。
#[async_trait]
pub trait VoidHandler<E>: Send + Sync
where
    E: IntegrationEvent,
{
    async fn handle(&self, ctx: &DispatchContext, event: &E) -> VoidOutcome;
}

#[async_trait]
impl<E, H> VoidHandler<E> for Arc<H>
where
    E: IntegrationEvent,
    H: VoidHandler<E> + ?Sized,
{
    async fn handle(&self, ctx: &DispatchContext, event: &E) -> VoidOutcome {
        (**self).handle(ctx, event).await
    }
}
