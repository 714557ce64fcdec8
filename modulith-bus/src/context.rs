use modulith_core::BusinessContext;
use tokio_util::sync::CancellationToken;

/// 分发上下文（Dispatch Context）
///
/// 承载一次跨模块分发所需的横切信息：
/// - 业务语境（`BusinessContext`）：关联追踪 `correlation_id`、发起模块、执行者等；
/// - 取消令牌（`cancellation`）：由生产方贯穿分发器传递给每个处理器，
///   协作式取消由处理器自身的 I/O 负责，分发器不附加任何超时。
///
/// 典型用法：
/// ```rust
/// use modulith_bus::context::DispatchContext;
/// use modulith_core::BusinessContext;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let ctx = DispatchContext::new(token.child_token()).with_biz(
///     BusinessContext::builder()
///         .correlation_id("cor-123".into())
///         .source_module("catalog".into())
///         .build(),
/// );
/// assert!(!ctx.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DispatchContext {
    /// 业务语境（链路追踪、审计主体、发起模块）
    pub biz: BusinessContext,
    /// 贯穿整条调用链的取消令牌
    pub cancellation: CancellationToken,
}

impl DispatchContext {
    pub fn new(cancellation: CancellationToken) -> Self {
        Self {
            biz: BusinessContext::default(),
            cancellation,
        }
    }

    pub fn with_biz(mut self, biz: BusinessContext) -> Self {
        self.biz = biz;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
