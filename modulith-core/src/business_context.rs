use bon::Builder;
use serde::{Deserialize, Serialize};

/// 业务上下文信息
///
/// 随一次跨模块分发携带，供处理器做审计与链路关联，不参与路由。
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContext {
    /// 关联ID
    correlation_id: Option<String>,
    /// 因果ID
    causation_id: Option<String>,
    /// 发起分发的模块（如 admin、catalog）
    source_module: Option<String>,
    /// 触发请求的主体类型（如用户、系统等）
    actor_type: Option<String>,
    /// 触发请求的主体ID
    actor_id: Option<String>,
}

impl BusinessContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn source_module(&self) -> Option<&str> {
        self.source_module.as_deref()
    }

    pub fn actor_type(&self) -> Option<&str> {
        self.actor_type.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }
}
