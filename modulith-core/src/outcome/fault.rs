use super::StatusClass;
use serde::{Deserialize, Serialize};

/// 失败来源
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// 处理器/领域逻辑判定请求无效（不存在、冲突、参数错误等）
    #[default]
    Reported,
    /// 基础设施配置错误（未注册处理器、重复注册、作用域缺少服务等），
    /// 与面向用户的业务失败区分开
    Configuration,
}

/// 失败信息：错误消息 + 状态分类 + 来源
///
/// 转发时三者逐字复制，不做重新分类。
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} ({status})")]
pub struct Fault {
    message: String,
    status: StatusClass,
    #[serde(default)]
    kind: FaultKind,
}

impl Fault {
    /// 业务失败，默认 `BadRequest`
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_status(message, StatusClass::BadRequest)
    }

    pub fn with_status(message: impl Into<String>, status: StatusClass) -> Self {
        Self {
            message: message.into(),
            status,
            kind: FaultKind::Reported,
        }
    }

    /// 配置错误，固定为 `InternalError`
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusClass::InternalError,
            kind: FaultKind::Configuration,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusClass {
        self.status
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == FaultKind::Configuration
    }
}
