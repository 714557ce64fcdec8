//! 核心层错误定义
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CoreError {
    /// HTTP 状态码不在 `StatusClass` 映射表内
    #[error("unmapped http status code: {0}")]
    UnmappedStatusCode(u16),
}
