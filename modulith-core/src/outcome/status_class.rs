use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 结果状态分类
///
/// 与每个结果一同携带，使失败在跨越模块边界后仍保留足够信息，
/// 由（外部的）HTTP 边界渲染为相应响应；分发器与处理器无需感知 HTTP。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Ok,
    Created,
    Accepted,
    NoContent,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    InternalError,
}

impl StatusClass {
    /// 是否属于成功分类
    pub const fn is_success(self) -> bool {
        matches!(
            self,
            Self::Ok | Self::Created | Self::Accepted | Self::NoContent
        )
    }

    /// 对应的 HTTP 状态码
    ///
    /// 穷尽匹配：新增分类而未补充映射时无法通过编译。
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::Accepted => 202,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::UnprocessableEntity => 422,
            Self::InternalError => 500,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Created => "created",
            Self::Accepted => "accepted",
            Self::NoContent => "no_content",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.http_status(), self.as_str())
    }
}

impl TryFrom<u16> for StatusClass {
    type Error = CoreError;

    /// 反向映射：不在映射表内的状态码直接报错，而不是回落到默认分类
    fn try_from(code: u16) -> Result<Self, Self::Error> {
        let status = match code {
            200 => Self::Ok,
            201 => Self::Created,
            202 => Self::Accepted,
            204 => Self::NoContent,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::UnprocessableEntity,
            500 => Self::InternalError,
            other => return Err(CoreError::UnmappedStatusCode(other)),
        };
        Ok(status)
    }
}
