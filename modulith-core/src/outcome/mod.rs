//! 结果协议（Outcome）
//!
//! 所有跨模块边界、可能以“预期方式”失败的操作统一返回 `Outcome<T>`：
//! - 成功：携带值与成功分类（`Ok` / `Created` ...）；
//! - 失败：携带 [`Fault`]（消息 + 分类 + 来源）。
//!
//! 失败通过 [`Outcome::forward`] 在各层之间原样转发，直至 HTTP 边界，
//! 期间不重新分类、不丢失信息。
//!
mod fault;
mod status_class;

pub use fault::{Fault, FaultKind};
pub use status_class::StatusClass;

use serde::{Deserialize, Serialize};

/// 无返回值的结果（仅表达成功/失败）
pub type VoidOutcome = Outcome<()>;

/// 带状态分类的成功/失败结果
///
/// 以枚举表达，`成功 ⇔ 有值且无错误消息` 由构造保证。
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { value: T, status: StatusClass },
    Failure(Fault),
}

impl<T> Outcome<T> {
    /// 成功，分类 `Ok`
    pub fn success(value: T) -> Self {
        Self::success_with(value, StatusClass::Ok)
    }

    /// 成功，分类 `Created`
    pub fn created(value: T) -> Self {
        Self::success_with(value, StatusClass::Created)
    }

    pub fn success_with(value: T, status: StatusClass) -> Self {
        Self::Success { value, status }
    }

    /// 失败，分类 `BadRequest`
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(Fault::new(message))
    }

    pub fn failure_with(message: impl Into<String>, status: StatusClass) -> Self {
        Self::Failure(Fault::with_status(message, status))
    }

    /// 转发构造：从任意值类型的失败结果复制消息、分类与来源
    ///
    /// # Panics
    ///
    /// `other` 为成功结果时 panic（编程错误，而非运行期失败路径）。
    pub fn forward<U>(other: &Outcome<U>) -> Self {
        match other {
            Outcome::Failure(fault) => Self::Failure(fault.clone()),
            Outcome::Success { status, .. } => {
                panic!("cannot forward a successful outcome ({status}) as a failure")
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn status(&self) -> StatusClass {
        match self {
            Self::Success { status, .. } => *status,
            Self::Failure(fault) => fault.status(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.fault().map(Fault::message)
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(fault) => Some(fault),
        }
    }

    /// 成功值
    ///
    /// # Panics
    ///
    /// 在失败结果上访问值属于编程错误。需要分支处理时使用 [`Outcome::try_value`]。
    pub fn value(&self) -> &T {
        match self {
            Self::Success { value, .. } => value,
            Self::Failure(fault) => panic!("value accessed on failed outcome: {fault}"),
        }
    }

    pub fn try_value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// # Panics
    ///
    /// 同 [`Outcome::value`]。
    pub fn into_value(self) -> T {
        match self {
            Self::Success { value, .. } => value,
            Self::Failure(fault) => panic!("value accessed on failed outcome: {fault}"),
        }
    }

    /// 转为标准 `Result`，便于在内部逻辑中使用 `?`
    pub fn into_result(self) -> Result<T, Fault> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure(fault) => Err(fault),
        }
    }

    /// 组合子：成功调用 `on_success(value)`，失败调用 `on_failure(fault)`
    pub fn map<R>(self, on_success: impl FnOnce(T) -> R, on_failure: impl FnOnce(Fault) -> R) -> R {
        match self {
            Self::Success { value, .. } => on_success(value),
            Self::Failure(fault) => on_failure(fault),
        }
    }

    /// 串联另一个可能失败的操作；失败原样转发
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success { value, .. } => f(value),
            Self::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// 变换成功值，保留分类
    pub fn map_value<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success { value, status } => Outcome::Success {
                value: f(value),
                status,
            },
            Self::Failure(fault) => Outcome::Failure(fault),
        }
    }
}

impl<T> From<Fault> for Outcome<T> {
    fn from(fault: Fault) -> Self {
        Self::Failure(fault)
    }
}

impl<T> From<Result<T, Fault>> for Outcome<T> {
    fn from(result: Result<T, Fault>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(fault) => Self::Failure(fault),
        }
    }
}
