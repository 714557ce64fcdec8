use modulith_core::Fault;

/// 作用域解析错误
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("service not registered: {0}")]
    NotRegistered(&'static str),

    #[error("service type mismatch: expected={expected}")]
    TypeMismatch { expected: &'static str },

    #[error("circular scoped dependency: {0}")]
    Cycle(&'static str),

    #[error("service construction failed: service={service}, reason={reason}")]
    Construction {
        service: &'static str,
        reason: String,
    },
}

/// 事件总线错误：均属于配置错误，而非业务失败
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("handler not found: event={event}, result={result}")]
    HandlerNotFound {
        event: &'static str,
        result: &'static str,
    },

    #[error("ambiguous handlers: event={event}, result={result}, count={count}")]
    AmbiguousHandlers {
        event: &'static str,
        result: &'static str,
        count: usize,
    },

    #[error("handler already registered: event={event}, result={result}")]
    AlreadyRegistered {
        event: &'static str,
        result: &'static str,
    },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("event registered with both void and result handlers: event={event}")]
    HandlerKindConflict { event: &'static str },

    #[error("scope: {0}")]
    Scope(#[from] ScopeError),
}

// 配置错误以 InternalError + FaultKind::Configuration 的失败结果呈现，
// 调用方据此区分基础设施误配置与面向用户的校验失败
impl From<BusError> for Fault {
    fn from(err: BusError) -> Self {
        Fault::configuration(err.to_string())
    }
}

impl From<ScopeError> for Fault {
    fn from(err: ScopeError) -> Self {
        BusError::from(err).into()
    }
}
