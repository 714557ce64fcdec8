//! 模块化单体的跨模块集成核心（modulith-core）
//!
//! 定义各有界上下文模块之间共享的最小契约：
//! - 结果协议（`outcome`）：`Outcome<T>` / `VoidOutcome`，携带状态分类的成功/失败值；
//! - 集成事件（`integration_event`）：跨模块请求的不可变数据载体；
//! - 业务上下文（`business_context`）：关联追踪、发起模块与执行主体。
//!
//! 本 crate 不包含分发实现，仅定义协议，
//! 以便各模块只依赖契约而不依赖彼此的内部实现。
//!
pub mod business_context;
pub mod error;
pub mod integration_event;
pub mod outcome;

pub use business_context::BusinessContext;
pub use integration_event::IntegrationEvent;
pub use outcome::{Fault, FaultKind, Outcome, StatusClass, VoidOutcome};

// 允许在本 crate 内部通过 ::modulith_core 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::modulith_core 路径。
extern crate self as modulith_core;
