//! 跨模块集成分发（modulith-bus）
//!
//! 进程内、同步等待的发布/处理机制：
//! - `EventBus`：两种分发模式（无返回 / 单结果）；
//! - `VoidHandler` / `ResultHandler`：消费方模块实现的处理能力；
//! - `scope`：每次分发新建的隔离解析作用域；
//! - `InMemoryEventBus`：基于 TypeId 注册表的默认实现。
//!
pub mod config;
pub mod context;
pub mod error;
pub mod event_bus;
pub mod inmemory_event_bus;
pub mod result_handler;
pub mod scope;
pub mod void_handler;

pub use config::EventBusConfig;
pub use context::DispatchContext;
pub use error::{BusError, ScopeError};
pub use event_bus::EventBus;
pub use inmemory_event_bus::InMemoryEventBus;
pub use result_handler::ResultHandler;
pub use scope::{EmptyScopeFactory, Scope, ScopeFactory, ServiceCollection, ServiceProvider};
pub use void_handler::VoidHandler;
