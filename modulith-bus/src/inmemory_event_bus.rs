use crate::{
    config::EventBusConfig,
    context::DispatchContext,
    error::{BusError, ScopeError},
    event_bus::EventBus,
    result_handler::ResultHandler,
    scope::{EmptyScopeFactory, Scope, ScopeFactory},
    void_handler::VoidHandler,
};
use async_trait::async_trait;
use dashmap::DashMap;
use modulith_core::{Fault, IntegrationEvent, Outcome, VoidOutcome};
use std::any::{Any, TypeId, type_name};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

type AnyEvent = dyn Any + Send + Sync;

type BoxAnySend = Box<dyn Any + Send>;

type VoidHandlerFuture<'a> = Pin<Box<dyn Future<Output = VoidOutcome> + Send + 'a>>;

type VoidHandlerFn = Arc<
    dyn for<'a> Fn(&'a Scope, &'a DispatchContext, &'a AnyEvent) -> VoidHandlerFuture<'a>
        + Send
        + Sync,
>;

type ResultHandlerFuture<'a> = Pin<Box<dyn Future<Output = BoxAnySend> + Send + 'a>>;

type ResultHandlerFn = Arc<
    dyn for<'a> Fn(&'a Scope, &'a DispatchContext, BoxAnySend) -> ResultHandlerFuture<'a>
        + Send
        + Sync,
>;

#[derive(Clone)]
struct Registration<F> {
    handler: &'static str,
    f: F,
}

struct Chain<F> {
    event: &'static str,
    result: &'static str,
    handlers: Vec<Registration<F>>,
}

/// 基于内存的 EventBus 实现
/// - 通过 TypeId 注册事件对应的处理器：无返回事件键为事件类型，结果事件键为 (事件类型, 结果类型)
/// - 运行时以类型擦除（Any）方式调度，并在调用端进行结果还原
/// - 处理器通过工厂从每次分发新建的作用域中构造，取得本模块独立的作用域资源
pub struct InMemoryEventBus {
    scopes: Arc<dyn ScopeFactory>,
    config: EventBusConfig,
    void_handlers: DashMap<TypeId, Chain<VoidHandlerFn>>,
    result_handlers: DashMap<(TypeId, TypeId), Chain<ResultHandlerFn>>,
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new(Arc::new(EmptyScopeFactory))
    }
}

impl InMemoryEventBus {
    pub fn new(scopes: Arc<dyn ScopeFactory>) -> Self {
        Self {
            scopes,
            config: EventBusConfig::default(),
            void_handlers: DashMap::new(),
            result_handlers: DashMap::new(),
        }
    }

    pub fn with_config(mut self, config: EventBusConfig) -> Self {
        self.config = config;
        self
    }

    /// 注册无返回事件处理器（由分发作用域构造）
    ///
    /// 同一事件可多次注册，分发时按注册顺序执行。
    /// 事件已注册过结果处理器时返回 [`BusError::HandlerKindConflict`]。
    pub fn register_void<E, H, F>(&self, factory: F) -> Result<(), BusError>
    where
        E: IntegrationEvent,
        H: VoidHandler<E> + 'static,
        F: Fn(&Scope) -> Result<H, ScopeError> + Send + Sync + 'static,
    {
        let event_id = TypeId::of::<E>();
        if self.result_handlers.iter().any(|e| e.key().0 == event_id) {
            return Err(BusError::HandlerKindConflict { event: E::NAME });
        }

        let f: VoidHandlerFn = Arc::new(move |scope, ctx, event| {
            let handler = factory(scope);

            Box::pin(async move {
                let handler = match handler {
                    Ok(h) => h,
                    Err(e) => return VoidOutcome::from(Fault::from(e)),
                };

                // 正常情况下这里的 downcast 永远不会失败（键与闭包同一泛型 E）
                match event.downcast_ref::<E>() {
                    Some(ev) => handler.handle(ctx, ev).await,
                    None => VoidOutcome::from(Fault::from(BusError::TypeMismatch {
                        expected: E::NAME,
                        found: "unknown",
                    })),
                }
            })
        });

        self.void_handlers
            .entry(event_id)
            .or_insert_with(|| Chain {
                event: E::NAME,
                result: type_name::<()>(),
                handlers: Vec::new(),
            })
            .handlers
            .push(Registration {
                handler: type_name::<H>(),
                f,
            });

        Ok(())
    }

    /// 注册无返回事件处理器（共享实例）
    pub fn register_void_handler<E, H>(&self, handler: Arc<H>) -> Result<(), BusError>
    where
        E: IntegrationEvent,
        H: VoidHandler<E> + 'static,
    {
        self.register_void::<E, Arc<H>, _>(move |_| Ok(handler.clone()))
    }

    /// 注册结果事件处理器（由分发作用域构造）
    ///
    /// 默认拒绝同一 (事件, 结果) 的重复注册；配置关闭后重复注册会在分发时以配置错误返回。
    /// 事件已注册过无返回处理器时返回 [`BusError::HandlerKindConflict`]。
    pub fn register_result<E, R, H, F>(&self, factory: F) -> Result<(), BusError>
    where
        E: IntegrationEvent,
        R: Send + 'static,
        H: ResultHandler<E, R> + 'static,
        F: Fn(&Scope) -> Result<H, ScopeError> + Send + Sync + 'static,
    {
        if self.void_handlers.contains_key(&TypeId::of::<E>()) {
            return Err(BusError::HandlerKindConflict { event: E::NAME });
        }

        let f: ResultHandlerFn = Arc::new(move |scope, ctx, boxed_event| {
            let handler = factory(scope);

            Box::pin(async move {
                let out: Outcome<R> = match (handler, boxed_event.downcast::<E>()) {
                    (Err(e), _) => Fault::from(e).into(),
                    (Ok(h), Ok(ev)) => h.handle(ctx, *ev).await,
                    (Ok(_), Err(_)) => Fault::from(BusError::TypeMismatch {
                        expected: E::NAME,
                        found: "unknown",
                    })
                    .into(),
                };
                Box::new(out) as BoxAnySend
            })
        });

        let key = (TypeId::of::<E>(), TypeId::of::<R>());
        let mut chain = self.result_handlers.entry(key).or_insert_with(|| Chain {
            event: E::NAME,
            result: type_name::<R>(),
            handlers: Vec::new(),
        });

        if self.config.reject_duplicate_result_handlers && !chain.handlers.is_empty() {
            return Err(BusError::AlreadyRegistered {
                event: E::NAME,
                result: type_name::<R>(),
            });
        }

        chain.handlers.push(Registration {
            handler: type_name::<H>(),
            f,
        });

        Ok(())
    }

    /// 注册结果事件处理器（共享实例）
    pub fn register_result_handler<E, R, H>(&self, handler: Arc<H>) -> Result<(), BusError>
    where
        E: IntegrationEvent,
        R: Send + 'static,
        H: ResultHandler<E, R> + 'static,
    {
        self.register_result::<E, R, Arc<H>, _>(move |_| Ok(handler.clone()))
    }

    // 复制出处理器链，避免跨 await 持有 DashMap 的锁
    fn void_chain<E: IntegrationEvent>(&self) -> Vec<Registration<VoidHandlerFn>> {
        self.void_handlers
            .get(&TypeId::of::<E>())
            .map(|c| c.handlers.clone())
            .unwrap_or_default()
    }

    fn result_chain<E, R>(&self) -> Vec<Registration<ResultHandlerFn>>
    where
        E: IntegrationEvent,
        R: Send + 'static,
    {
        self.result_handlers
            .get(&(TypeId::of::<E>(), TypeId::of::<R>()))
            .map(|c| c.handlers.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish_void<E>(&self, ctx: &DispatchContext, event: E) -> VoidOutcome
    where
        E: IntegrationEvent,
    {
        let scope = self.scopes.create_scope();
        let handlers = self.void_chain::<E>();
        debug!(
            event = E::NAME,
            handlers = handlers.len(),
            scope = scope.id(),
            "dispatching void event"
        );

        let payload: &AnyEvent = &event;
        for (index, reg) in handlers.iter().enumerate() {
            let out = (reg.f)(&scope, ctx, payload).await;
            if out.is_failure() {
                debug!(
                    event = E::NAME,
                    handler = reg.handler,
                    index,
                    status = %out.status(),
                    "void event chain short-circuited"
                );
                return VoidOutcome::forward(&out);
            }
        }

        VoidOutcome::success(())
    }

    async fn publish_single_result<E, R>(&self, ctx: &DispatchContext, event: E) -> Outcome<R>
    where
        E: IntegrationEvent,
        R: Send + 'static,
    {
        let scope = self.scopes.create_scope();
        let handlers = self.result_chain::<E, R>();
        debug!(
            event = E::NAME,
            result = type_name::<R>(),
            handlers = handlers.len(),
            scope = scope.id(),
            "dispatching result event"
        );

        let reg = match handlers.as_slice() {
            [only] => only,
            [] => {
                return Fault::from(BusError::HandlerNotFound {
                    event: E::NAME,
                    result: type_name::<R>(),
                })
                .into();
            }
            many => {
                return Fault::from(BusError::AmbiguousHandlers {
                    event: E::NAME,
                    result: type_name::<R>(),
                    count: many.len(),
                })
                .into();
            }
        };

        let out = (reg.f)(&scope, ctx, Box::new(event)).await;

        match out.downcast::<Outcome<R>>() {
            Ok(out) => *out,
            Err(_) => Fault::from(BusError::TypeMismatch {
                expected: type_name::<Outcome<R>>(),
                found: "unknown",
            })
            .into(),
        }
    }
}

impl InMemoryEventBus {
    /// 获取已注册的无返回事件名列表（只读视图）
    pub fn registered_void_events(&self) -> Vec<&'static str> {
        self.void_handlers.iter().map(|e| e.value().event).collect()
    }

    /// 获取已注册的结果事件 (事件名, 结果类型名) 列表（只读视图）
    pub fn registered_result_events(&self) -> Vec<(&'static str, &'static str)> {
        self.result_handlers
            .iter()
            .map(|e| (e.value().event, e.value().result))
            .collect()
    }

    /// 某个无返回事件已注册的处理器数量
    pub fn void_handler_count<E: IntegrationEvent>(&self) -> usize {
        self.void_handlers
            .get(&TypeId::of::<E>())
            .map(|c| c.handlers.len())
            .unwrap_or(0)
    }
}
