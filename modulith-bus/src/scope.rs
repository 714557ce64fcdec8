//! 分发作用域（Dispatch Scope）
//!
//! 每次分发都通过注入的 [`ScopeFactory`] 创建一个全新的解析作用域：
//! - 处理器及其依赖的作用域服务（如本模块的工作单元）从该作用域解析；
//! - 调用方当前作用域内的有状态资源不会与处理器共享，保证模块隔离；
//! - 代价是不存在跨模块原子性：处理器已提交的副作用不会因调用方后续失败而回滚。
//!
//! [`ServiceProvider`] 是默认实现：单例在所有作用域间共享，作用域服务在单个作用域内
//! 惰性创建，每个作用域至多缓存一个实例（同一作用域上的并发首次解析可能各自调用一次工厂，
//! 但只保留先写入的实例）。作用域服务之间的循环依赖以 [`ScopeError::Cycle`] 返回。
//! 测试可用 [`EmptyScopeFactory`] 替代。
//!
use crate::error::ScopeError;
use dashmap::DashMap;
use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type Instance = Arc<dyn Any + Send + Sync>;

type ScopedFactoryFn = Arc<dyn Fn(&Scope) -> Result<Instance, ScopeError> + Send + Sync>;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    // 当前线程正在构造的 (作用域, 服务)；工厂同步执行，故按线程追踪即可
    static BUILDING: RefCell<Vec<(u64, TypeId)>> = const { RefCell::new(Vec::new()) };
}

/// 构造期间占位，离开作用域（含 panic 展开）时出栈
struct BuildGuard {
    key: (u64, TypeId),
}

impl BuildGuard {
    fn enter(key: (u64, TypeId)) -> Option<Self> {
        BUILDING.with(|building| {
            let mut building = building.borrow_mut();
            if building.contains(&key) {
                return None;
            }
            building.push(key);
            Some(Self { key })
        })
    }
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|building| {
            let mut building = building.borrow_mut();
            if let Some(pos) = building.iter().rposition(|k| *k == self.key) {
                building.remove(pos);
            }
        });
    }
}

/// 作用域工厂：每次分发调用一次
pub trait ScopeFactory: Send + Sync {
    fn create_scope(&self) -> Scope;
}

/// 不注册任何服务的作用域工厂
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyScopeFactory;

impl ScopeFactory for EmptyScopeFactory {
    fn create_scope(&self) -> Scope {
        Scope::empty()
    }
}

#[derive(Default)]
struct Registrations {
    singletons: HashMap<TypeId, Instance>,
    scoped: HashMap<TypeId, ScopedFactoryFn>,
}

/// 服务注册表（启动期填充，构建后只读）
#[derive(Default)]
pub struct ServiceCollection {
    regs: Registrations,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册单例：所有作用域解析到同一实例
    pub fn add_singleton<T>(&mut self, instance: Arc<T>) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        self.regs.scoped.remove(&key);
        self.regs.singletons.insert(key, instance);
        self
    }

    /// 注册作用域服务：每个作用域首次解析时调用工厂创建，之后复用
    ///
    /// 工厂可从同一作用域解析其它服务。
    pub fn add_scoped<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Scope) -> Result<T, ScopeError> + Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        let f: ScopedFactoryFn =
            Arc::new(move |scope| factory(scope).map(|svc| Arc::new(svc) as Instance));
        self.regs.singletons.remove(&key);
        self.regs.scoped.insert(key, f);
        self
    }

    pub fn build(self) -> ServiceProvider {
        ServiceProvider {
            regs: Arc::new(self.regs),
        }
    }
}

/// 默认的作用域工厂
#[derive(Clone)]
pub struct ServiceProvider {
    regs: Arc<Registrations>,
}

impl ServiceProvider {
    pub fn builder() -> ServiceCollection {
        ServiceCollection::new()
    }
}

impl ScopeFactory for ServiceProvider {
    fn create_scope(&self) -> Scope {
        Scope::with_registrations(Some(self.regs.clone()))
    }
}

/// 一次分发的隔离解析边界
pub struct Scope {
    id: u64,
    regs: Option<Arc<Registrations>>,
    instances: DashMap<TypeId, Instance>,
}

impl Scope {
    /// 空作用域：任何解析都返回 `NotRegistered`
    pub fn empty() -> Self {
        Self::with_registrations(None)
    }

    fn with_registrations(regs: Option<Arc<Registrations>>) -> Self {
        Self {
            id: NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed),
            regs,
            instances: DashMap::new(),
        }
    }

    /// 作用域序号（进程内唯一，用于日志关联）
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 解析服务
    ///
    /// 作用域服务首次解析时调用工厂；工厂（直接或间接）再次解析自身时返回 [`ScopeError::Cycle`]。
    pub fn resolve<T>(&self) -> Result<Arc<T>, ScopeError>
    where
        T: Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        let Some(regs) = self.regs.as_ref() else {
            return Err(ScopeError::NotRegistered(type_name::<T>()));
        };

        if let Some(instance) = regs.singletons.get(&key) {
            return downcast::<T>(instance.clone());
        }

        if let Some(instance) = self.instances.get(&key).map(|e| e.value().clone()) {
            return downcast::<T>(instance);
        }

        let Some(factory) = regs.scoped.get(&key) else {
            return Err(ScopeError::NotRegistered(type_name::<T>()));
        };

        let Some(_guard) = BuildGuard::enter((self.id, key)) else {
            return Err(ScopeError::Cycle(type_name::<T>()));
        };

        // 工厂可能递归解析其它服务，调用期间不能持有 DashMap 的锁
        let created = factory(self)?;
        let instance = self.instances.entry(key).or_insert(created).value().clone();
        downcast::<T>(instance)
    }
}

fn downcast<T>(instance: Instance) -> Result<Arc<T>, ScopeError>
where
    T: Send + Sync + 'static,
{
    instance.downcast::<T>().map_err(|_| ScopeError::TypeMismatch {
        expected: type_name::<T>(),
    })
}
