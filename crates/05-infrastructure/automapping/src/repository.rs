//! 基于数据上下文的泛型仓储

use data_abstractions::{DbContext, Entity, Repository, RepositoryFactory, RepositoryFactoryFn};
use di_abstractions::{into_instance, ServiceInstance};
use infrastructure_common::TypeInfo;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 泛型仓储实现
///
/// 查询与持久化交给数据上下文背后的 ORM，这里只负责把实体类型与上下文绑定。
pub struct EfRepository<E, K> {
    context: Arc<dyn DbContext>,
    _marker: PhantomData<fn() -> (E, K)>,
}

impl<E, K> EfRepository<E, K>
where
    E: Entity<K>,
    K: 'static,
{
    /// 创建仓储
    pub fn new(context: Arc<dyn DbContext>) -> Self {
        Self {
            context,
            _marker: PhantomData,
        }
    }
}

impl<E, K> fmt::Debug for EfRepository<E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EfRepository")
            .field("entity", &std::any::type_name::<E>())
            .field("key", &std::any::type_name::<K>())
            .field("context", &self.context.name())
            .finish()
    }
}

impl<E, K> Repository<E, K> for EfRepository<E, K>
where
    E: Entity<K>,
    K: 'static,
{
    fn context(&self) -> Arc<dyn DbContext> {
        Arc::clone(&self.context)
    }
}

/// 创建 `Arc<dyn Repository<E, K>>` 服务实例
pub fn create_ef_repository<E, K>(context: Arc<dyn DbContext>) -> ServiceInstance
where
    E: Entity<K>,
    K: 'static,
{
    let repository: Arc<dyn Repository<E, K>> = Arc::new(EfRepository::<E, K>::new(context));
    into_instance(repository)
}

/// (实体, 主键) 对应的仓储工厂，由 `#[entity]` 宏为每个声明的主键生成
pub fn ef_repository_factory<E, K>() -> RepositoryFactory
where
    E: Entity<K>,
    K: 'static,
{
    let implementation = format!(
        "EfRepository<{}, {}>",
        TypeInfo::of::<E>().name,
        TypeInfo::of::<K>().name
    );
    let create: RepositoryFactoryFn = create_ef_repository::<E, K>;
    RepositoryFactory::new::<E, K>(implementation, create)
}
