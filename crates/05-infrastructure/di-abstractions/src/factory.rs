//! 服务工厂与服务描述符
//!
//! 容器中的实例统一以 [`ServiceInstance`] 形式保存：外层是
//! `Arc<dyn Any + Send + Sync>`，内层是具体的 `Arc<T>`，
//! 这样 `T` 可以是 `dyn Trait` 这样的非定长类型。

use crate::resolver::ServiceResolver;
use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的服务实例（内部保存 `Arc<T>`）
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// 服务工厂函数类型
pub type ServiceFactoryFn =
    Arc<dyn Fn(&dyn ServiceResolver) -> Result<ServiceInstance, DependencyError> + Send + Sync>;

/// 将 `Arc<T>` 包装为服务实例
pub fn into_instance<T>(service: Arc<T>) -> ServiceInstance
where
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(service)
}

/// 从服务实例中取出 `Arc<T>`
pub fn downcast_instance<T>(instance: &ServiceInstance) -> Result<Arc<T>, DependencyError>
where
    T: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| DependencyError::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
        })
}

/// 服务描述符
///
/// 描述一个服务契约（`service`）由哪个实现以何种生命周期提供。
#[derive(Clone)]
pub struct ServiceDescriptor {
    /// 服务契约类型
    pub service: TypeInfo,
    /// 实现名称
    pub implementation: String,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 工厂函数
    pub factory: ServiceFactoryFn,
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service", &self.service)
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .field("factory", &"<function>")
            .finish()
    }
}

impl ServiceDescriptor {
    /// 使用类型擦除的工厂创建描述符
    pub fn new(
        service: TypeInfo,
        implementation: impl Into<String>,
        lifetime: Lifetime,
        factory: ServiceFactoryFn,
    ) -> Self {
        Self {
            service,
            implementation: implementation.into(),
            lifetime,
            factory,
        }
    }

    /// 使用类型化的工厂创建描述符
    pub fn from_factory<T, F>(lifetime: Lifetime, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<Arc<T>, DependencyError> + Send + Sync + 'static,
    {
        let service = TypeInfo::of::<T>();
        let implementation = service.name.clone();
        Self::new(
            service,
            implementation,
            lifetime,
            Arc::new(move |resolver: &dyn ServiceResolver| {
                factory(resolver).map(into_instance)
            }),
        )
    }

    /// 注册现有实例（单例）
    pub fn instance<T>(instance: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self::from_factory::<T, _>(Lifetime::Singleton, move |_| Ok(Arc::clone(&instance)))
    }

    /// 瞬时服务
    pub fn transient<T, F>(factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<Arc<T>, DependencyError> + Send + Sync + 'static,
    {
        Self::from_factory(Lifetime::Transient, factory)
    }

    /// 单例服务（首次解析时创建）
    pub fn singleton<T, F>(factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<Arc<T>, DependencyError> + Send + Sync + 'static,
    {
        Self::from_factory(Lifetime::Singleton, factory)
    }

    /// 作用域服务
    pub fn scoped<T, F>(factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<Arc<T>, DependencyError> + Send + Sync + 'static,
    {
        Self::from_factory(Lifetime::Scoped, factory)
    }

    /// 设置实现名称
    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = implementation.into();
        self
    }

    /// 调用工厂创建实例
    pub fn create(&self, resolver: &dyn ServiceResolver) -> Result<ServiceInstance, DependencyError> {
        (self.factory)(resolver)
    }
}
