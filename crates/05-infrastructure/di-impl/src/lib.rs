//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器、作用域和容器构建器实现

use di_abstractions::{
    ContainerBuilder, ContainerStats, DiContainer, ResolutionGuard, ServiceDescriptor,
    ServiceInstance, ServiceRegistry, ServiceResolver,
};
use infrastructure_common::{DependencyError, Lifetime, Scope};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

type InstanceCache = RwLock<HashMap<TypeId, ServiceInstance>>;

/// 容器共享状态，根容器与其创建的作用域共用
#[derive(Default)]
struct ContainerState {
    /// 服务注册信息
    registrations: RwLock<HashMap<TypeId, ServiceDescriptor>>,
    /// 注册顺序
    order: RwLock<Vec<TypeId>>,
    /// 单例实例缓存
    singletons: InstanceCache,
    /// 累计解析次数
    resolutions: AtomicUsize,
}

impl ContainerState {
    fn descriptor(&self, type_id: TypeId) -> Result<ServiceDescriptor, DependencyError> {
        self.registrations
            .read()
            .get(&type_id)
            .cloned()
            .ok_or_else(|| DependencyError::ServiceNotRegistered {
                type_name: format!("{:?}", type_id),
            })
    }
}

/// 具体的依赖注入容器实现
pub struct DiContainerImpl {
    state: Arc<ContainerState>,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self {
            state: Arc::new(ContainerState::default()),
        }
    }

    fn shared(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }

    /// 获取指定契约的注册信息
    pub fn descriptor_of(&self, type_id: TypeId) -> Option<ServiceDescriptor> {
        self.state.registrations.read().get(&type_id).cloned()
    }
}

impl Default for DiContainerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry for DiContainerImpl {
    fn register(&mut self, descriptor: ServiceDescriptor) -> Result<(), DependencyError> {
        let type_id = descriptor.service.id;
        info!(
            "注册服务: {} -> {} ({})",
            descriptor.service, descriptor.implementation, descriptor.lifetime
        );

        let replaced = self
            .state
            .registrations
            .write()
            .insert(type_id, descriptor)
            .is_some();

        if replaced {
            // 覆盖注册时丢弃旧实现创建的单例
            self.state.singletons.write().remove(&type_id);
        } else {
            self.state.order.write().push(type_id);
        }

        Ok(())
    }

    fn is_registered_by_type_id(&self, type_id: TypeId) -> bool {
        self.state.registrations.read().contains_key(&type_id)
    }

    fn registrations(&self) -> Vec<ServiceDescriptor> {
        let registrations = self.state.registrations.read();
        self.state
            .order
            .read()
            .iter()
            .filter_map(|type_id| registrations.get(type_id).cloned())
            .collect()
    }

    fn len(&self) -> usize {
        self.state.order.read().len()
    }
}

impl ServiceResolver for DiContainerImpl {
    fn resolve_by_type_id(&self, type_id: TypeId) -> Result<ServiceInstance, DependencyError> {
        let descriptor = self.state.descriptor(type_id)?;
        let _guard = ResolutionGuard::enter(type_id, &descriptor.service.name)?;
        self.state.resolutions.fetch_add(1, Ordering::Relaxed);

        match descriptor.lifetime {
            Lifetime::Transient => descriptor.create(self),
            Lifetime::Singleton => {
                get_or_create(&self.state.singletons, type_id, || descriptor.create(self))
            }
            Lifetime::Scoped => Err(DependencyError::ScopeMismatch {
                type_name: descriptor.service.name.clone(),
            }),
        }
    }

    fn can_resolve_by_type_id(&self, type_id: TypeId) -> bool {
        self.is_registered_by_type_id(type_id)
    }
}

impl DiContainer for DiContainerImpl {
    type Scope = ServiceScope;

    fn create_scope(&self) -> ServiceScope {
        let scope = Scope::new("request");
        debug!("创建服务作用域: {} ({})", scope.name, scope.id);
        ServiceScope {
            scope,
            root: self.shared(),
            instances: RwLock::new(HashMap::new()),
        }
    }

    fn stats(&self) -> ContainerStats {
        ContainerStats {
            registered_services: self.len(),
            resolutions: self.state.resolutions.load(Ordering::Relaxed),
            active_singletons: self.state.singletons.read().len(),
        }
    }
}

/// 服务作用域
///
/// 作用域服务在同一作用域内共享实例，单例服务委托给根容器。
pub struct ServiceScope {
    scope: Scope,
    root: DiContainerImpl,
    instances: InstanceCache,
}

impl ServiceScope {
    /// 作用域信息
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl ServiceResolver for ServiceScope {
    fn resolve_by_type_id(&self, type_id: TypeId) -> Result<ServiceInstance, DependencyError> {
        let descriptor = self.root.state.descriptor(type_id)?;

        match descriptor.lifetime {
            Lifetime::Singleton => self.root.resolve_by_type_id(type_id),
            Lifetime::Transient => {
                let _guard = ResolutionGuard::enter(type_id, &descriptor.service.name)?;
                self.root.state.resolutions.fetch_add(1, Ordering::Relaxed);
                descriptor.create(self)
            }
            Lifetime::Scoped => {
                let _guard = ResolutionGuard::enter(type_id, &descriptor.service.name)?;
                self.root.state.resolutions.fetch_add(1, Ordering::Relaxed);
                get_or_create(&self.instances, type_id, || descriptor.create(self))
            }
        }
    }

    fn can_resolve_by_type_id(&self, type_id: TypeId) -> bool {
        self.root.is_registered_by_type_id(type_id)
    }
}

/// 从缓存获取实例，不存在时创建
///
/// 工厂调用期间不持有锁，工厂内部可以继续解析其他服务。
fn get_or_create<F>(
    cache: &InstanceCache,
    type_id: TypeId,
    create: F,
) -> Result<ServiceInstance, DependencyError>
where
    F: FnOnce() -> Result<ServiceInstance, DependencyError>,
{
    if let Some(instance) = cache.read().get(&type_id) {
        return Ok(Arc::clone(instance));
    }

    let instance = create()?;
    Ok(Arc::clone(cache.write().entry(type_id).or_insert(instance)))
}

/// 容器构建器实现
#[derive(Default)]
pub struct DiContainerBuilder {
    descriptors: Vec<ServiceDescriptor>,
}

impl DiContainerBuilder {
    /// 创建新的容器构建器
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContainerBuilder for DiContainerBuilder {
    type Container = DiContainerImpl;

    fn register(mut self, descriptor: ServiceDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    fn build(self) -> Result<Self::Container, DependencyError> {
        let mut container = DiContainerImpl::new();
        let registration_count = self.descriptors.len();

        for descriptor in self.descriptors {
            container.register(descriptor)?;
        }

        info!("构建容器完成，注册了 {} 个服务", registration_count);
        Ok(container)
    }
}
