//! 泛型仓储自动注册
//!
//! 为每个发现的实体类型注册 `dyn Repository<E, K>` 服务，实现为绑定到
//! 数据上下文 `C` 的 `EfRepository<E, K>`，生命周期为瞬时。

use crate::scanner::{Constraint, TypeScanner};
use data_abstractions::{global_catalog, DbContext, EntityDescriptor, RepositoryFactory, TypeCatalog};
use di_abstractions::{
    ServiceDescriptor, ServiceInstance, ServiceRegistry, ServiceResolver, ServiceResolverExt,
};
use infrastructure_common::{DependencyError, Lifetime, MappingError, TypeInfo};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 注册结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// 本次注册的仓储契约
    pub registered: Vec<TypeInfo>,
    /// 已存在而跳过的仓储契约
    pub skipped: Vec<TypeInfo>,
}

impl RegistrationReport {
    /// 处理过的实体总数
    pub fn total(&self) -> usize {
        self.registered.len() + self.skipped.len()
    }
}

/// 仓储注册器
#[derive(Debug, Clone, Copy)]
pub struct RepositoryRegistrar<'a> {
    scanner: TypeScanner<'a>,
}

impl<'a> RepositoryRegistrar<'a> {
    /// 基于类型目录创建注册器
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self {
            scanner: TypeScanner::new(catalog),
        }
    }

    /// 为满足标识契约的实体注册仓储
    ///
    /// 已注册的仓储契约会被跳过。遇到无法确定主键的实体立即返回
    /// [`MappingError::MalformedEntity`]，此前已完成的注册保留在容器中。
    pub fn register<C: DbContext>(
        &self,
        container: &mut dyn ServiceRegistry,
        filter: Option<&str>,
    ) -> Result<RegistrationReport, MappingError> {
        let mut report = RegistrationReport::default();

        for descriptor in self.scanner.scan(&Constraint::identity(), filter) {
            let factory = self.repository_factory(descriptor)?;
            let service = factory.service.clone();

            if container.register_if_not(repository_service::<C>(descriptor, factory))? {
                report.registered.push(service);
            } else {
                report.skipped.push(service);
            }
        }

        info!(
            "仓储注册完成: 上下文 {}, 新注册 {} 个, 跳过 {} 个",
            TypeInfo::of::<C>(),
            report.registered.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// 按第一个候选主键查找仓储工厂
    fn repository_factory<'d>(
        &self,
        descriptor: &'d EntityDescriptor,
    ) -> Result<&'d RepositoryFactory, MappingError> {
        let keys = self.scanner.identity_keys(descriptor);
        let key = keys.first().ok_or_else(|| {
            MappingError::malformed_entity(descriptor.type_info.name.clone(), "标识契约缺少主键类型实参")
        })?;

        if keys.len() > 1 {
            warn!(
                "实体 {} 声明了多个主键类型 {:?}，使用第一个: {}",
                descriptor.type_info,
                keys.iter().map(|key| key.name.as_str()).collect::<Vec<_>>(),
                key
            );
        }

        descriptor.repository_for(key).ok_or_else(|| {
            MappingError::malformed_entity(
                descriptor.type_info.name.clone(),
                format!("主键 {} 没有对应的仓储工厂，请在实体上声明 key = {}", key, key),
            )
        })
    }
}

/// 构建仓储服务描述符，解析时从容器获取上下文 `C`
fn repository_service<C: DbContext>(
    descriptor: &EntityDescriptor,
    factory: &RepositoryFactory,
) -> ServiceDescriptor {
    let context_type = TypeInfo::of::<C>();
    let implementation = format!(
        "EfRepository<{}, {}, {}>",
        context_type, descriptor.type_info, factory.key
    );
    debug!("构建仓储服务: {} -> {}", factory.service, implementation);

    let create = factory.create;
    ServiceDescriptor::new(
        factory.service.clone(),
        implementation,
        Lifetime::Transient,
        Arc::new(move |resolver: &dyn ServiceResolver| -> Result<ServiceInstance, DependencyError> {
            let context: Arc<dyn DbContext> = resolver.resolve::<C>()?;
            Ok(create(context))
        }),
    )
}

/// 使用全局类型目录为实体注册仓储
pub fn register_entity_repositories<C: DbContext>(
    container: &mut dyn ServiceRegistry,
    filter: Option<&str>,
) -> Result<RegistrationReport, MappingError> {
    let catalog = global_catalog();
    RepositoryRegistrar::new(&catalog).register::<C>(container, filter)
}
