//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象

use crate::factory::ServiceDescriptor;
use crate::registry::ServiceRegistry;
use crate::resolver::ServiceResolver;
use infrastructure_common::DependencyError;

/// 依赖注入容器 trait
///
/// 同时具备注册和解析能力，并可创建作用域
pub trait DiContainer: ServiceRegistry + ServiceResolver {
    /// 作用域解析器类型
    type Scope: ServiceResolver;

    /// 创建新的服务作用域
    fn create_scope(&self) -> Self::Scope;

    /// 获取容器统计信息
    fn stats(&self) -> ContainerStats;
}

/// 容器构建器 trait
pub trait ContainerBuilder: Sized {
    /// 关联的容器类型
    type Container: DiContainer;

    /// 添加服务注册
    fn register(self, descriptor: ServiceDescriptor) -> Self;

    /// 构建容器
    fn build(self) -> Result<Self::Container, DependencyError>;
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 已注册服务数量
    pub registered_services: usize,
    /// 累计解析次数
    pub resolutions: usize,
    /// 活跃单例数量
    pub active_singletons: usize,
}
