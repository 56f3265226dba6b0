//! 服务注册表抽象接口

use crate::factory::ServiceDescriptor;
use infrastructure_common::DependencyError;
use std::any::TypeId;
use tracing::debug;

/// 服务注册表 trait
///
/// 对象安全，自动注册流程以 `&mut dyn ServiceRegistry` 形式接收容器
pub trait ServiceRegistry: Send + Sync {
    /// 注册服务，已存在的同一契约会被覆盖
    fn register(&mut self, descriptor: ServiceDescriptor) -> Result<(), DependencyError>;

    /// 检查服务契约是否已注册（通过 TypeId）
    fn is_registered_by_type_id(&self, type_id: TypeId) -> bool;

    /// 获取所有已注册的服务描述符（按注册顺序）
    fn registrations(&self) -> Vec<ServiceDescriptor>;

    /// 仅在契约尚未注册时注册
    ///
    /// 返回 `true` 表示本次完成了注册，`false` 表示已存在而跳过。
    fn register_if_not(&mut self, descriptor: ServiceDescriptor) -> Result<bool, DependencyError> {
        if self.is_registered_by_type_id(descriptor.service.id) {
            debug!("服务已注册，跳过: {}", descriptor.service);
            return Ok(false);
        }
        self.register(descriptor)?;
        Ok(true)
    }

    /// 已注册的服务数量
    fn len(&self) -> usize {
        self.registrations().len()
    }

    /// 是否没有任何注册
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 类型化注册扩展
pub trait ServiceRegistryExt: ServiceRegistry {
    /// 检查服务契约是否已注册
    fn is_registered<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.is_registered_by_type_id(TypeId::of::<T>())
    }
}

impl<R: ServiceRegistry + ?Sized> ServiceRegistryExt for R {}
