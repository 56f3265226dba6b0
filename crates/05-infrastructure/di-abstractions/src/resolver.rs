//! 服务解析器抽象接口
//!
//! 提供依赖解析和服务实例化的能力

use crate::factory::{downcast_instance, ServiceInstance};
use infrastructure_common::{short_type_name, DependencyError};
use std::any::TypeId;
use std::cell::RefCell;
use std::sync::Arc;

/// 服务解析器 trait
///
/// 对象安全，可以以 `&dyn ServiceResolver` 形式传入工厂函数
pub trait ServiceResolver: Send + Sync {
    /// 解析指定类型的服务（使用 TypeId）
    fn resolve_by_type_id(&self, type_id: TypeId) -> Result<ServiceInstance, DependencyError>;

    /// 检查是否可以解析指定类型（使用 TypeId）
    fn can_resolve_by_type_id(&self, type_id: TypeId) -> bool;
}

/// 类型化解析扩展
pub trait ServiceResolverExt: ServiceResolver {
    /// 解析指定类型的服务
    ///
    /// `T` 本身未注册时，错误中带上 `T` 的类型名；依赖链中更深处的错误原样返回。
    fn resolve<T>(&self) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        let instance = self.resolve_by_type_id(type_id).map_err(|err| match err {
            DependencyError::ServiceNotRegistered { .. } if !self.can_resolve_by_type_id(type_id) => {
                DependencyError::ServiceNotRegistered {
                    type_name: short_type_name(std::any::type_name::<T>()),
                }
            }
            other => other,
        })?;
        downcast_instance::<T>(&instance)
    }

    /// 检查是否可以解析指定类型
    fn can_resolve<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.can_resolve_by_type_id(TypeId::of::<T>())
    }
}

impl<R: ServiceResolver + ?Sized> ServiceResolverExt for R {}

thread_local! {
    static RESOLUTION_CHAIN: RefCell<Vec<(TypeId, String)>> = RefCell::new(Vec::new());
}

/// 解析链守卫
///
/// 进入时把类型压入当前线程的解析链，离开时弹出；重复进入同一类型即为循环依赖。
#[derive(Debug)]
pub struct ResolutionGuard {
    _private: (),
}

impl ResolutionGuard {
    /// 把类型加入解析链
    pub fn enter(type_id: TypeId, type_name: &str) -> Result<Self, DependencyError> {
        RESOLUTION_CHAIN.with(|chain| {
            let mut chain = chain.borrow_mut();
            if chain.iter().any(|(id, _)| *id == type_id) {
                let mut names: Vec<&str> = chain.iter().map(|(_, name)| name.as_str()).collect();
                names.push(type_name);
                return Err(DependencyError::CircularDependency {
                    dependency_chain: names.join(" -> "),
                });
            }
            chain.push((type_id, type_name.to_string()));
            Ok(Self { _private: () })
        })
    }

    /// 当前解析深度
    pub fn depth() -> usize {
        RESOLUTION_CHAIN.with(|chain| chain.borrow().len())
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLUTION_CHAIN.with(|chain| {
            chain.borrow_mut().pop();
        });
    }
}
