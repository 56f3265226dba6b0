//! 类型反射信息
//!
//! Rust 没有运行时反射，实体类型在编译期由 `#[entity]` 宏生成
//! [`EntityDescriptor`]，描述其实现的契约、基类型以及仓储工厂。

use crate::entity::{identity_contract, Entity};
use crate::repository::{DbContext, Repository};
use di_abstractions::ServiceInstance;
use infrastructure_common::{short_type_name, ModuleInfo, TypeInfo};
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// 契约定义标记
///
/// 泛型契约（如 `Entity<K>`）无法直接取得"泛型定义"的 TypeId，
/// 因此以一个标记类型代表其定义。
pub trait ContractDefinition: 'static {
    /// 契约显示名称
    const NAME: &'static str;
}

/// 契约定义 ID
///
/// 非泛型契约可直接使用 `ContractId::of::<dyn Trait>()`。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractId {
    /// 契约名称
    pub name: String,
    /// 契约定义的 TypeId
    pub id: TypeId,
}

impl ContractId {
    /// 从任意类型（通常为 `dyn Trait`）创建契约 ID
    pub fn of<D: ?Sized + 'static>() -> Self {
        Self {
            name: short_type_name(std::any::type_name::<D>()),
            id: TypeId::of::<D>(),
        }
    }

    /// 从契约定义标记创建契约 ID
    pub fn definition<D: ContractDefinition>() -> Self {
        Self {
            name: D::NAME.to_string(),
            id: TypeId::of::<D>(),
        }
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 已实现的契约（契约定义 + 泛型实参）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractImpl {
    /// 契约定义
    pub definition: ContractId,
    /// 泛型实参，按声明顺序
    pub type_args: Vec<TypeInfo>,
}

impl ContractImpl {
    /// 非泛型契约
    pub fn new(definition: ContractId) -> Self {
        Self {
            definition,
            type_args: Vec::new(),
        }
    }

    /// 泛型契约
    pub fn generic(definition: ContractId, type_args: Vec<TypeInfo>) -> Self {
        Self {
            definition,
            type_args,
        }
    }

    /// 标识契约 `Entity<K>`
    pub fn identity<K: 'static>() -> Self {
        Self::generic(identity_contract(), vec![TypeInfo::of::<K>()])
    }

    /// 是否为泛型契约
    pub fn is_generic(&self) -> bool {
        !self.type_args.is_empty()
    }

    /// 是否为指定契约定义的实例
    pub fn is_instance_of(&self, definition: &ContractId) -> bool {
        self.definition.id == definition.id
    }
}

/// 仓储工厂函数：给定数据上下文，创建 `Arc<dyn Repository<E, K>>` 服务实例
pub type RepositoryFactoryFn = fn(Arc<dyn DbContext>) -> ServiceInstance;

/// 仓储工厂
///
/// 对应"以实体类型与主键类型闭合泛型仓储"，在编译期按 (实体, 主键) 生成。
#[derive(Clone)]
pub struct RepositoryFactory {
    /// 主键类型
    pub key: TypeInfo,
    /// 服务契约 `dyn Repository<E, K>`
    pub service: TypeInfo,
    /// 实现名称
    pub implementation: String,
    /// 创建函数
    pub create: RepositoryFactoryFn,
}

impl fmt::Debug for RepositoryFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryFactory")
            .field("key", &self.key)
            .field("service", &self.service)
            .field("implementation", &self.implementation)
            .field("create", &"<function>")
            .finish()
    }
}

impl RepositoryFactory {
    /// 为 (实体, 主键) 创建仓储工厂
    pub fn new<E, K>(implementation: impl Into<String>, create: RepositoryFactoryFn) -> Self
    where
        E: Entity<K>,
        K: 'static,
    {
        Self {
            key: TypeInfo::of::<K>(),
            service: TypeInfo::of::<dyn Repository<E, K>>(),
            implementation: implementation.into(),
            create,
        }
    }
}

/// 实体类型描述符
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// 类型信息
    pub type_info: TypeInfo,
    /// 所属模块
    pub module: ModuleInfo,
    /// 是否为抽象类型（只作为基类型存在）
    pub is_abstract: bool,
    /// 是否带有排除标记
    pub not_mapped: bool,
    /// 声明的基类型，按声明顺序
    pub bases: Vec<TypeInfo>,
    /// 声明实现的契约，按声明顺序
    pub contracts: Vec<ContractImpl>,
    /// 仓储工厂，每个声明的主键一个
    pub repositories: Vec<RepositoryFactory>,
}

impl EntityDescriptor {
    /// 创建类型描述符
    pub fn new<T: ?Sized + 'static>(module: ModuleInfo) -> Self {
        Self::from_type_info(TypeInfo::of::<T>(), module)
    }

    /// 从类型信息创建描述符
    pub fn from_type_info(type_info: TypeInfo, module: ModuleInfo) -> Self {
        Self {
            type_info,
            module,
            is_abstract: false,
            not_mapped: false,
            bases: Vec::new(),
            contracts: Vec::new(),
            repositories: Vec::new(),
        }
    }

    /// 覆盖显示名称
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.type_info.name = name.into();
        self
    }

    /// 标记为抽象类型
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 标记为不映射
    pub fn not_mapped(mut self) -> Self {
        self.not_mapped = true;
        self
    }

    /// 添加基类型
    pub fn extends<B: ?Sized + 'static>(self) -> Self {
        self.with_base(TypeInfo::of::<B>())
    }

    /// 添加基类型
    pub fn with_base(mut self, base: TypeInfo) -> Self {
        self.bases.push(base);
        self
    }

    /// 添加已实现的契约
    pub fn implements(mut self, contract: ContractImpl) -> Self {
        self.contracts.push(contract);
        self
    }

    /// 添加标识契约 `Entity<K>`
    pub fn with_identity<K: 'static>(self) -> Self {
        self.implements(ContractImpl::identity::<K>())
    }

    /// 添加仓储工厂
    pub fn with_repository(mut self, factory: RepositoryFactory) -> Self {
        self.repositories.push(factory);
        self
    }

    /// 类型ID
    pub fn type_id(&self) -> TypeId {
        self.type_info.id
    }

    /// 是否为具体类型
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract
    }

    /// 自身声明的主键类型，按声明顺序
    pub fn own_identity_keys(&self) -> Vec<&TypeInfo> {
        let identity = identity_contract();
        self.contracts
            .iter()
            .filter(|contract| contract.is_instance_of(&identity))
            .flat_map(|contract| contract.type_args.iter())
            .collect()
    }

    /// 查找指定主键的仓储工厂
    pub fn repository_for(&self, key: &TypeInfo) -> Option<&RepositoryFactory> {
        self.repositories.iter().find(|factory| factory.key.id == key.id)
    }
}
