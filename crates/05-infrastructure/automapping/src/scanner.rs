//! 实体类型扫描器
//!
//! 按模块名过滤类型目录，返回满足约束、且未带排除标记的具体类型。

use data_abstractions::{
    identity_contract, ContractDefinition, ContractId, EntityDescriptor, TypeCatalog,
};
use infrastructure_common::TypeInfo;
use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// 扫描约束
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// 实现指定契约（按契约定义匹配，忽略泛型实参；包括经由基类型继承的契约）
    Contract(ContractId),
    /// 派生自指定基类型（传递）
    BaseType(TypeInfo),
}

impl Constraint {
    /// 标识契约 `Entity<K>`
    pub fn identity() -> Self {
        Self::Contract(identity_contract())
    }

    /// 非泛型契约，通常为 `dyn Trait`
    pub fn contract<D: ?Sized + 'static>() -> Self {
        Self::Contract(ContractId::of::<D>())
    }

    /// 由定义标记表示的泛型契约
    pub fn definition<D: ContractDefinition>() -> Self {
        Self::Contract(ContractId::definition::<D>())
    }

    /// 基类型约束
    pub fn base_type<B: ?Sized + 'static>() -> Self {
        Self::BaseType(TypeInfo::of::<B>())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Contract(contract) => write!(f, "implements {}", contract),
            Constraint::BaseType(base) => write!(f, "extends {}", base),
        }
    }
}

/// 类型扫描器
#[derive(Debug, Clone, Copy)]
pub struct TypeScanner<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> TypeScanner<'a> {
    /// 基于类型目录创建扫描器
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// 扫描满足约束的具体类型
    ///
    /// 结果按模块顺序、模块内提交顺序排列，同一类型只出现一次。
    /// 没有任何匹配时返回空集合。
    pub fn scan(&self, constraint: &Constraint, filter: Option<&str>) -> Vec<&'a EntityDescriptor> {
        let mut seen: HashSet<TypeId> = HashSet::new();
        let mut found = Vec::new();
        let mut scanned_modules = 0usize;

        for module in self.catalog.modules() {
            if !module.info.matches(filter) {
                debug!("跳过模块: {}", module.info);
                continue;
            }
            scanned_modules += 1;

            for descriptor in &module.types {
                if !descriptor.is_concrete() || !self.matches(descriptor, constraint) {
                    continue;
                }
                if self.is_excluded(descriptor) {
                    debug!("类型或其基类型带有排除标记，跳过: {}", descriptor.type_info);
                    continue;
                }
                if seen.insert(descriptor.type_id()) {
                    debug!("发现实体类型: {} ({})", descriptor.type_info, module.info);
                    found.push(descriptor);
                }
            }
        }

        info!(
            "扫描完成: 约束 [{}], 扫描 {} 个模块, 发现 {} 个类型",
            constraint,
            scanned_modules,
            found.len()
        );
        found
    }

    /// 类型是否满足约束
    pub fn matches(&self, descriptor: &EntityDescriptor, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Contract(contract) => self.implements(descriptor, contract),
            Constraint::BaseType(base) => self.is_subclass(descriptor, base),
        }
    }

    /// 类型是否实现了契约定义（自身声明或继承自基类型）
    pub fn implements(&self, descriptor: &EntityDescriptor, contract: &ContractId) -> bool {
        self.catalog
            .contracts_of(descriptor)
            .iter()
            .any(|implemented| implemented.is_instance_of(contract))
    }

    /// 类型是否派生自基类型，类型本身不算作自己的子类
    pub fn is_subclass(&self, descriptor: &EntityDescriptor, base: &TypeInfo) -> bool {
        self.catalog
            .ancestors_of(descriptor)
            .iter()
            .any(|ancestor| ancestor.id == base.id)
    }

    /// 类型是否被排除：自身或任一祖先类型带有排除标记
    pub fn is_excluded(&self, descriptor: &EntityDescriptor) -> bool {
        descriptor.not_mapped
            || self
                .catalog
                .ancestors_of(descriptor)
                .iter()
                .filter_map(|ancestor| self.catalog.find(ancestor.id))
                .any(|ancestor| ancestor.not_mapped)
    }

    /// 候选主键类型：自身声明的标识契约在前，继承的在后，均按声明顺序
    pub fn identity_keys(&self, descriptor: &EntityDescriptor) -> Vec<TypeInfo> {
        let identity = identity_contract();
        self.catalog
            .contracts_of(descriptor)
            .into_iter()
            .filter(|contract| contract.is_instance_of(&identity))
            .flat_map(|contract| contract.type_args)
            .collect()
    }
}
