//! 类型目录
//!
//! 代替"当前进程已加载的程序集"：各 crate 中由 `#[entity]` 生成的 `ctor`
//! 函数在 `main` 之前把描述符提交到全局目录，按所属模块分组。

use crate::reflection::{ContractImpl, EntityDescriptor};
use infrastructure_common::{ModuleInfo, TypeInfo};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashSet;
use tracing::debug;

/// 模块条目
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    /// 模块信息
    pub info: ModuleInfo,
    /// 模块内的类型描述符，按提交顺序
    pub types: Vec<EntityDescriptor>,
}

/// 类型目录
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    modules: Vec<ModuleEntry>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交类型描述符，归入其所属模块
    pub fn submit(&mut self, descriptor: EntityDescriptor) {
        match self
            .modules
            .iter_mut()
            .find(|module| module.info == descriptor.module)
        {
            Some(module) => module.types.push(descriptor),
            None => self.modules.push(ModuleEntry {
                info: descriptor.module.clone(),
                types: vec![descriptor],
            }),
        }
    }

    /// 构建者风格的提交
    pub fn with(mut self, descriptor: EntityDescriptor) -> Self {
        self.submit(descriptor);
        self
    }

    /// 所有模块，按首次提交顺序
    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    /// 所有描述符数量
    pub fn len(&self) -> usize {
        self.modules.iter().map(|module| module.types.len()).sum()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按 TypeId 查找描述符（取第一次出现）
    pub fn find(&self, type_id: TypeId) -> Option<&EntityDescriptor> {
        self.modules
            .iter()
            .flat_map(|module| module.types.iter())
            .find(|descriptor| descriptor.type_id() == type_id)
    }

    /// 类型实现的全部契约：自身声明在前，随后按基类型声明顺序追加继承的契约
    pub fn contracts_of(&self, descriptor: &EntityDescriptor) -> Vec<ContractImpl> {
        let mut contracts = Vec::new();
        let mut visited = HashSet::new();
        self.collect_contracts(descriptor, &mut visited, &mut contracts);
        contracts
    }

    fn collect_contracts(
        &self,
        descriptor: &EntityDescriptor,
        visited: &mut HashSet<TypeId>,
        contracts: &mut Vec<ContractImpl>,
    ) {
        if !visited.insert(descriptor.type_id()) {
            return;
        }

        for contract in &descriptor.contracts {
            if !contracts.contains(contract) {
                contracts.push(contract.clone());
            }
        }

        for base in &descriptor.bases {
            match self.find(base.id) {
                Some(base_descriptor) => self.collect_contracts(base_descriptor, visited, contracts),
                None => debug!("基类型未在目录中注册: {} (派生自 {})", base, descriptor.type_info),
            }
        }
    }

    /// 类型的全部祖先类型（传递闭包），按广度优先顺序
    pub fn ancestors_of(&self, descriptor: &EntityDescriptor) -> Vec<TypeInfo> {
        let mut ancestors: Vec<TypeInfo> = Vec::new();
        let mut visited: HashSet<TypeId> = HashSet::new();
        visited.insert(descriptor.type_id());

        let mut frontier: Vec<&TypeInfo> = descriptor.bases.iter().collect();
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for base in frontier {
                if !visited.insert(base.id) {
                    continue;
                }
                ancestors.push(base.clone());
                if let Some(base_descriptor) = self.find(base.id) {
                    next.extend(base_descriptor.bases.iter());
                }
            }
            frontier = next;
        }

        ancestors
    }
}

/// 全局类型目录
static GLOBAL_TYPE_CATALOG: Lazy<RwLock<TypeCatalog>> = Lazy::new(|| RwLock::new(TypeCatalog::new()));

/// 向全局类型目录提交描述符
///
/// 由 `#[entity]` 宏生成的 `ctor` 函数调用。
pub fn submit_descriptor(descriptor: EntityDescriptor) {
    GLOBAL_TYPE_CATALOG.write().submit(descriptor);
}

/// 获取全局类型目录的快照
pub fn global_catalog() -> TypeCatalog {
    GLOBAL_TYPE_CATALOG.read().clone()
}
