//! 持久化模型绑定
//!
//! 把扫描到的实体类型挂到持久化模型上，已存在的类型不重复添加。

use crate::scanner::{Constraint, TypeScanner};
use data_abstractions::{global_catalog, ContractDefinition, EntityType, PersistenceModel, TypeCatalog};
use infrastructure_common::MappingError;
use tracing::{debug, info, warn};

/// 模型绑定器
#[derive(Debug, Clone, Copy)]
pub struct ModelBinder<'a> {
    scanner: TypeScanner<'a>,
}

impl<'a> ModelBinder<'a> {
    /// 基于类型目录创建绑定器
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self {
            scanner: TypeScanner::new(catalog),
        }
    }

    /// 把满足约束的实体类型添加到模型，返回本次新增的数量
    pub fn attach(
        &self,
        model: &mut dyn PersistenceModel,
        constraint: &Constraint,
        filter: Option<&str>,
    ) -> Result<usize, MappingError> {
        let mut added = 0;

        for descriptor in self.scanner.scan(constraint, filter) {
            if model.find_entity_type(descriptor.type_id()).is_some() {
                debug!("实体类型已在模型中: {}", descriptor.type_info);
                continue;
            }

            let keys = self.scanner.identity_keys(descriptor);
            if keys.len() > 1 {
                warn!(
                    "实体 {} 声明了多个主键类型 {:?}，使用第一个",
                    descriptor.type_info,
                    keys.iter().map(|key| key.name.as_str()).collect::<Vec<_>>()
                );
            }

            let entity_type = EntityType::new(descriptor.type_info.clone(), keys.into_iter().next());
            model.add_entity_type(entity_type)?;
            added += 1;
        }

        info!("模型绑定完成: 约束 [{}], 新增 {} 个实体类型", constraint, added);
        Ok(added)
    }
}

/// 使用全局类型目录把满足约束的实体类型添加到模型
pub fn attach_entities_to_model(
    model: &mut dyn PersistenceModel,
    constraint: &Constraint,
    filter: Option<&str>,
) -> Result<usize, MappingError> {
    let catalog = global_catalog();
    ModelBinder::new(&catalog).attach(model, constraint, filter)
}

/// 以契约定义标记 `D` 作为约束绑定实体类型
pub fn attach_entity_types<D: ContractDefinition>(
    model: &mut dyn PersistenceModel,
    filter: Option<&str>,
) -> Result<usize, MappingError> {
    attach_entities_to_model(model, &Constraint::definition::<D>(), filter)
}

/// 以标识契约 `Entity<K>` 作为约束绑定实体类型
pub fn attach_identity_entities(
    model: &mut dyn PersistenceModel,
    filter: Option<&str>,
) -> Result<usize, MappingError> {
    attach_entities_to_model(model, &Constraint::identity(), filter)
}
