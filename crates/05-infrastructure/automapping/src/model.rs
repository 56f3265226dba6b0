//! 内存持久化模型

use data_abstractions::{EntityType, PersistenceModel};
use infrastructure_common::ModelError;
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

/// 内存持久化模型
///
/// 实体类型按添加顺序保存，重复添加同一类型返回 [`ModelError::DuplicateEntityType`]。
#[derive(Debug, Clone, Default)]
pub struct EntityModel {
    entity_types: Vec<EntityType>,
    index: HashMap<TypeId, usize>,
}

impl EntityModel {
    /// 创建空模型
    pub fn new() -> Self {
        Self::default()
    }

    /// 实体类型数量
    pub fn len(&self) -> usize {
        self.entity_types.len()
    }

    /// 模型是否为空
    pub fn is_empty(&self) -> bool {
        self.entity_types.is_empty()
    }
}

impl PersistenceModel for EntityModel {
    fn find_entity_type(&self, type_id: TypeId) -> Option<&EntityType> {
        self.index.get(&type_id).map(|&position| &self.entity_types[position])
    }

    fn add_entity_type(&mut self, entity_type: EntityType) -> Result<&EntityType, ModelError> {
        let type_id = entity_type.type_info.id;
        if self.index.contains_key(&type_id) {
            return Err(ModelError::DuplicateEntityType {
                type_name: entity_type.type_info.name,
            });
        }

        debug!(
            "添加实体类型到模型: {} -> {}",
            entity_type.type_info, entity_type.table_name
        );
        let position = self.entity_types.len();
        self.index.insert(type_id, position);
        self.entity_types.push(entity_type);
        Ok(&self.entity_types[position])
    }

    fn entity_types(&self) -> Vec<&EntityType> {
        self.entity_types.iter().collect()
    }
}
