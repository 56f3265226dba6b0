//! 基于内存模型的数据上下文

use crate::model::EntityModel;
use data_abstractions::{DbContext, PersistenceModel};
use infrastructure_common::MappingError;
use tracing::info;

/// 数据上下文
///
/// 持有一个在创建时构建完成的 [`EntityModel`]，构建闭包相当于 ORM 的
/// "模型创建" 回调，通常在其中调用 [`attach_entities_to_model`](crate::attach_entities_to_model)。
#[derive(Debug, Clone)]
pub struct ModelDbContext {
    name: String,
    model: EntityModel,
}

impl ModelDbContext {
    /// 使用现有模型创建上下文
    pub fn new(name: impl Into<String>, model: EntityModel) -> Self {
        Self {
            name: name.into(),
            model,
        }
    }

    /// 构建模型并创建上下文
    pub fn build<F>(name: impl Into<String>, configure: F) -> Result<Self, MappingError>
    where
        F: FnOnce(&mut EntityModel) -> Result<(), MappingError>,
    {
        let name = name.into();
        let mut model = EntityModel::new();
        configure(&mut model)?;
        info!("数据上下文 {} 模型构建完成，包含 {} 个实体类型", name, model.len());
        Ok(Self::new(name, model))
    }

    /// 上下文的内存模型
    pub fn entity_model(&self) -> &EntityModel {
        &self.model
    }
}

impl DbContext for ModelDbContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &dyn PersistenceModel {
        &self.model
    }
}
