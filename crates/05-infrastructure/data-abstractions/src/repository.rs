//! 仓储与数据上下文抽象

use crate::entity::Entity;
use crate::model::PersistenceModel;
use infrastructure_common::TypeInfo;
use std::any::TypeId;
use std::sync::Arc;

/// 数据上下文 trait
///
/// 对应 ORM 的 DbContext。查询执行与持久化由具体 ORM 负责，这里只暴露
/// 上下文身份以及其持久化模型。
pub trait DbContext: Send + Sync + 'static {
    /// 上下文名称
    fn name(&self) -> &str;

    /// 上下文的持久化模型
    fn model(&self) -> &dyn PersistenceModel;

    /// 实体类型是否已映射到模型
    fn is_mapped(&self, entity: TypeId) -> bool {
        self.model().contains(entity)
    }
}

/// 泛型仓储 trait
///
/// 自动注册为 `dyn Repository<E, K>` 服务契约。
pub trait Repository<E, K>: Send + Sync
where
    E: Entity<K>,
    K: 'static,
{
    /// 仓储所属的数据上下文
    fn context(&self) -> Arc<dyn DbContext>;

    /// 实体类型
    fn entity_type(&self) -> TypeInfo {
        TypeInfo::of::<E>()
    }

    /// 主键类型
    fn key_type(&self) -> TypeInfo {
        TypeInfo::of::<K>()
    }

    /// 实体是否已映射到上下文的模型
    fn is_mapped(&self) -> bool {
        self.context().is_mapped(TypeId::of::<E>())
    }
}
