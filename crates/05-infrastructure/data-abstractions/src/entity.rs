//! 实体契约定义

use crate::reflection::{ContractDefinition, ContractId};

/// 标识契约
///
/// 表示实现类型拥有类型为 `K` 的主键。一个类型可以为多个 `K` 实现该契约，
/// 自动注册时取声明顺序中的第一个。
pub trait Entity<K>: Send + Sync + 'static
where
    K: 'static,
{
}

/// 唯一主键
///
/// 只声明了一个主键类型的实体会自动实现此 trait，
/// 未声明主键的派生实体通过它沿用第一个基类型的主键。
pub trait PrimaryKey {
    /// 主键类型
    type Key: 'static;
}

/// 排除标记
///
/// 带有此标记的类型即使满足标识契约也不会被自动映射。
pub trait NotMapped {}

/// 标识契约 `Entity<K>` 的泛型定义
#[derive(Debug)]
pub enum IdentityContract {}

impl ContractDefinition for IdentityContract {
    const NAME: &'static str = "Entity<K>";
}

/// 标识契约的泛型定义 ID
pub fn identity_contract() -> ContractId {
    ContractId::definition::<IdentityContract>()
}
