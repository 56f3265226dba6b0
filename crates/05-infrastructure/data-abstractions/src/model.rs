//! 持久化模型抽象
//!
//! 对应 ORM 的内存模型：记录哪些实体类型参与映射。

use infrastructure_common::{ModelError, TypeInfo};
use std::any::TypeId;

/// 模型中的实体类型条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    /// 实体类型
    pub type_info: TypeInfo,
    /// 主键类型
    pub key: Option<TypeInfo>,
    /// 表名
    pub table_name: String,
}

impl EntityType {
    /// 创建实体类型条目，表名取类型名的 snake_case 形式
    pub fn new(type_info: TypeInfo, key: Option<TypeInfo>) -> Self {
        let table_name = to_snake_case(type_info.short_name());
        Self {
            type_info,
            key,
            table_name,
        }
    }

    /// 设置表名
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }
}

/// 持久化模型 trait
pub trait PersistenceModel: Send + Sync {
    /// 查找实体类型
    fn find_entity_type(&self, type_id: TypeId) -> Option<&EntityType>;

    /// 添加实体类型，已存在时返回错误
    fn add_entity_type(&mut self, entity_type: EntityType) -> Result<&EntityType, ModelError>;

    /// 所有实体类型，按添加顺序
    fn entity_types(&self) -> Vec<&EntityType>;

    /// 是否已包含实体类型
    fn contains(&self, type_id: TypeId) -> bool {
        self.find_entity_type(type_id).is_some()
    }
}

/// `OrderLine` -> `order_line`
fn to_snake_case(name: &str) -> String {
    let base = name.split('<').next().unwrap_or(name);
    let mut out = String::with_capacity(base.len() + 4);
    let chars: Vec<char> = base.chars().collect();

    for (i, ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(*ch);
        }
    }

    out
}
