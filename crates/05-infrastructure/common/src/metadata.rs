//! 元数据定义
//!
//! 提供类型和模块（crate）的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称（去除模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: String,
}

impl TypeInfo {
    /// 创建新的类型信息
    pub fn new(type_id: TypeId, full_name: impl Into<String>) -> Self {
        let module_path = full_name.into();
        Self {
            name: short_type_name(&module_path),
            id: type_id,
            module_path,
        }
    }

    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 检查是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 去掉类型名中每一段路径的模块前缀
///
/// `alloc::sync::Arc<dyn app::Repo<app::User, i64>>` -> `Arc<dyn Repo<User, i64>>`
pub fn short_type_name(full_name: &str) -> String {
    let mut out = String::with_capacity(full_name.len());
    let mut segment = String::new();

    for ch in full_name.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            push_last_segment(&mut out, &segment);
            segment.clear();
            out.push(ch);
        }
    }
    push_last_segment(&mut out, &segment);

    out
}

fn push_last_segment(out: &mut String, path: &str) {
    if let Some(last) = path.rsplit("::").next() {
        out.push_str(last);
    }
}

/// 模块信息
///
/// 一个模块对应一个向类型目录提交实体描述符的 crate。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleInfo {
    /// crate 名称
    pub name: String,
    /// crate 版本
    pub version: String,
}

impl ModuleInfo {
    /// 创建新的模块信息
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// 模块全名，形如 `my-crate v0.1.0`
    pub fn full_name(&self) -> String {
        format!("{} v{}", self.name, self.version)
    }

    /// 按名称子串过滤模块
    ///
    /// 过滤条件为空或仅含空白时匹配所有模块。
    pub fn matches(&self, filter: Option<&str>) -> bool {
        match filter {
            Some(needle) if !needle.trim().is_empty() => self.full_name().contains(needle),
            _ => true,
        }
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}
