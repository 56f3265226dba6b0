//! # Data Abstractions
//!
//! 数据访问抽象层，定义实体、仓储、持久化模型的核心契约，
//! 以及替代运行时反射的类型目录。
//!
//! ## 核心接口
//!
//! - [`Entity`] - 标识契约，表示"该类型拥有类型为 K 的主键"
//! - [`NotMapped`] - 排除标记
//! - [`Repository`] / [`DbContext`] - 仓储与数据上下文
//! - [`PersistenceModel`] - ORM 的内存模型描述
//! - [`EntityDescriptor`] / [`TypeCatalog`] - 编译期生成、启动前提交的类型描述

pub mod catalog;
pub mod entity;
pub mod model;
pub mod reflection;
pub mod repository;

pub use catalog::*;
pub use entity::*;
pub use model::*;
pub use reflection::*;
pub use repository::*;
