//! # Entity Macros
//!
//! 这个 crate 提供了实体描述符生成与自动注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`entity`] - 声明实体的主键、契约与基类型，并注册到全局类型目录
//! - [`not_mapped`] - 排除标记
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use entity_automapping::{entity, not_mapped};
//!
//! #[entity(key = i64, implements = dyn Auditable)]
//! pub struct Customer {
//!     pub id: i64,
//! }
//!
//! #[not_mapped]
//! #[entity(key = i64)]
//! pub struct CustomerView {
//!     pub id: i64,
//! }
//! ```
//!
//! 生成的代码引用 `::entity_automapping` 与 `ctor`，使用方需要同时依赖这两个 crate。

use proc_macro::TokenStream;

mod entity;
mod not_mapped;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 实体声明宏
///
/// 为每个主键类型实现 `Entity<K>`，只有一个主键时实现 `PrimaryKey`，
/// 并在程序启动前把实体描述符提交到全局类型目录。
///
/// # 参数
///
/// - `key = Type` - 主键类型，可重复，声明顺序即候选顺序
/// - `implements = Type` - 实现的非泛型契约（通常为 `dyn Trait`），可重复
/// - `extends = Type` - 基类型，可重复；未声明 `key` 时沿用第一个基类型的
///   `PrimaryKey::Key`，基类型需恰好声明一个主键
/// - `abstract` - 抽象类型，不会被扫描返回
/// - `not_mapped` - 排除标记，等价于 `#[not_mapped]`
/// - `name = "DisplayName"` - 自定义显示名称
///
/// # 示例
///
/// ```rust,ignore
/// #[entity(key = i64, extends = AuditedEntity)]
/// pub struct Customer {
///     pub id: i64,
/// }
/// ```
#[proc_macro_attribute]
pub fn entity(args: TokenStream, input: TokenStream) -> TokenStream {
    entity::entity_impl(args.into(), input.into()).into()
}

/// 排除标记宏
///
/// 实现 `NotMapped`。与 `#[entity]` 一起使用时，无论两者书写顺序如何，
/// 实体描述符都会带上排除标记。
#[proc_macro_attribute]
pub fn not_mapped(args: TokenStream, input: TokenStream) -> TokenStream {
    not_mapped::not_mapped_impl(args.into(), input.into()).into()
}
