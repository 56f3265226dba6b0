//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn ADSP 数据层基础设施的公共类型和工具。
//!
//! ## 核心内容
//!
//! - [`TypeInfo`] / [`ModuleInfo`] - 类型与模块元数据
//! - [`Lifetime`] / [`Scope`] - 服务生命周期
//! - [`MappingError`] 等 - 统一错误类型
//! - [`ConfigLoader`] - 基于 `config` crate 的配置加载
//! - [`logging::init_tracing`] - 日志初始化
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 启动期一次性完成发现与注册
//! - 约定优于配置

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod logging;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
