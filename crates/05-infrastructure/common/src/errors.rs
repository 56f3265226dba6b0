//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("服务未注册: {type_name}")]
    ServiceNotRegistered { type_name: String },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("服务类型不匹配: 期望 {expected}")]
    TypeMismatch { expected: String },

    #[error("作用域服务不能从根容器解析: {type_name}")]
    ScopeMismatch { type_name: String },
}

/// 持久化模型错误类型
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("实体类型已存在于模型中: {type_name}")]
    DuplicateEntityType { type_name: String },
}

/// 实体自动映射错误类型
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("实体定义无效: {type_name}, 原因: {reason}")]
    MalformedEntity { type_name: String, reason: String },

    #[error("模型映射失败: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("仓储注册失败: {source}")]
    Registration {
        #[from]
        source: DependencyError,
    },
}

impl MappingError {
    /// 创建实体定义无效错误
    pub fn malformed_entity(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEntity {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ModelResult<T> = Result<T, ModelError>;
pub type MappingResult<T> = Result<T, MappingError>;
