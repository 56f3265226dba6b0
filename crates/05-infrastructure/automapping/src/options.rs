//! 自动映射配置

use infrastructure_common::{ConfigError, ConfigLoader};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 环境变量前缀，如 `AUTOMAPPING_MODEL_ASSEMBLY_NAME`
pub const ENV_PREFIX: &str = "AUTOMAPPING";

/// 自动映射配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoMappingOptions {
    /// 模块名过滤（子串匹配），为空时扫描所有模块
    pub model_assembly_name: Option<String>,
    /// 是否把实体类型挂到持久化模型
    pub attach_to_model: bool,
    /// 是否注册泛型仓储
    pub register_repositories: bool,
}

impl Default for AutoMappingOptions {
    fn default() -> Self {
        Self {
            model_assembly_name: None,
            attach_to_model: true,
            register_repositories: true,
        }
    }
}

impl AutoMappingOptions {
    /// 从可选的配置文件与环境变量加载
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = path {
            loader = loader.with_file(path);
        }
        loader.with_env_prefix(ENV_PREFIX).load()
    }

    /// 模块名过滤条件
    pub fn filter(&self) -> Option<&str> {
        self.model_assembly_name.as_deref()
    }

    /// 设置模块名过滤条件
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.model_assembly_name = Some(filter.into());
        self
    }
}
