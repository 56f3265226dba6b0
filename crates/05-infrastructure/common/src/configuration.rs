//! 配置加载
//!
//! 基于 `config` crate，将配置文件与环境变量合并后绑定到具体类型

use crate::errors::ConfigError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 配置加载器
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// 配置文件列表（路径, 是否必需），按添加顺序合并
    files: Vec<(PathBuf, bool)>,
    /// 环境变量前缀
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// 创建新的配置加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加必需的配置文件
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push((path.as_ref().to_path_buf(), true));
        self
    }

    /// 添加可选的配置文件
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push((path.as_ref().to_path_buf(), false));
        self
    }

    /// 设置环境变量前缀，如 `AUTOMAPPING` 对应 `AUTOMAPPING_MODEL_ASSEMBLY_NAME`
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 加载整个配置文档并绑定到类型
    pub fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let settings = self.build()?;
        settings.try_deserialize::<T>().map_err(|e| {
            error!("配置绑定失败: type={}, error={}", std::any::type_name::<T>(), e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })
    }

    /// 加载指定路径的配置节并绑定到类型
    pub fn load_section<T>(&self, path: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let settings = self.build()?;
        settings.get::<T>(path).map_err(|e| {
            error!("配置绑定失败: path={}, error={}", path, e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })
    }

    fn build(&self) -> Result<config::Config, ConfigError> {
        let mut builder = config::Config::builder();

        for (path, required) in &self.files {
            if *required && !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("添加配置文件: {} (required={})", path.display(), required);
            builder = builder.add_source(config::File::from(path.as_path()).required(*required));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        builder.build().map_err(|e| {
            error!("配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })
    }
}
