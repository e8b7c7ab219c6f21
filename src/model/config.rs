//! 配置：远端地址、下载目录与命名策略
//!
//! 读取顺序：默认值 → JSON 配置文件 → 环境变量覆盖。配置只读，不回写。

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{catalog::ConversionType, download::ExtensionPolicy};
use crate::utils::fs::read_json_file;

pub const DEFAULT_ENDPOINT: &str = "https://file-converter-backend-jl7o.onrender.com";

pub const ENV_CONFIG_PATH: &str = "FILE_CONVERTER_CONFIG";
pub const ENV_ENDPOINT: &str = "FILE_CONVERTER_ENDPOINT";
pub const ENV_DOWNLOAD_DIR: &str = "FILE_CONVERTER_DOWNLOAD_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("读取配置文件失败 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("无效的服务地址 '{0}'：需要 http(s) URL")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub endpoint: String,
    pub download_dir: Option<PathBuf>,
    pub extension_policy: ExtensionPolicy,
    pub default_conversion: ConversionType,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            download_dir: None,
            extension_policy: ExtensionPolicy::default(),
            default_conversion: ConversionType::default(),
        }
    }
}

impl ConverterConfig {
    /// 从进程环境加载
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path(std::env::var_os(ENV_CONFIG_PATH));
        Self::load_from(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// 可注入文件路径与环境变量来源，便于测试
    pub fn load_from(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => {
                tracing::info!("读取配置文件: {}", path.display());
                read_json_file(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Self::default(),
        };

        if let Some(endpoint) = env(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(dir) = env(ENV_DOWNLOAD_DIR).filter(|v| !v.trim().is_empty()) {
            config.download_dir = Some(PathBuf::from(dir));
        }

        config.endpoint_url()?;
        Ok(config)
    }

    /// 解析并校验服务地址
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|_| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::InvalidEndpoint(self.endpoint.clone())),
        }
    }

    /// 下载目录：配置值 → 系统下载目录 → 当前目录
    pub fn resolve_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// 配置文件位置：`FILE_CONVERTER_CONFIG`（空值视为未设置）→ 用户配置目录中已存在的文件
fn config_path(env_value: Option<OsString>) -> Option<PathBuf> {
    env_value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            dirs::config_dir()
                .map(|d| d.join("file-converter").join("config.json"))
                .filter(|p| p.is_file())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::load_from(None, no_env).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.extension_policy, ExtensionPolicy::LastSegment);
        assert_eq!(config.default_conversion, ConversionType::PdfToExcel);
        assert!(config.download_dir.is_none());
    }

    #[test]
    fn test_file_values_with_partial_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"endpoint": "http://localhost:8080/convert", "extension_policy": "corrected"}"#,
        )
        .unwrap();

        let config = ConverterConfig::load_from(Some(&path), no_env).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/convert");
        assert_eq!(config.extension_policy, ExtensionPolicy::Corrected);
        assert_eq!(config.default_conversion, ConversionType::PdfToExcel, "缺省字段应取默认值");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"endpoint": "http://from-file/", "download_dir": "/from/file", "default_conversion": "mp3-to-wav"}"#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_ENDPOINT, "https://from-env.example/api"),
            (ENV_DOWNLOAD_DIR, "/from/env"),
        ]);
        let config =
            ConverterConfig::load_from(Some(&path), |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.endpoint, "https://from-env.example/api");
        assert_eq!(config.download_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(config.default_conversion, ConversionType::Mp3ToWav);
        assert_eq!(config.resolve_download_dir(), PathBuf::from("/from/env"));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = ConverterConfig::load_from(None, |k| {
            (k == ENV_ENDPOINT).then(|| "ftp://example.com".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint(_))));

        let result = ConverterConfig::load_from(None, |k| {
            (k == ENV_ENDPOINT).then(|| "not a url".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_unknown_conversion_in_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_conversion": "docx-to-epub"}"#).unwrap();

        let result = ConverterConfig::load_from(Some(&path), no_env);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_empty_config_env_is_ignored() {
        assert_ne!(
            config_path(Some(OsString::new())),
            Some(PathBuf::from("")),
            "空的配置路径不应被当作文件"
        );
        assert_eq!(
            config_path(Some(OsString::from("/etc/fc.json"))),
            Some(PathBuf::from("/etc/fc.json"))
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = ConverterConfig::load_from(Some(&dir.path().join("absent.json")), no_env);
        assert!(result.is_err(), "显式指定但不存在的配置文件应报错");
    }
}
