use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 查询出现语法错误时的处理方式
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxErrorPolicy {
    /// 作为失败返回，HTTP 层给出 400
    #[default]
    Reject,
    /// 记录日志后返回空结果
    Swallow,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PluginConfig {
    pub syntax_errors: SyntaxErrorPolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "cypher-plugin".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// 启动时载入的图数据文件（JSON）
    pub graph_file: Option<String>,
    /// 请求超时秒数，0 表示不限制
    pub request_timeout_secs: u64,
    pub plugin: PluginConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7474,
            graph_file: None,
            request_timeout_secs: 30,
            plugin: PluginConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 监听地址，形如 `127.0.0.1:7474`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
