use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub report: ReportConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 流水存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// 落盘到 `data_dir/flows.db`
    Sqlite,
    /// 进程内存，重启即丢失 (开发调试用)
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 报表右上角的固定抬头
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `RUST_LOG` 未设置时使用的过滤表达式
    pub level: String,
    /// 日志文件目录，为空时只输出到终端
    pub dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                backend: StoreBackend::Sqlite,
                data_dir: "data".to_string(),
            },
            report: ReportConfig::default(),
            log: LogConfig {
                level: "info,tower_http=info".to_string(),
                dir: None,
            },
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            caption: "INVENTORY FLOW SYSTEM".to_string(),
        }
    }
}

impl ServerConfig {
    /// 监听地址，形如 `0.0.0.0:3000`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.database.backend, StoreBackend::Sqlite);
        assert_eq!(config.database.data_dir, "data");
        assert_eq!(config.report.caption, "INVENTORY FLOW SYSTEM");
        assert!(config.log.dir.is_none());
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: StoreBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(backend, StoreBackend::Memory);
    }
}
