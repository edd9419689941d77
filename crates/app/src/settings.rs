use config::{Config, ConfigError, Environment, File};
use flowtrack_core::config::AppConfig;

/// 环境变量前缀，如 `FLOWTRACK__SERVER__PORT=8080`
const ENV_PREFIX: &str = "FLOWTRACK";
/// 指定配置文件路径的环境变量
const CONFIG_PATH_VAR: &str = "FLOWTRACK_CONFIG";
/// 默认配置文件 (扩展名由 `config` 自动识别)
const DEFAULT_CONFIG_FILE: &str = "config/flowtrack";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 优先级从低到高：内置默认值 → 配置文件 (可选) → `FLOWTRACK__*` 环境变量。
///
/// # Returns
/// 配置无法解析或反序列化时返回错误，进程应拒绝启动。
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    build(&path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build(path: &str, env: Environment) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(path).required(false))
        .add_source(env)
        .build()?
        .try_deserialize::<AppConfig>()
}
