use flowtrack_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// 滚动日志文件名前缀
const LOG_FILE_PREFIX: &str = "flowtrack.log";

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. 过滤规则优先取 `RUST_LOG`，否则使用 `log.level`。
/// 2. 始终输出到终端；配置了 `log.dir` 时额外写入按天滚动的文件。
///
/// # Returns
/// 文件写入线程的守卫，调用方须持有到进程退出，否则尾部日志会丢失。
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
