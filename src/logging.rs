use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

const LOG_FILE_PREFIX: &str = "wordsim.log";

/// Keeps the background file writer alive; drop it last.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Diagnostics and malformed-line warnings go to stderr so stdout only
/// carries result tables. `config.log_dir` adds a daily rolling file.
pub fn init_tracing(config: &Config) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(log_dir) = &config.log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return None;
    };

    if let Err(err) = std::fs::create_dir_all(log_dir) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        tracing::warn!(dir = %log_dir.display(), error = %err, "file logging disabled");
        return None;
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX));
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Some(FileLogGuard { _guard: guard })
}
