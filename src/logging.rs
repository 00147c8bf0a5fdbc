//! ログ設定
//!
//! データ品質の指摘（WARN）と処理の開始・終了（INFO）をログファイルに追記する。
//! `--verbose` 指定時は標準エラーにも同じ内容を出す。`RUST_LOG` があればそちらを優先する。

use crate::error::{KenshinError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 追記先のファイル
    pub log_file: PathBuf,
    /// 標準エラーにも出力し、DEBUGまで記録する
    pub verbose: bool,
}

impl LogConfig {
    pub fn new(log_file: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            log_file: log_file.into(),
            verbose,
        }
    }

    fn level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,kenshin_convert={level},kenshin_common={level}",
            level = level
        ))
    })
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| KenshinError::Config(format!("ログファイル名が不正です: {}", path.display())))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}

/// ログを初期化する
///
/// 戻り値のガードを保持している間、ファイルへの書き込みが行われる。
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(&config.log_file)?;
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    let stderr_layer = config.verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(build_env_filter(config.level()))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| KenshinError::Config(format!("ログ初期化エラー: {}", e)))?;

    Ok(guard)
}

/// 処理開始の記録
pub fn log_start(input: &Path, format: &str) {
    tracing::info!(input = %input.display(), format, "Start");
}

/// 処理終了の記録
pub fn log_finish(companies: usize, issues: usize) {
    tracing::info!(companies, issues, "Finish");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, file) = split_log_path(Path::new("log.txt")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, PathBuf::from("log.txt"));

        let (dir, file) = split_log_path(Path::new("/var/log/kenshin/run.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/kenshin"));
        assert_eq!(file, PathBuf::from("run.log"));
    }

    #[test]
    fn test_split_log_path_rejects_directory_only() {
        assert!(split_log_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_level() {
        assert_eq!(LogConfig::new("log.txt", false).level(), "info");
        assert_eq!(LogConfig::new("log.txt", true).level(), "debug");
    }
}
