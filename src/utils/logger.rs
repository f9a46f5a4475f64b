use crate::config::toml_config::LoggingConfig;
use crate::utils::error::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 預設過濾規則: verbose 時開啟 debug，否則使用設定檔中的等級
pub fn default_directive(verbose: bool, level: &str) -> String {
    if verbose {
        "reconset=debug,info".to_string()
    } else {
        format!("reconset={}", level.to_ascii_lowercase())
    }
}

pub fn init_cli_logger(verbose: bool, logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, &logging.level)));

    // 檔案輸出與主控台相同，但不帶 ANSI 色碼
    let file_layer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    // stdout 保留給資料輸出 (print/count/projects)，日誌寫到 stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(file_layer)
        .init();

    Ok(())
}
