use crate::config::toml_config::PrinterConfig;
use crate::utils::error::{ReconError, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// External helper that turns newline-separated domains into a
/// subdomain/domain/suffix breakdown. Best effort: callers fall back to the
/// plain listing when it fails.
#[derive(Debug, Clone)]
pub struct PrettyPrinter {
    program: String,
    args: Vec<String>,
}

impl PrettyPrinter {
    pub fn new(config: &PrinterConfig) -> Self {
        Self {
            program: config.command.clone(),
            args: config.args.clone(),
        }
    }

    pub async fn render(&self, domains: &[String]) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ReconError::FormatterFailed {
                message: format!("cannot start '{}': {}", self.program, e),
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| ReconError::FormatterFailed {
            message: "stdin of pretty printer was not captured".to_string(),
        })?;

        let mut input = domains.join("\n");
        input.push('\n');

        // 另開任務寫入 stdin，避免輸出管線塞滿時互相等待
        let writer = tokio::spawn(async move { stdin.write_all(input.as_bytes()).await });

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(ReconError::FormatterFailed {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(ReconError::FormatterFailed {
                    message: format!("failed to send domains to '{}': {}", self.program, e),
                })
            }
            Err(e) => {
                return Err(ReconError::FormatterFailed {
                    message: format!("writer task failed: {}", e),
                })
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
