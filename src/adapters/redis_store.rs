use crate::config::toml_config::RedisConfig;
use crate::domain::ports::DomainStore;
use crate::utils::error::{ReconError, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError, RedisResult};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

const SCAN_BATCH: usize = 500;

/// `DomainStore` backed by Redis sets, one key per project.
///
/// A project `p` lives under `{key_prefix}{p}`. Every command is bounded by
/// the configured timeout so an unreachable server surfaces as
/// `StorageUnavailable` instead of hanging.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    key_prefix: String,
    timeout: Duration,
}

impl RedisStore {
    /// 建立連線並以 PING 確認伺服器可用
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let url = config.connection_url()?;
        let client = redis::Client::open(url.as_str()).map_err(|e| ReconError::ConfigError {
            message: format!("Invalid Redis connection settings: {}", e),
        })?;

        let timeout = Duration::from_secs(config.timeout_seconds);
        let connection = match tokio::time::timeout(timeout, client.get_multiplexed_async_connection()).await {
            Ok(Ok(connection)) => connection,
            Ok(Err(e)) => {
                return Err(ReconError::StorageUnavailable {
                    message: format!("Failed to connect to Redis at {}:{}: {}", config.host, config.port, e),
                })
            }
            Err(_) => {
                return Err(ReconError::StorageUnavailable {
                    message: format!("Timed out connecting to Redis at {}:{}", config.host, config.port),
                })
            }
        };

        let store = Self {
            connection,
            key_prefix: config.key_prefix.clone(),
            timeout,
        };

        let mut con = store.connection.clone();
        let pong: String = store
            .run("PING", "server", redis::cmd("PING").query_async::<String>(&mut con))
            .await?;
        tracing::info!("Connected to Redis at {}:{} ({})", config.host, config.port, pong);

        Ok(store)
    }

    fn key(&self, project: &str) -> String {
        project_key(&self.key_prefix, project)
    }

    async fn run<T, F>(&self, operation: &str, target: &str, command: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(classify_error(operation, target, e)),
            Err(_) => Err(ReconError::StorageUnavailable {
                message: format!("{} timed out after {:?}", operation, self.timeout),
            }),
        }
    }
}

pub fn project_key(prefix: &str, project: &str) -> String {
    format!("{}{}", prefix, project)
}

/// SCAN MATCH pattern selecting every key under `prefix`.
pub fn scan_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

fn classify_error(operation: &str, target: &str, e: RedisError) -> ReconError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() {
        ReconError::StorageUnavailable {
            message: format!("{} failed: {}", operation, e),
        }
    } else {
        ReconError::StorageOperationFailed {
            operation: operation.to_string(),
            target: target.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl DomainStore for RedisStore {
    async fn add_domain(&self, project: &str, domain: &str) -> Result<usize> {
        let mut con = self.connection.clone();
        self.run("SADD", domain, con.sadd::<_, _, usize>(self.key(project), domain))
            .await
    }

    async fn remove_domain(&self, project: &str, domain: &str) -> Result<usize> {
        let mut con = self.connection.clone();
        self.run("SREM", domain, con.srem::<_, _, usize>(self.key(project), domain))
            .await
    }

    async fn get_domains(&self, project: &str) -> Result<HashSet<String>> {
        let mut con = self.connection.clone();
        self.run("SMEMBERS", project, con.smembers::<_, HashSet<String>>(self.key(project)))
            .await
    }

    async fn count_domains(&self, project: &str) -> Result<usize> {
        let mut con = self.connection.clone();
        self.run("SCARD", project, con.scard::<_, usize>(self.key(project)))
            .await
    }

    async fn project_exists(&self, project: &str) -> Result<bool> {
        let mut con = self.connection.clone();
        self.run("EXISTS", project, con.exists::<_, bool>(self.key(project)))
            .await
    }

    async fn delete_project(&self, project: &str) -> Result<usize> {
        let mut con = self.connection.clone();
        self.run("DEL", project, con.del::<_, usize>(self.key(project)))
            .await
    }

    async fn list_projects(&self) -> Result<HashSet<String>> {
        let pattern = scan_pattern(&self.key_prefix);
        let mut projects = HashSet::new();
        let mut cursor: u64 = 0;

        loop {
            let mut con = self.connection.clone();
            let (next, keys) = self
                .run(
                    "SCAN",
                    &pattern,
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(&pattern)
                        .arg("COUNT")
                        .arg(SCAN_BATCH)
                        .query_async::<(u64, Vec<String>)>(&mut con),
                )
                .await?;

            projects.extend(
                keys.iter()
                    .filter_map(|key| key.strip_prefix(self.key_prefix.as_str()))
                    .map(str::to_string),
            );

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_key() {
        assert_eq!(project_key("project:", "acme"), "project:acme");
        assert_eq!(project_key("", "acme"), "acme");
    }

    #[test]
    fn test_scan_pattern_escapes_glob_characters() {
        assert_eq!(scan_pattern("project:"), "project:*");
        assert_eq!(scan_pattern(""), "*");
        assert_eq!(scan_pattern("a*b?"), "a\\*b\\?*");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_storage_unavailable() {
        let config = RedisConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            timeout_seconds: 2,
            ..RedisConfig::default()
        };

        let err = RedisStore::connect(&config).await.err().unwrap();
        assert!(matches!(err, ReconError::StorageUnavailable { .. }));
    }
}
