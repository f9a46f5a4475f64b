use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Storage operation '{operation}' failed for '{target}': {message}")]
    StorageOperationFailed {
        operation: String,
        target: String,
        message: String,
    },

    #[error("Cannot read source '{source_name}': {message}")]
    SourceUnreadable {
        source_name: String,
        message: String,
    },

    #[error("Invalid domain: {domain}")]
    InvalidDomain { domain: String },

    #[error("Unsupported export format: {format}")]
    UnsupportedExportFormat { format: String },

    #[error("Nothing to export for project '{project}'")]
    EmptyExport { project: String },

    #[error("Invalid project name: '{name}'")]
    InvalidProjectName { name: String },

    #[error("Project '{project}' does not exist")]
    ProjectNotFound { project: String },

    #[error("Pretty printer failed: {message}")]
    FormatterFailed { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Input,
    Export,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReconError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReconError::StorageUnavailable { .. } | ReconError::StorageOperationFailed { .. } => {
                ErrorCategory::Storage
            }
            ReconError::SourceUnreadable { .. }
            | ReconError::InvalidDomain { .. }
            | ReconError::InvalidProjectName { .. }
            | ReconError::ProjectNotFound { .. } => ErrorCategory::Input,
            ReconError::UnsupportedExportFormat { .. }
            | ReconError::EmptyExport { .. }
            | ReconError::FormatterFailed { .. } => ErrorCategory::Export,
            ReconError::ConfigError { .. } | ReconError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ReconError::IoError(_) | ReconError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReconError::InvalidDomain { .. } | ReconError::FormatterFailed { .. } => {
                ErrorSeverity::Low
            }
            ReconError::StorageOperationFailed { .. } => ErrorSeverity::Medium,
            ReconError::StorageUnavailable { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 錯誤是否只影響單一行 (管道可以略過並繼續)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReconError::StorageOperationFailed { .. } | ReconError::InvalidDomain { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReconError::StorageUnavailable { .. } => {
                "Check that the Redis server is running and reachable with the configured host/port"
            }
            ReconError::StorageOperationFailed { .. } => "Retry the operation; the store rejected a single command",
            ReconError::SourceUnreadable { .. } => "Make sure the input file exists and is readable",
            ReconError::InvalidDomain { .. } => "Fix the domain or re-run with --no-validate",
            ReconError::UnsupportedExportFormat { .. } => "Use --format text or --format json",
            ReconError::EmptyExport { .. } => "Add domains to the project before exporting",
            ReconError::InvalidProjectName { .. } => "Pass a non-empty project name with -p",
            ReconError::ProjectNotFound { .. } => "Run `reconset projects` to list existing projects",
            ReconError::FormatterFailed { .. } => "Check the [printer] command in the configuration file",
            ReconError::ConfigError { .. } | ReconError::InvalidConfigValueError { .. } => {
                "Review the configuration file and REDIS_* environment variables"
            }
            ReconError::IoError(_) => "Check file permissions and available disk space",
            ReconError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReconError::StorageUnavailable { .. } => {
                "Could not reach the domain store. Is Redis running?".to_string()
            }
            ReconError::EmptyExport { project } => {
                format!("Project '{}' has no domains; nothing was exported", project)
            }
            ReconError::ProjectNotFound { project } => {
                format!("No domains exist for project '{}'", project)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_drives_exit_codes() {
        let unavailable = ReconError::StorageUnavailable {
            message: "refused".to_string(),
        };
        let failed = ReconError::StorageOperationFailed {
            operation: "SADD".to_string(),
            target: "example.com".to_string(),
            message: "WRONGTYPE".to_string(),
        };

        assert_eq!(unavailable.severity(), ErrorSeverity::Critical);
        assert_eq!(failed.severity(), ErrorSeverity::Medium);
        assert!(failed.is_recoverable());
        assert!(!unavailable.is_recoverable());
        assert_eq!(unavailable.category(), ErrorCategory::Storage);
    }

    #[test]
    fn test_user_friendly_message_for_empty_export() {
        let err = ReconError::EmptyExport {
            project: "acme".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Project 'acme' has no domains; nothing was exported"
        );
        assert_eq!(err.category(), ErrorCategory::Export);
    }
}
