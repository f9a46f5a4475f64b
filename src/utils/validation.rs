use crate::utils::error::{ReconError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    let lowered = value.to_ascii_lowercase();
    if !allowed.contains(&lowered.as_str()) {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Project names become storage keys, so they must carry at least one
/// visible character and no whitespace or glob metacharacters.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '*' | '?' | '[' | ']'));
    if invalid {
        return Err(ReconError::InvalidProjectName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("redis.port", 6379u16, 1, 65535).is_ok());
        assert!(validate_range("redis.timeout_seconds", 0u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_one_of_is_case_insensitive() {
        let levels = ["trace", "debug", "info", "warn", "error"];
        assert!(validate_one_of("logging.level", "INFO", &levels).is_ok());
        assert!(validate_one_of("logging.level", "verbose", &levels).is_err());
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("acme-corp").is_ok());
        assert!(validate_project_name("bug_bounty.2024").is_ok());
        assert!(matches!(
            validate_project_name(""),
            Err(ReconError::InvalidProjectName { .. })
        ));
        assert!(validate_project_name("two words").is_err());
        assert!(validate_project_name("acme*").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("logging.file", "reconset.log").is_ok());
        assert!(validate_path("logging.file", "").is_err());
        assert!(validate_path("logging.file", "bad\0path").is_err());
        assert!(validate_non_empty_string("redis.host", "  ").is_err());
    }
}
