use crate::utils::error::{Result, SolrError};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SolrError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.display().to_string();

    if path.as_os_str().is_empty() {
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: display,
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: display,
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: port.to_string(),
            reason: "Port must be between 1 and 65535".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_env_name(field_name: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Environment variable names cannot be empty or contain '=' or NUL"
                .to_string(),
        });
    }
    Ok(())
}

/// JVM heap 大小，例如 `512m`、`2g`
pub fn validate_heap_size(field_name: &str, value: &str) -> Result<()> {
    let valid = match value.char_indices().last() {
        Some((idx, unit)) if matches!(unit, 'k' | 'K' | 'm' | 'M' | 'g' | 'G') => {
            let digits = &value[..idx];
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    };

    if !valid {
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a number followed by k, m or g (e.g. 512m)".to_string(),
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
        return Err(SolrError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
