use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 語言清單不可為空、不可有空白項目或重複項目
pub fn validate_languages(field_name: &str, languages: &[String]) -> Result<()> {
    if languages.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for language in languages {
        validate_non_empty_string(field_name, language)?;
        if !seen.insert(language.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: language.clone(),
                reason: "Language is listed more than once".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    for value in values {
        if !allowed.contains(&value.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
            });
        }
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EtlError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
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
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("headhunter.endpoint", "https://api.hh.ru/vacancies").is_ok());
        assert!(validate_url("headhunter.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("headhunter.endpoint", "").is_err());
        assert!(validate_url("headhunter.endpoint", "invalid-url").is_err());
        assert!(validate_url("headhunter.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_languages() {
        let languages = vec!["Python".to_string(), "C#".to_string()];
        assert!(validate_languages("survey.languages", &languages).is_ok());
        assert!(validate_languages("survey.languages", &[]).is_err());

        let blank = vec!["Python".to_string(), "  ".to_string()];
        assert!(validate_languages("survey.languages", &blank).is_err());

        let duplicated = vec!["Go".to_string(), "Go".to_string()];
        assert!(validate_languages("survey.languages", &duplicated).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("per_page", 100u32, 1, 100).is_ok());
        assert!(validate_range("per_page", 0u32, 1, 100).is_err());
        assert!(validate_range("per_page", 101u32, 1, 100).is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_allowed_values("load.output_formats", &formats, &["csv", "json"]).is_ok());

        let invalid = vec!["xlsx".to_string()];
        assert!(validate_allowed_values("load.output_formats", &invalid, &["csv", "json"]).is_err());
    }
}
