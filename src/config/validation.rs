//! Configuration validation support.

use crate::error::ValidationError;

/// Trait for configuration validation.
///
/// Implemented by [`super::NotifierConfig`]; the builder runs it before
/// handing the configuration to the caller.
pub trait Validate {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Check that `value` is an absolute http(s) URL.
pub(crate) fn check_http_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::invalid_field(field, "is required"));
        return;
    }

    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::invalid_field(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::invalid_field(
            field,
            format!("not a valid URL: {}", e),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_http_url("sheet_url", value, &mut errors);
        errors
    }

    #[test]
    fn test_check_http_url() {
        assert!(check("https://docs.example.com/pub?output=tsv").is_empty());
        assert!(check("http://127.0.0.1:8080/sheet").is_empty());
        assert_eq!(check("").len(), 1);
        assert_eq!(check("ftp://example.com/sheet").len(), 1);
        assert_eq!(check("not a url").len(), 1);
    }
}
