//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Upper bound on any network timeout.
const MAX_TIMEOUT_SECONDS: u64 = 60;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert into a hard error carrying the first problem.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(ConfigError::InvalidValue {
                field: first.path,
                message: first.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_upstream(config, &mut result);
        Self::validate_relay(config, &mut result);
        Self::validate_reader(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_upstream(config: &Config, result: &mut ValidationResult) {
        let upstream = &config.upstream;
        for (path, value) in [
            ("upstream.api_base", &upstream.api_base),
            ("upstream.site_base", &upstream.site_base),
            ("upstream.covers_base", &upstream.covers_base),
        ] {
            Self::check_http_url(path, value, result);
        }

        Self::check_timeout("upstream.timeout_seconds", upstream.timeout_seconds, result);
        Self::check_timeout(
            "upstream.chapter_timeout_seconds",
            upstream.chapter_timeout_seconds,
            result,
        );

        if upstream.language.is_empty() {
            result.add_error(ValidationError::new(
                "upstream.language",
                "language cannot be empty",
            ));
        }
    }

    fn validate_relay(config: &Config, result: &mut ValidationResult) {
        let relay = &config.relay;
        if !relay.public_base.is_empty() {
            Self::check_http_url("relay.public_base", &relay.public_base, result);
        }

        Self::check_timeout("relay.image_timeout_seconds", relay.image_timeout_seconds, result);

        if relay.allowed_image_hosts.is_empty() {
            result.add_warning(ValidationWarning::new(
                "relay.allowed_image_hosts",
                "No image host allowlist, the image relay will fetch any URL",
            ));
        }

        if relay.allowed_image_hosts.iter().any(|h| h.contains('/')) {
            result.add_error(ValidationError::new(
                "relay.allowed_image_hosts",
                "Entries must be host names, not URLs",
            ));
        }
    }

    fn validate_reader(config: &Config, result: &mut ValidationResult) {
        let reader = &config.reader;
        Self::check_http_url("reader.relay_url", &reader.relay_url, result);
        Self::check_timeout(
            "reader.gateway_timeout_seconds",
            reader.gateway_timeout_seconds,
            result,
        );

        if reader.swipe_threshold <= 0.0 {
            result.add_error(ValidationError::new(
                "reader.swipe_threshold",
                "swipe_threshold must be positive",
            ));
        }
    }

    fn check_http_url(path: &str, value: &str, result: &mut ValidationResult) {
        match url::Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => result.add_error(ValidationError::new(
                path,
                "must be an absolute http:// or https:// URL",
            )),
        }
    }

    fn check_timeout(path: &str, seconds: u64, result: &mut ValidationResult) {
        if seconds == 0 {
            result.add_error(ValidationError::new(path, "timeout must be greater than 0"));
        } else if seconds > MAX_TIMEOUT_SECONDS {
            result.add_error(ValidationError::new(
                path,
                format!("timeout must be at most {} seconds", MAX_TIMEOUT_SECONDS),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
