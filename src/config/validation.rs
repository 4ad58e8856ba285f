use super::logging::{LogConfig, SinkKind};
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}
pub struct ConfigValidator;
impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }
    pub fn validate_log_config(&self, config: &LogConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        self.validate_target(&config.target, &mut errors);
        self.validate_verbosity(config, &mut errors, &mut warnings);
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
    fn validate_target(&self, target: &str, errors: &mut Vec<ValidationError>) {
        if target.trim().is_empty() {
            errors
                .push(ValidationError {
                    field: "target".to_string(),
                    message: "Log target cannot be empty".to_string(),
                    suggestion: Some("Use the crate name, e.g. \"catchwrap\"".to_string()),
                });
        } else if target.chars().any(char::is_whitespace) {
            errors
                .push(ValidationError {
                    field: "target".to_string(),
                    message: format!("Log target contains whitespace: {:?}", target),
                    suggestion: Some(
                        "Use a module-style path such as \"app::jobs\"".to_string(),
                    ),
                });
        }
    }
    fn validate_verbosity(
        &self,
        config: &LogConfig,
        errors: &mut Vec<ValidationError>,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        if config.verbosity > 3 {
            errors
                .push(ValidationError {
                    field: "verbosity".to_string(),
                    message: format!("Verbosity must be between 0-3, got {}", config.verbosity),
                    suggestion: Some("Set verbosity to 3 for trace output".to_string()),
                });
        }
        if config.sink == SinkKind::Stderr && config.verbosity > 0 {
            warnings
                .push(ValidationWarning {
                    field: "verbosity".to_string(),
                    message: "Verbosity has no effect on the raw stderr sink".to_string(),
                    suggestion: Some(
                        "Use the \"structured\" or \"auto\" sink to filter by level"
                            .to_string(),
                    ),
                });
        }
    }
}
impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
