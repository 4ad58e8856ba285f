pub mod logging;
pub mod validation;
pub use logging::{LogConfig, SinkKind};
pub use validation::{ConfigValidator, ValidationResult, ValidationError, ValidationWarning};
