//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::graph::ValidationMode;

/// Validation mode for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationModeArg {
    /// Stop at the first problem
    #[value(name = "fail-fast")]
    FailFast,
    /// Report every problem
    #[value(name = "collect-all")]
    CollectAll,
}

impl std::fmt::Display for ValidationModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail-fast"),
            Self::CollectAll => write!(f, "collect-all"),
        }
    }
}

impl From<ValidationModeArg> for ValidationMode {
    fn from(arg: ValidationModeArg) -> Self {
        match arg {
            ValidationModeArg::FailFast => ValidationMode::FailFast,
            ValidationModeArg::CollectAll => ValidationMode::CollectAll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_mode_conversion() {
        assert_eq!(
            ValidationMode::from(ValidationModeArg::FailFast),
            ValidationMode::FailFast
        );
        assert_eq!(
            ValidationMode::from(ValidationModeArg::CollectAll),
            ValidationMode::CollectAll
        );
        assert_eq!(ValidationModeArg::CollectAll.to_string(), "collect-all");
    }
}
