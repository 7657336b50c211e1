use colored::*;
use harmony_client_core::{Error as CoreError, UpstreamError};
use std::error::Error as StdError;
use std::fmt;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    General,
    Misuse,
    Upstream,
    NotFound,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    GeneralError = 1,
    Misuse = 2,
    UpstreamError = 3,
    NotFound = 4,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    fn new(category: ErrorCategory, message: &str) -> Self {
        Self {
            message: message.to_string(),
            category,
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(ErrorCategory::General, message)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(ErrorCategory::Misuse, message);
        error
            .suggestions
            .push("Run 'baton --help' for usage information".to_string());
        error
    }

    /// Create an upstream error
    pub fn upstream(message: &str) -> Self {
        Self::new(ErrorCategory::Upstream, message)
    }

    /// Create a not-found error
    pub fn not_found(message: &str) -> Self {
        Self::new(ErrorCategory::NotFound, message)
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with what was being attempted
    pub fn with_context(mut self, context: &str) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    pub fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Upstream => ExitCode::UpstreamError,
            ErrorCategory::NotFound => ExitCode::NotFound,
        }
    }

    /// Format the error for user display
    ///
    /// A single line normally; `debug` adds the cause chain and suggestions.
    pub fn format_for_user(&self, debug: bool) -> String {
        let prefix = match self.category {
            ErrorCategory::General => "Error".red(),
            ErrorCategory::Misuse => "Usage Error".yellow(),
            ErrorCategory::Upstream => "Upstream Error".red(),
            ErrorCategory::NotFound => "Not Found".red(),
        };

        let mut output = format!("{}: {}\n", prefix, self.message);

        if !debug {
            return output;
        }

        if let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  - {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            match self.category {
                ErrorCategory::General => "Error",
                ErrorCategory::Misuse => "Usage Error",
                ErrorCategory::Upstream => "Upstream Error",
                ErrorCategory::NotFound => "Not Found",
            },
            self.message
        )
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Map library errors onto categories
impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();
        match &error {
            CoreError::Validation(_) => Self::misuse(&message),
            CoreError::NotFound { .. } => Self::not_found(&message),
            CoreError::Upstream(upstream) => {
                let mut cli_error = Self::upstream(&message);
                if upstream.is_transient() {
                    cli_error = cli_error
                        .with_suggestion("Check that the maestro is reachable (--harmony-api)");
                }
                if matches!(upstream, UpstreamError::Transport { .. }) {
                    cli_error = cli_error.with_suggestion(
                        "Use --noverifyssl if the maestro uses a self-signed certificate",
                    );
                }
                cli_error.with_source(Box::new(error))
            }
        }
    }
}

/// Convert anyhow errors to CLI errors
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::general(&format!("{error:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmony_client_core::{ResourceKind, ValidationError};

    #[test]
    fn test_validation_maps_to_misuse() {
        let error = CliError::from(CoreError::from(ValidationError::missing_field("image")));

        assert_eq!(error.category(), ErrorCategory::Misuse);
        assert_eq!(error.exit_code(), ExitCode::Misuse);
        assert_eq!(error.message(), "image is required");
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let error = CliError::from(CoreError::not_found(ResourceKind::Container, "web-9"));

        assert_eq!(error.exit_code(), ExitCode::NotFound);
        assert_eq!(error.message(), "[404] Container not found [web-9]");
    }

    #[test]
    fn test_upstream_maps_to_upstream_with_source() {
        let error = CliError::from(CoreError::from(UpstreamError::transport("refused")));

        assert_eq!(error.exit_code(), ExitCode::UpstreamError);
        assert!(error.source().is_some());
        assert_eq!(error.suggestions.len(), 2);
    }

    #[test]
    fn test_with_context_prefixes_message() {
        let error = CliError::upstream("Harmony API error: 500 - boom")
            .with_context("Error encountered while attempting to create new container");

        assert_eq!(
            error.message(),
            "Error encountered while attempting to create new container: Harmony API error: 500 - boom"
        );
    }

    #[test]
    fn test_format_for_user_is_one_line_without_debug() {
        colored::control::set_override(false);
        let error = CliError::from(CoreError::from(UpstreamError::transport("refused")));

        let formatted = error.format_for_user(false);
        assert_eq!(formatted.lines().count(), 1);
        assert!(formatted.starts_with("Upstream Error: "));

        let verbose = error.format_for_user(true);
        assert!(verbose.contains("Caused by:"));
        assert!(verbose.contains("Suggestions:"));
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::GeneralError as i32, 1);
        assert_eq!(ExitCode::Misuse as i32, 2);
        assert_eq!(ExitCode::UpstreamError as i32, 3);
        assert_eq!(ExitCode::NotFound as i32, 4);
    }
}
