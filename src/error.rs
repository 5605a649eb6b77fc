//! Error types for plan loading and validation

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Machine-readable category of a plan validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyOrMalformedOrdering,
    DuplicateSectionType,
    UnknownSectionType,
    InvalidVariant,
    MissingRequiredProps,
    MalformedProps,
    UnknownLayoutVariantKey,
    InvalidPlanShape,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyOrMalformedOrdering => "EmptyOrMalformedOrdering",
            ErrorKind::DuplicateSectionType => "DuplicateSectionType",
            ErrorKind::UnknownSectionType => "UnknownSectionType",
            ErrorKind::InvalidVariant => "InvalidVariant",
            ErrorKind::MissingRequiredProps => "MissingRequiredProps",
            ErrorKind::MalformedProps => "MalformedProps",
            ErrorKind::UnknownLayoutVariantKey => "UnknownLayoutVariantKey",
            ErrorKind::InvalidPlanShape => "InvalidPlanShape",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while validating a redesign plan against the template registry.
///
/// None of these are retryable: the plan itself has to change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The plan or the companion analysis is not an object
    #[error("invalid plan shape: {reason}")]
    InvalidPlanShape { reason: String },

    /// `sectionOrdering` is missing, not an array of strings, or empty
    #[error("sectionOrdering must be a non-empty array of section types: {reason}")]
    EmptyOrMalformedOrdering { reason: String },

    /// One or more section types appear more than once
    #[error(
        "duplicate section types in sectionOrdering: {} (each section type may appear only once)",
        duplicates.join(", ")
    )]
    DuplicateSectionType { duplicates: Vec<String> },

    /// A section type that the registry does not know
    #[error("unknown section type '{section_type}' (known types: {})", known.join(", "))]
    UnknownSectionType {
        section_type: String,
        known: Vec<String>,
    },

    /// An explicitly requested variant that the registry entry does not list
    #[error(
        "invalid variant '{requested}' for section '{section_type}' (valid variants: {}; default: {default})",
        valid.join(", ")
    )]
    InvalidVariant {
        section_type: String,
        requested: String,
        valid: Vec<String>,
        default: String,
    },

    /// Required props absent or null
    #[error(
        "section '{section_type}' is missing required props: {} (provided: {})",
        missing.join(", "),
        format_provided(provided)
    )]
    MissingRequiredProps {
        section_type: String,
        missing: Vec<String>,
        provided: Vec<String>,
    },

    /// The resolved props value is not an object
    #[error("props for section '{section_type}' must be an object, found {found}")]
    MalformedProps { section_type: String, found: String },

    /// `layoutVariants` keys that never render
    #[error(
        "layoutVariants has keys not present in sectionOrdering: {}",
        keys.join(", ")
    )]
    UnknownLayoutVariantKey { keys: Vec<String> },
}

impl PlanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::InvalidPlanShape { .. } => ErrorKind::InvalidPlanShape,
            PlanError::EmptyOrMalformedOrdering { .. } => ErrorKind::EmptyOrMalformedOrdering,
            PlanError::DuplicateSectionType { .. } => ErrorKind::DuplicateSectionType,
            PlanError::UnknownSectionType { .. } => ErrorKind::UnknownSectionType,
            PlanError::InvalidVariant { .. } => ErrorKind::InvalidVariant,
            PlanError::MissingRequiredProps { .. } => ErrorKind::MissingRequiredProps,
            PlanError::MalformedProps { .. } => ErrorKind::MalformedProps,
            PlanError::UnknownLayoutVariantKey { .. } => ErrorKind::UnknownLayoutVariantKey,
        }
    }

    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidPlanShape {
            reason: reason.into(),
        }
    }

    pub fn malformed_ordering(reason: impl Into<String>) -> Self {
        Self::EmptyOrMalformedOrdering {
            reason: reason.into(),
        }
    }
}

fn format_provided(provided: &[String]) -> String {
    if provided.is_empty() {
        "none".to_string()
    } else {
        provided.join(", ")
    }
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors reading plan JSON text
#[derive(Debug, Error)]
pub enum PlanSourceError {
    #[error("JSON syntax error at line {line}, column {column}: {message}")]
    Syntax {
        span: Span,
        line: usize,
        column: usize,
        message: String,
    },
}

impl PlanSourceError {
    /// Build from a serde_json error, mapping its line/column back to a byte span
    pub fn from_json(err: &serde_json::Error, source: &str) -> Self {
        let line = err.line();
        let column = err.column();
        let offset = line_column_offset(source, line, column);
        let message = err.to_string();
        // serde_json appends " at line X column Y"; the report carries that already
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        PlanSourceError::Syntax {
            span: offset..(offset + 1).min(source.len()),
            line,
            column,
            message,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            PlanSourceError::Syntax { span, message, .. } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("invalid plan JSON")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Byte offset of a 1-based line and column (serde_json's convention)
fn line_column_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            let mut at = offset + col;
            while at > 0 && !source.is_char_boundary(at) {
                at -= 1;
            }
            return at;
        }
        offset += text.len();
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display_lists_all() {
        let err = PlanError::DuplicateSectionType {
            duplicates: vec!["features".to_string(), "hero".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("features, hero"));
        assert_eq!(err.kind().as_str(), "DuplicateSectionType");
    }

    #[test]
    fn test_missing_props_display_without_provided() {
        let err = PlanError::MissingRequiredProps {
            section_type: "hero".to_string(),
            missing: vec!["headline".to_string()],
            provided: vec![],
        };
        assert!(err.to_string().contains("provided: none"));
    }

    #[test]
    fn test_kind_matches_variant() {
        let err = PlanError::invalid_shape("plan is null");
        assert_eq!(err.kind(), ErrorKind::InvalidPlanShape);
        let err = PlanError::malformed_ordering("empty");
        assert_eq!(err.kind(), ErrorKind::EmptyOrMalformedOrdering);
    }

    #[test]
    fn test_line_column_offset() {
        let src = "{\n  \"a\": 1,\n  oops\n}";
        assert_eq!(line_column_offset(src, 1, 1), 0);
        assert_eq!(line_column_offset(src, 3, 3), 14);
    }

    #[test]
    fn test_source_error_from_json() {
        let src = "{\n  \"sectionOrdering\": [\n}";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let source_err = PlanSourceError::from_json(&err, src);
        let PlanSourceError::Syntax { line, .. } = &source_err;
        assert_eq!(*line, 3);
        let report = source_err.format(src, "plan.json");
        assert!(report.contains("invalid plan JSON"));
    }
}
