use crate::error::ProviderError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A problem reported back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Attribute the problem is attached to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary)
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

/// Convert an operation error into diagnostics. Validation errors yield
/// one diagnostic per offending attribute.
pub fn from_error(err: &ProviderError) -> Vec<Diagnostic> {
    match err {
        ProviderError::Validation { fields } => fields
            .iter()
            .map(|field| {
                Diagnostic::error("Invalid attribute value")
                    .with_detail(format!("{}: {}", field.attribute, field.reason))
                    .with_attribute(field.attribute.clone())
            })
            .collect(),
        ProviderError::StateWrite { attribute, .. } => {
            vec![Diagnostic::error(err.to_string()).with_attribute(attribute.clone())]
        }
        _ => vec![Diagnostic::error(err.to_string())],
    }
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}
