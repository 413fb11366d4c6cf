//! Validation Engine
//!
//! Core validation logic separated from parsing and CLI concerns.

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::alias::EnvVarResolver;
use crate::model::ConfigKind;
use crate::xml::{Element, parse_document};

use super::rules;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One validation observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// Part of the configuration the finding is about (e.g. "Collector")
    pub component: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<String>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        component: impl Into<String>,
        message: impl Into<String>,
        fix_suggestion: Option<String>,
    ) -> Self {
        Self {
            severity,
            component: component.into(),
            message: message.into(),
            fix_suggestion,
        }
    }
}

/// Findings of one validation run, grouped by severity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(
        &mut self,
        component: impl Into<String>,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) {
        self.push(Finding::new(
            Severity::Error,
            component,
            message,
            Some(fix.into()),
        ));
    }

    pub fn add_warning(
        &mut self,
        component: impl Into<String>,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) {
        self.push(Finding::new(
            Severity::Warning,
            component,
            message,
            Some(fix.into()),
        ));
    }

    pub fn add_info(&mut self, component: impl Into<String>, message: impl Into<String>) {
        self.push(Finding::new(Severity::Info, component, message, None));
    }

    /// File a finding under the list matching its severity
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Info => self.info.push(finding),
        }
    }

    /// A configuration is valid when it has no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All findings, errors first
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 4)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("info", &self.info)?;
        state.end()
    }
}

/// Validates parsed configuration trees against an environment snapshot
#[derive(Debug, Clone, Default)]
pub struct Validator {
    env: EnvVarResolver,
}

impl Validator {
    pub fn new(env: EnvVarResolver) -> Self {
        Self { env }
    }

    pub fn from_process_env() -> Self {
        Self::new(EnvVarResolver::from_process_env())
    }

    /// Validate a parsed configuration tree as the given kind
    pub fn validate(&self, root: &Element, kind: ConfigKind) -> ValidationResult {
        log::debug!("validating <{}> as {:?} config", root.name, kind);
        let mut result = ValidationResult::new();

        rules::check_root(root, kind, &mut result);
        match kind {
            ConfigKind::Agent => rules::check_agent(root, &self.env, &mut result),
            ConfigKind::Hub => {
                rules::check_environment(root, &self.env, &mut result);
                rules::check_hub(root, &mut result);
            }
            ConfigKind::Dashboard => {
                rules::check_environment(root, &self.env, &mut result);
                rules::check_dashboard(root, &mut result);
            }
        }

        log::debug!(
            "{} error(s), {} warning(s), {} info",
            result.errors.len(),
            result.warnings.len(),
            result.info.len()
        );
        result
    }

    /// Parse then validate; malformed XML becomes a single error finding
    pub fn validate_document(&self, xml: &str, kind: ConfigKind) -> ValidationResult {
        match parse_document(xml) {
            Ok(root) => self.validate(&root, kind),
            Err(e) => parse_failure(e),
        }
    }
}

/// Result for a document that could not be parsed
pub fn parse_failure(err: impl std::fmt::Display) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.add_error(
        "XML",
        format!("Failed to parse XML: {err}"),
        "Check XML syntax, ensure all tags are closed",
    );
    result
}

/// Validate a parsed tree against the current process environment
pub fn validate(root: &Element, kind: ConfigKind) -> ValidationResult {
    Validator::from_process_env().validate(root, kind)
}

/// Parse and validate a document against the current process environment
pub fn validate_document(xml: &str, kind: ConfigKind) -> ValidationResult {
    Validator::from_process_env().validate_document(xml, kind)
}
