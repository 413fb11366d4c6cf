//! Text Report
//!
//! Bullet-style rendering of a [`ValidationResult`].

use std::fmt;

use super::engine::{Finding, ValidationResult};

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, &format!("❌ {} Error(s):", self.errors.len()), &self.errors)?;
        write_section(
            f,
            &format!("⚠️  {} Warning(s):", self.warnings.len()),
            &self.warnings,
        )?;
        write_section(f, &format!("ℹ️  {} Info:", self.info.len()), &self.info)?;

        if self.is_valid() {
            writeln!(f, "✓ Configuration is valid")
        } else {
            writeln!(f, "✗ Configuration is invalid")
        }
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, heading: &str, findings: &[Finding]) -> fmt::Result {
    if findings.is_empty() {
        return Ok(());
    }

    writeln!(f, "{heading}")?;
    for finding in findings {
        writeln!(f, "  • {}", finding.message)?;
        if let Some(fix) = &finding.fix_suggestion {
            writeln!(f, "    Fix: {fix}")?;
        }
    }
    writeln!(f)
}
