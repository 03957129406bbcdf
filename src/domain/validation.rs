use serde::Serialize;

use super::DocumentStats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: DocumentStats,
}

impl ValidationResult {
    pub fn new(stats: DocumentStats) -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
            warnings: Vec::new(),
            stats,
        }
    }

    pub fn reject(&mut self, issue: impl Into<String>) {
        self.is_valid = false;
        self.issues.push(issue.into());
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
