//! Verification issues and the report handed to the host for display

use std::fmt;

use serde::{Deserialize, Serialize};

/// One verification finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Element (and face) the issue is about
    pub name: String,
    /// What was observed
    pub observed: String,
    /// What was expected instead
    pub expected: String,
}

impl Issue {
    pub fn new(
        name: impl Into<String>,
        observed: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            observed: observed.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (Expected: {})", self.name, self.observed, self.expected)
    }
}

/// Outcome of a density verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Report {
    Ok {
        label: String,
        density: u32,
    },
    Issues {
        label: String,
        density: u32,
        issues: Vec<Issue>,
        /// How many issues are listed before summarizing the rest
        max_listed: usize,
    },
}

impl Report {
    /// Build a report from collected issues
    pub fn new(label: impl Into<String>, density: u32, issues: Vec<Issue>, max_listed: usize) -> Self {
        let label = label.into();
        if issues.is_empty() {
            Report::Ok { label, density }
        } else {
            Report::Issues {
                label,
                density,
                issues,
                max_listed,
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Report::Ok { .. })
    }

    /// All issues in discovery order
    pub fn issues(&self) -> &[Issue] {
        match self {
            Report::Ok { .. } => &[],
            Report::Issues { issues, .. } => issues,
        }
    }

    /// Issues shown verbatim
    pub fn listed(&self) -> &[Issue] {
        match self {
            Report::Ok { .. } => &[],
            Report::Issues {
                issues, max_listed, ..
            } => &issues[..issues.len().min(*max_listed)],
        }
    }

    /// Issues summarized only as a count
    pub fn hidden_count(&self) -> usize {
        self.issues().len() - self.listed().len()
    }

    /// Dialog title for the host
    pub fn title(&self) -> String {
        match self {
            Report::Ok { label, .. } => format!("{label} Verification"),
            Report::Issues { label, .. } => format!("{label} Verification Issues"),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Ok { label, density } => write!(
                f,
                "{label} model verified! All textures are {density}px density."
            ),
            Report::Issues {
                label,
                density,
                issues,
                ..
            } => {
                writeln!(
                    f,
                    "Found {} issue(s) with {label} model (expected {density}px density):",
                    issues.len()
                )?;
                writeln!(f)?;
                for issue in self.listed() {
                    writeln!(f, " - {issue}")?;
                }
                let hidden = self.hidden_count();
                if hidden > 0 {
                    write!(f, "\n...and {hidden} more issue(s)")?;
                }
                Ok(())
            }
        }
    }
}
