//! Check outcomes and analysis reports.

use serde::{Deserialize, Serialize};

/// Result status of a single checker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The criterion is verified.
    Passed,
    /// The criterion is not verified.
    Failed,
    /// The checker does not implement a verification yet.
    NotImplemented,
    /// The checker was skipped.
    Ignored,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed => write!(f, "FAILED"),
            Self::NotImplemented => write!(f, "NOT IMPLEMENTED"),
            Self::Ignored => write!(f, "IGNORED"),
        }
    }
}

/// What a checker reports after inspecting data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Resulting status.
    pub status: Status,
    /// Detail lines, typically one per offending dependency.
    pub messages: Vec<String>,
}

impl CheckOutcome {
    /// A passing outcome without messages.
    #[must_use]
    pub fn passed() -> Self {
        Self {
            status: Status::Passed,
            messages: Vec::new(),
        }
    }

    /// A failing outcome with the given detail lines.
    #[must_use]
    pub fn failed(messages: Vec<String>) -> Self {
        Self {
            status: Status::Failed,
            messages,
        }
    }

    /// Outcome for checkers without a verification.
    #[must_use]
    pub fn not_implemented() -> Self {
        Self {
            status: Status::NotImplemented,
            messages: Vec::new(),
        }
    }

    /// A skipped outcome with an explanation.
    #[must_use]
    pub fn ignored(reason: impl Into<String>) -> Self {
        Self {
            status: Status::Ignored,
            messages: vec![reason.into()],
        }
    }

    /// Builds a passed or failed outcome from a list of violations.
    #[must_use]
    pub fn from_violations(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            Self::passed()
        } else {
            Self::failed(messages)
        }
    }
}

/// Result of one checker within an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerResult {
    /// Plugin identifier (e.g. `archan.CompleteMediation`).
    pub identifier: String,
    /// Short codename (e.g. `CM`).
    pub codename: String,
    /// Display name.
    pub name: String,
    /// Status of the run.
    pub status: Status,
    /// Detail lines.
    pub messages: Vec<String>,
    /// Hint shown when the checker fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether a failure is tolerated.
    pub allow_failure: bool,
}

impl CheckerResult {
    /// Returns true if this result makes the analysis fail.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.status == Status::Failed && !self.allow_failure
    }
}

/// Results of all checkers run against one provider's data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Provider identifier.
    pub provider: String,
    /// Display name of the analysis.
    pub name: String,
    /// Optional description from the descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Summary of the data the provider returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Error raised by the provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether a provider error is tolerated.
    pub allow_failure: bool,
    /// Checker results, in descriptor order.
    pub results: Vec<CheckerResult>,
}

impl AnalysisReport {
    /// Returns true if neither the provider nor any checker blocks.
    #[must_use]
    pub fn is_success(&self) -> bool {
        let provider_ok = self.error.is_none() || self.allow_failure;
        provider_ok && !self.results.iter().any(CheckerResult::is_blocking)
    }
}

/// Counts of checker results per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Passed checks.
    pub passed: usize,
    /// Failed checks, tolerated or not.
    pub failed: usize,
    /// Checks without a verification.
    pub not_implemented: usize,
    /// Skipped checks.
    pub ignored: usize,
}

/// Full result of running an analysis descriptor.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Report {
    /// One entry per analysis group.
    pub analyses: Vec<AnalysisReport>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every analysis succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.analyses.iter().all(AnalysisReport::is_success)
    }

    /// Iterates over every checker result.
    pub fn results(&self) -> impl Iterator<Item = &CheckerResult> {
        self.analyses.iter().flat_map(|a| a.results.iter())
    }

    /// Counts checker results by status.
    #[must_use]
    pub fn count_by_status(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for result in self.results() {
            match result.status {
                Status::Passed => counts.passed += 1,
                Status::Failed => counts.failed += 1,
                Status::NotImplemented => counts.not_implemented += 1,
                Status::Ignored => counts.ignored += 1,
            }
        }
        counts
    }

    /// One-line summary of the report.
    #[must_use]
    pub fn summary(&self) -> String {
        let counts = self.count_by_status();
        format!(
            "{} passed, {} failed, {} not implemented, {} ignored in {} analysis(es)",
            counts.passed,
            counts.failed,
            counts.not_implemented,
            counts.ignored,
            self.analyses.len()
        )
    }
}
