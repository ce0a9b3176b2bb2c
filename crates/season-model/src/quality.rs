use serde::{Deserialize, Serialize};

use crate::observation::SeriesKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Category of a data-quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Value could not be read as a number.
    NonNumericValue,
    /// Value was zero, negative, or the sentinel marker.
    NonPositiveValue,
    /// Value cell was empty.
    MissingValue,
    /// Country, product, year, or month could not be used as a key.
    InvalidKey,
    /// The same (country, product, year, month) appeared more than once.
    DuplicateKey,
    /// Not enough retained history to compute any seasonal index.
    InsufficientHistory,
    /// Some months of the year have no seasonal index.
    IncompleteIndex,
    /// Monthly averages summed to zero, so the pair cannot be normalized.
    ZeroSeasonalSum,
}

impl IssueKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::NonNumericValue => "SQ001",
            Self::NonPositiveValue => "SQ002",
            Self::MissingValue => "SQ003",
            Self::InvalidKey => "SQ004",
            Self::DuplicateKey => "SQ010",
            Self::InsufficientHistory => "SQ020",
            Self::IncompleteIndex => "SQ021",
            Self::ZeroSeasonalSum => "SQ030",
        }
    }

    pub fn severity(self) -> IssueSeverity {
        match self {
            Self::DuplicateKey | Self::ZeroSeasonalSum => IssueSeverity::Error,
            Self::NonNumericValue
            | Self::NonPositiveValue
            | Self::MissingValue
            | Self::InvalidKey
            | Self::InsufficientHistory
            | Self::IncompleteIndex => IssueSeverity::Warning,
        }
    }
}

/// A data-quality issue found while running the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub kind: IssueKind,
    /// Stable issue code (e.g., "SQ010").
    pub code: String,
    pub severity: IssueSeverity,
    /// Affected pair, absent when the row had no usable key.
    pub country: Option<String>,
    pub product: Option<String>,
    /// Human-readable message describing the issue.
    pub message: String,
    /// Count of affected rows.
    pub count: Option<u64>,
}

impl QualityIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.code().to_string(),
            severity: kind.severity(),
            country: None,
            product: None,
            message: message.into(),
            count: None,
        }
    }

    pub fn for_series(kind: IssueKind, key: &SeriesKey, message: impl Into<String>) -> Self {
        Self {
            country: Some(key.country.clone()),
            product: Some(key.product.clone()),
            ..Self::new(kind, message)
        }
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn matches(&self, key: &SeriesKey) -> bool {
        self.country.as_deref() == Some(key.country.as_str())
            && self.product.as_deref() == Some(key.product.as_str())
    }
}

/// All issues collected during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn push(&mut self, issue: QualityIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = QualityIssue>) {
        self.issues.extend(issues);
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn issues_for<'a>(&'a self, key: &'a SeriesKey) -> impl Iterator<Item = &'a QualityIssue> {
        self.issues.iter().filter(move |issue| issue.matches(key))
    }

    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }
}
