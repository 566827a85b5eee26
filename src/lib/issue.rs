use itertools::Itertools;
use serde::Serialize;
use smartstring::alias::String;
use std::fmt;

/// One step from the document root: a member name or an array index.
#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.into())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(&key.replace('~', "~0").replace('/', "~1")),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Location of an issue inside a document.
///
/// Paths are never mutated in place: descending into a member or an element
/// produces a new path, so sibling subtrees cannot observe each other's segments.
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Path(vec![])
    }

    pub fn key(&self, key: &str) -> Self {
        self.join(key.into())
    }

    pub fn index(&self, index: usize) -> Self {
        self.join(index.into())
    }

    fn join(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PathSegment>> std::iter::FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

/// Renders as a JSON Pointer (RFC 6901); the root is the empty string.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, "/{}", self.0.iter().join("/"))
    }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum IssueKind {
    /// A required member is missing or holds the wrong JSON type or shape.
    Structural,
    /// Out-of-range coordinates, unconventional winding, inconsistent bbox.
    Semantic,
    /// The nesting cap was hit; the subtree was not inspected.
    DepthExceeded,
    /// The object's `type` could not be resolved or was not acceptable here.
    UnresolvableType,
}

#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct ValidationIssue {
    path: Path,
    severity: Severity,
    #[serde(skip)]
    kind: IssueKind,
    message: std::string::String,
}

impl ValidationIssue {
    pub fn new(
        path: Path,
        severity: Severity,
        kind: IssueKind,
        message: impl Into<std::string::String>,
    ) -> Self {
        ValidationIssue {
            path,
            severity,
            kind,
            message: message.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.path.is_root() {
            write!(f, "{} at (root): {}", severity, self.message)
        } else {
            write!(f, "{} at {}: {}", severity, self.path, self.message)
        }
    }
}

/// Outcome of validating one document.
///
/// `valid` is derived from the issues on construction and the issue list
/// cannot be modified afterwards.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct ValidationResult {
    valid: bool,
    issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        let valid = !issues.iter().any(ValidationIssue::is_error);
        ValidationResult { valid, issues }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "valid");
        }
        let status = if self.valid { "valid" } else { "invalid" };
        write!(f, "{}:", status)?;
        for issue in &self.issues {
            write!(f, "\n  {}", issue)?;
        }
        Ok(())
    }
}
