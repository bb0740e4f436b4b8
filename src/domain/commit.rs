use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// One commit as supplied by the history collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// First line of the commit message
    pub subject: String,
    /// Remaining message text
    pub body: String,
    /// Abbreviated commit hash
    pub hash: String,
}

impl CommitRecord {
    pub fn new(subject: impl Into<String>, body: impl Into<String>, hash: impl Into<String>) -> Self {
        CommitRecord {
            subject: subject.into(),
            body: body.into(),
            hash: hash.into(),
        }
    }

    /// Split a full commit message into subject and body.
    ///
    /// The subject is the first paragraph with its lines joined by spaces, as
    /// `git log --format=%s` prints it; the body is everything after.
    pub fn from_message(message: &str, hash: impl Into<String>) -> Self {
        let mut lines = message.lines().skip_while(|line| line.trim().is_empty());
        let subject = lines
            .by_ref()
            .take_while(|line| !line.trim().is_empty())
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ");
        let body = lines.collect::<Vec<_>>().join("\n");
        CommitRecord::new(subject, body.trim(), hash)
    }

    /// Rendered changelog line: ``- <subject> (`<hash>`)``
    pub fn entry(&self) -> String {
        format!("- {} (`{}`)", self.subject, self.hash)
    }
}

fn conventional_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<type>[a-z]+)(?:\((?P<scope>[^)]*)\))?(?P<bang>!)?:\s*(?P<description>.+)$")
            .ok()
    })
    .as_ref()
}

/// Parsed representation of a conventional commit subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub breaking_marker: bool,
    pub description: String,
}

impl ParsedCommit {
    /// Parse a subject against `type[(scope)][!]: description`.
    ///
    /// Returns `None` for non-conventional subjects.
    pub fn parse(subject: &str) -> Option<Self> {
        let captures = conventional_regex()?.captures(subject)?;

        Some(ParsedCommit {
            r#type: captures["type"].to_string(),
            scope: captures
                .name("scope")
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty()),
            breaking_marker: captures.name("bang").is_some(),
            description: captures["description"].to_string(),
        })
    }
}

/// Category a commit lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitClassification {
    Breaking,
    Feature,
    Fix,
    Other,
    Excluded,
}

impl fmt::Display for CommitClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommitClassification::Breaking => "breaking",
            CommitClassification::Feature => "feature",
            CommitClassification::Fix => "fix",
            CommitClassification::Other => "other",
            CommitClassification::Excluded => "excluded",
        };
        write!(f, "{}", name)
    }
}
