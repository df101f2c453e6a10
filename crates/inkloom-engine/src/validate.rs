//! Linting of story documents.
//!
//! Traversal never checks the graph ahead of time: a dangling target only
//! fails when it is taken. This pass reports such problems up front for
//! authoring tools. It is never run implicitly.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

use crate::choice::EffectSet;
use crate::story::{Node, StoryDocument};

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Play will fail if the player reaches it.
    Error,
    /// Probably unintended, but playable.
    Warning,
}

/// A problem found in a story document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// How serious the issue is.
    pub severity: Severity,
    /// The node where the issue was found.
    pub node: String,
    /// A human-readable description.
    pub message: String,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.node, self.message)
    }
}

/// All issues found in one document, errors first.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// The issues, sorted by severity then node id.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether any issue is an error.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Number of issues with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Whether the document is clean.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Lint a story document.
pub fn validate(document: &StoryDocument) -> ValidationReport {
    let mut issues = Vec::new();

    let mut ids: Vec<&String> = document.nodes().keys().collect();
    ids.sort();

    for id in &ids {
        if let Ok(node) = document.node(id) {
            validate_node(document, node, &mut issues);
        }
    }

    let reachable = reachable_from_start(document);
    for id in ids.iter().filter(|id| !reachable.contains(id.as_str())) {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            node: (*id).clone(),
            message: format!("unreachable from start node '{}'", document.start_node()),
        });
    }

    issues.sort_by(|a, b| (a.severity, &a.node).cmp(&(b.severity, &b.node)));
    ValidationReport { issues }
}

fn validate_node(document: &StoryDocument, node: &Node, issues: &mut Vec<ValidationIssue>) {
    let mut issue = |severity, message: String| {
        issues.push(ValidationIssue {
            severity,
            node: node.id.clone(),
            message,
        });
    };

    for choice in &node.choices {
        if document.node(&choice.target).is_err() {
            issue(
                Severity::Error,
                format!(
                    "choice '{}' targets missing node '{}'",
                    choice.id, choice.target
                ),
            );
        }
    }

    let mut seen = HashSet::new();
    for choice in &node.choices {
        if !seen.insert(choice.id.as_str()) {
            issue(
                Severity::Warning,
                format!("duplicate choice id '{}'", choice.id),
            );
        }
    }

    if node.choices.is_empty() && !node.ending {
        issue(
            Severity::Warning,
            "dead end: no choices and not marked as an ending".to_string(),
        );
    }

    let content = &node.content;
    if let Some(image) = content.image.as_deref().filter(|id| document.image(id).is_err()) {
        issue(Severity::Warning, format!("image asset '{image}' is not defined"));
    }
    if let Some(audio) = content.audio.as_deref().filter(|id| document.audio(id).is_err()) {
        issue(Severity::Warning, format!("audio asset '{audio}' is not defined"));
    }

    let effect_sets = node
        .effects
        .iter()
        .chain(node.choices.iter().filter_map(|c| c.effects.as_ref()));
    for achievement in undefined_achievements(document, effect_sets) {
        issue(
            Severity::Warning,
            format!("achievement '{achievement}' is not defined"),
        );
    }
}

fn undefined_achievements<'a>(
    document: &StoryDocument,
    effect_sets: impl Iterator<Item = &'a EffectSet>,
) -> BTreeSet<&'a str> {
    effect_sets
        .flat_map(|e| e.unlock_achievements.iter())
        .map(String::as_str)
        .filter(|id| document.achievement(id).is_none())
        .collect()
}

fn reachable_from_start(document: &StoryDocument) -> HashSet<&str> {
    let mut reachable = HashSet::new();
    let mut queue = VecDeque::from([document.start_node()]);

    while let Some(id) = queue.pop_front() {
        let Ok(node) = document.node(id) else {
            continue;
        };
        if !reachable.insert(node.id.as_str()) {
            continue;
        }
        queue.extend(node.choices.iter().map(|c| c.target.as_str()));
    }

    reachable
}
