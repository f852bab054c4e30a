//! Heuristic classification of assistant replies into task outcomes.
//!
//! The assistant answers in free text; the backend gives the client no
//! structured signal about what (if anything) it did to the task list. The
//! classifier scans the lower-cased reply for substring markers grouped
//! into outcome rules. This is best-effort by design: a reply that merely
//! *mentions* "error" classifies as an error, and a phrasing outside the
//! marker lists classifies as nothing. Both false positives and false
//! negatives are documented behavior, not bugs to engineer away - the rule
//! list is pluggable so a structured backend response can replace it
//! without redesign.

use serde::{Deserialize, Serialize};

/// Coarse task-mutation result extracted from an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOutcome {
    Created,
    Deleted,
    Updated,
    Completed,
    Error,
}

/// The classifier's verdict for one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeClassification {
    pub outcome: TaskOutcome,
    /// False only for the `Error` outcome.
    pub success: bool,
}

/// One classification rule: an outcome plus the markers that signal it.
#[derive(Debug, Clone)]
pub struct OutcomeRule {
    pub outcome: TaskOutcome,
    pub success: bool,
    pub markers: Vec<&'static str>,
}

impl OutcomeRule {
    fn matches(&self, lower_reply: &str) -> bool {
        self.markers.iter().any(|marker| lower_reply.contains(marker))
    }
}

/// An ordered list of outcome rules; the first matching rule wins.
///
/// The default rule set puts the error rule first so error markers take
/// precedence over success markers.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    rules: Vec<OutcomeRule>,
}

impl OutcomeClassifier {
    /// Creates a classifier with a custom rule order.
    pub fn new(rules: Vec<OutcomeRule>) -> Self {
        Self { rules }
    }

    /// Classifies a reply, or returns `None` when no rule matches.
    pub fn classify(&self, reply: &str) -> Option<OutcomeClassification> {
        let lower = reply.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| OutcomeClassification {
                outcome: rule.outcome,
                success: rule.success,
            })
    }
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self::new(vec![
            OutcomeRule {
                outcome: TaskOutcome::Error,
                success: false,
                markers: vec![
                    "error",
                    "failed",
                    "unable to",
                    "could not",
                    "couldn't",
                    "sorry, i",
                ],
            },
            OutcomeRule {
                outcome: TaskOutcome::Created,
                success: true,
                markers: vec![
                    "task created",
                    "task added",
                    "created successfully",
                    "added successfully",
                    "i've added",
                    "i have added",
                ],
            },
            OutcomeRule {
                outcome: TaskOutcome::Deleted,
                success: true,
                markers: vec![
                    "task deleted",
                    "task removed",
                    "deleted successfully",
                    "removed successfully",
                    "i've deleted",
                    "i have deleted",
                    "i've removed",
                    "i have removed",
                ],
            },
            OutcomeRule {
                outcome: TaskOutcome::Updated,
                success: true,
                markers: vec![
                    "task updated",
                    "updated successfully",
                    "i've updated",
                    "i have updated",
                    "task modified",
                    "modified successfully",
                ],
            },
            OutcomeRule {
                outcome: TaskOutcome::Completed,
                success: true,
                markers: vec![
                    "task completed",
                    "marked as complete",
                    "marked complete",
                    "completed successfully",
                    "i've marked",
                    "task marked",
                ],
            },
        ])
    }
}
