//! Static registry of cognitive-distortion categories.
//!
//! The table is closed: five categories, registered once at startup, never
//! mutated. Registration order is significant — it decides both the order of
//! detections in an outcome and which category counts as the "top pattern"
//! when several match.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::{errors::Error, Result};

/// Coarse priority label for presentation emphasis. Does not affect detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Color hint for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Red,
    Orange,
}

impl Accent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
        }
    }
}

/// A reframe generator: a pure function from the matched input to a
/// suggestion. Constant reframes ignore their argument; the should-statements
/// softener transforms it. One calling convention for both.
pub type ReframeFn = fn(&str) -> String;

/// One distortion category: opaque id, detection patterns, presentation
/// hints, and its ordered reframe generators.
pub struct Category {
    id: &'static str,
    severity: Severity,
    accent: Accent,
    icon: &'static str,
    patterns: Vec<Regex>,
    generators: &'static [ReframeFn],
}

impl Category {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn accent(&self) -> Accent {
        self.accent
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// True if any detection pattern matches. Patterns are tested in declared
    /// order and checking stops at the first hit; which pattern matched is
    /// not reported.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }

    pub fn generators(&self) -> &'static [ReframeFn] {
        self.generators
    }
}

/// The closed rule table. Built once at process start, shared read-only.
pub struct RuleTable {
    categories: Vec<Category>,
}

impl RuleTable {
    /// Build the builtin five-category table and verify its integrity.
    ///
    /// A malformed table (bad pattern, category without generators) is a
    /// startup failure, not a per-call condition.
    pub fn builtin() -> Result<Self> {
        let categories = vec![
            category(
                "catastrophizing",
                Severity::High,
                Accent::Red,
                "🍂",
                &[
                    r"everything.*(?:ruin|destroy|over)",
                    r"complete.*(?:disaster|failure|mess)",
                    r"never.*(?:recover|fix|work)",
                    r"worst.*(?:thing|possible|ever)",
                    r"totally.*(?:screwed|doomed)",
                ],
                CATASTROPHIZING_REFRAMES,
            )?,
            category(
                "overgeneralizing",
                Severity::High,
                Accent::Red,
                "🍁",
                &[
                    r"always.*(?:fail|mess|screw)",
                    r"everyone.*(?:hate|think|judge)",
                    r"never.*(?:succeed|work|improve)",
                    r"nobody.*(?:care|like|understand)",
                    r"every.*time",
                ],
                OVERGENERALIZING_REFRAMES,
            )?,
            category(
                "allOrNothing",
                Severity::Medium,
                Accent::Orange,
                "🍂",
                &[
                    r"(?:total|complete).*(?:failure|disaster)",
                    r"perfect.*or.*(?:worthless|nothing)",
                    r"ruined.*everything",
                    r"either.*or.*(?:nothing|failure)",
                    r"all.*(?:wrong|bad|terrible)",
                ],
                ALL_OR_NOTHING_REFRAMES,
            )?,
            category(
                "negativeLabel",
                Severity::High,
                Accent::Red,
                "🥀",
                &[
                    r"I'?m.*(?:stupid|dumb|idiot|loser|failure|worthless)",
                    r"such a.*(?:mess|disaster|joke)",
                    r"total.*(?:failure|loser)",
                ],
                NEGATIVE_LABEL_REFRAMES,
            )?,
            category(
                "shouldStatements",
                Severity::Medium,
                Accent::Orange,
                "🍃",
                &[
                    r"should.*(?:have|be|do)",
                    r"must.*(?:be|do|have)",
                    r"have to.*be",
                    r"supposed to",
                    r"ought to",
                ],
                SHOULD_STATEMENTS_REFRAMES,
            )?,
        ];

        let table = Self { categories };
        table.verify()?;
        tracing::debug!(categories = table.categories.len(), "rule table verified");
        Ok(table)
    }

    /// Ordered, restartable iteration over all categories (registration order).
    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Ordered reframe generators for a category id.
    ///
    /// Unreachable for ids produced by this table; kept fallible so callers
    /// holding ids from elsewhere get an error instead of a panic.
    pub fn generators_for(&self, id: &str) -> Result<&'static [ReframeFn]> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.generators)
            .ok_or_else(|| Error::UnknownCategory(id.to_string()))
    }

    fn verify(&self) -> Result<()> {
        for (idx, cat) in self.categories.iter().enumerate() {
            if cat.patterns.is_empty() {
                return Err(Error::Config(format!(
                    "category `{}` has no detection patterns",
                    cat.id
                )));
            }
            if cat.generators.is_empty() {
                return Err(Error::Config(format!(
                    "category `{}` has no reframe generators",
                    cat.id
                )));
            }
            if self.categories[..idx].iter().any(|c| c.id == cat.id) {
                return Err(Error::Config(format!("duplicate category id `{}`", cat.id)));
            }
        }
        Ok(())
    }
}

fn category(
    id: &'static str,
    severity: Severity,
    accent: Accent,
    icon: &'static str,
    patterns: &[&str],
    generators: &'static [ReframeFn],
) -> Result<Category> {
    let mut compiled = Vec::with_capacity(patterns.len());
    for raw in patterns {
        let re = RegexBuilder::new(raw)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::Config(format!("category `{id}`: bad pattern `{raw}`: {e}")))?;
        compiled.push(re);
    }

    Ok(Category {
        id,
        severity,
        accent,
        icon,
        patterns: compiled,
        generators,
    })
}

// ============== Reframe generators ==============

const CATASTROPHIZING_REFRAMES: &[ReframeFn] = &[reframe_small_step, reframe_resources];
const OVERGENERALIZING_REFRAMES: &[ReframeFn] = &[reframe_this_time, reframe_supporters];
const ALL_OR_NOTHING_REFRAMES: &[ReframeFn] = &[reframe_partial_credit, reframe_progress];
const NEGATIVE_LABEL_REFRAMES: &[ReframeFn] = &[reframe_not_identity, reframe_growing];
const SHOULD_STATEMENTS_REFRAMES: &[ReframeFn] = &[soften_shoulds, reframe_flexible];

fn reframe_small_step(_text: &str) -> String {
    "This situation is challenging, but not permanent. What's one small step I can take?".to_string()
}

fn reframe_resources(_text: &str) -> String {
    "Things feel overwhelming right now. What resources or support do I have?".to_string()
}

fn reframe_this_time(_text: &str) -> String {
    "This happened this time. What evidence do I have that it always happens?".to_string()
}

fn reframe_supporters(_text: &str) -> String {
    "Some people may think that. What about those who've supported me?".to_string()
}

fn reframe_partial_credit(_text: &str) -> String {
    "This didn't go as planned. What parts went okay? What can I learn?".to_string()
}

fn reframe_progress(_text: &str) -> String {
    "Progress isn't perfect. What specific aspects need work?".to_string()
}

fn reframe_not_identity(_text: &str) -> String {
    "I made a mistake here. That doesn't define who I am as a person.".to_string()
}

fn reframe_growing(_text: &str) -> String {
    "I'm learning and growing. One struggle doesn't make me a failure.".to_string()
}

/// The one input-dependent generator: rewrite rigid demands into softer
/// phrasing instead of answering with a fixed template.
fn soften_shoulds(text: &str) -> String {
    let should_have = Regex::new(r"(?i)should have").expect("valid regex");
    let must_be = Regex::new(r"(?i)must be").expect("valid regex");

    let softened = should_have.replace_all(text, "it would have been helpful to");
    must_be.replace_all(&softened, "I'd prefer to be").into_owned()
}

fn reframe_flexible(_text: &str) -> String {
    "What's a more flexible way to think about this expectation?".to_string()
}
