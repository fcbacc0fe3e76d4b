//! Pattern classifier: evaluates the rule table against raw text.

use serde::Serialize;

use crate::rules::{Accent, RuleTable, Severity};

/// One detected distortion, with presentation hints copied from the category
/// and the reframes generated against the original input.
#[derive(Clone, Debug, Serialize)]
pub struct Detection {
    pub category_id: &'static str,
    pub severity: Severity,
    pub accent: Accent,
    pub icon: &'static str,
    pub reframes: Vec<String>,
}

/// The full result of one `analyze` call. Detection order equals the rule
/// table's category order. Empty means healthy self-talk, not an error.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AnalysisOutcome {
    pub detections: Vec<Detection>,
}

impl AnalysisOutcome {
    pub fn is_healthy(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> + '_ {
        self.detections.iter()
    }

    /// First detected category id, in table order. This is what the stats
    /// layer records as the "top pattern".
    pub fn top_category(&self) -> Option<&'static str> {
        self.detections.first().map(|d| d.category_id)
    }
}

/// Stateless classifier over a fixed rule table.
///
/// `analyze` is pure and touches no mutable state, so one instance can be
/// shared behind an `Arc` and called from any number of tasks.
pub struct Classifier {
    table: RuleTable,
}

impl Classifier {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Classify `text` against every category, in table order.
    ///
    /// Each category is evaluated at most once; within a category the first
    /// matching pattern wins and the rest are skipped. Never fails: empty,
    /// very long, or non-matching text all produce an outcome (possibly
    /// empty).
    pub fn analyze(&self, text: &str) -> AnalysisOutcome {
        let mut detections = Vec::new();

        for cat in self.table.categories() {
            if !cat.matches(text) {
                continue;
            }

            let reframes = cat.generators().iter().map(|gen| gen(text)).collect();
            detections.push(Detection {
                category_id: cat.id(),
                severity: cat.severity(),
                accent: cat.accent(),
                icon: cat.icon(),
                reframes,
            });
        }

        AnalysisOutcome { detections }
    }
}
