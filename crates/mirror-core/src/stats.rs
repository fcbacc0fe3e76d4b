//! Per-session wellbeing counters.
//!
//! The classifier is stateless; whatever session state exists lives here, on
//! the caller's side of the boundary. In-memory only — nothing survives the
//! process.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::classifier::AnalysisOutcome;

#[derive(Debug, Default)]
struct StatsState {
    total_analyzed: u64,
    healthy_count: u64,
    weekly_improvement: u32,
    top_distortion: Option<&'static str>,
    session_start: Option<String>,
}

/// Point-in-time view of the session counters.
#[derive(Clone, Debug, Serialize)]
pub struct StatsSnapshot {
    pub total_analyzed: u64,
    pub healthy_count: u64,
    /// Rounded share of analyzed messages that came back healthy.
    pub healthy_percent: u32,
    /// First category id of the most recent non-empty outcome.
    pub top_distortion: Option<&'static str>,
    pub weekly_improvement: u32,
    pub session_start: Option<String>,
}

/// Running counters for one chat session, serialized behind a mutex so any
/// surface can record outcomes without its own discipline.
pub struct WellbeingStats {
    improvement_step: u32,
    state: Mutex<StatsState>,
}

impl WellbeingStats {
    pub fn new(improvement_step: u32) -> Self {
        Self {
            improvement_step,
            state: Mutex::new(StatsState::default()),
        }
    }

    /// Fold one analysis into the counters.
    pub async fn record(&self, outcome: &AnalysisOutcome) {
        let mut st = self.state.lock().await;
        if st.session_start.is_none() {
            st.session_start = Some(Utc::now().to_rfc3339());
        }

        st.total_analyzed += 1;
        if outcome.is_healthy() {
            st.healthy_count += 1;
            st.weekly_improvement = (st.weekly_improvement + self.improvement_step).min(100);
        } else {
            st.top_distortion = outcome.top_category();
        }
    }

    pub async fn snapshot(&self) -> StatsSnapshot {
        let st = self.state.lock().await;
        let healthy_percent = if st.total_analyzed > 0 {
            ((st.healthy_count as f64 / st.total_analyzed as f64) * 100.0).round() as u32
        } else {
            0
        };

        StatsSnapshot {
            total_analyzed: st.total_analyzed,
            healthy_count: st.healthy_count,
            healthy_percent,
            top_distortion: st.top_distortion,
            weekly_improvement: st.weekly_improvement,
            session_start: st.session_start.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::rules::RuleTable;

    fn classifier() -> Classifier {
        Classifier::new(RuleTable::builtin().unwrap())
    }

    #[tokio::test]
    async fn counts_healthy_and_unhealthy_messages() {
        let c = classifier();
        let stats = WellbeingStats::new(3);

        stats.record(&c.analyze("I had a good day today")).await;
        stats.record(&c.analyze("I'm such a loser")).await;
        stats.record(&c.analyze("lunch was nice")).await;

        let snap = stats.snapshot().await;
        assert_eq!(snap.total_analyzed, 3);
        assert_eq!(snap.healthy_count, 2);
        assert_eq!(snap.healthy_percent, 67);
        assert!(snap.session_start.is_some());
    }

    #[tokio::test]
    async fn top_distortion_is_first_category_of_last_unhealthy_outcome() {
        let c = classifier();
        let stats = WellbeingStats::new(3);

        stats.record(&c.analyze("I'm just stupid")).await;
        assert_eq!(stats.snapshot().await.top_distortion, Some("negativeLabel"));

        // A later unhealthy outcome replaces it with its own first category.
        stats
            .record(&c.analyze("everything is ruined, I'm a loser"))
            .await;
        assert_eq!(
            stats.snapshot().await.top_distortion,
            Some("catastrophizing")
        );

        // Healthy messages leave it alone.
        stats.record(&c.analyze("nice walk outside")).await;
        assert_eq!(
            stats.snapshot().await.top_distortion,
            Some("catastrophizing")
        );
    }

    #[tokio::test]
    async fn weekly_improvement_steps_on_healthy_and_caps_at_100() {
        let c = classifier();
        let stats = WellbeingStats::new(40);

        for _ in 0..5 {
            stats.record(&c.analyze("all good here")).await;
        }
        assert_eq!(stats.snapshot().await.weekly_improvement, 100);
    }

    #[tokio::test]
    async fn empty_session_snapshot_is_zeroed() {
        let stats = WellbeingStats::new(3);
        let snap = stats.snapshot().await;
        assert_eq!(snap.total_analyzed, 0);
        assert_eq!(snap.healthy_percent, 0);
        assert_eq!(snap.top_distortion, None);
        assert!(snap.session_start.is_none());
    }
}
