//! Presentation boundary: turns outcomes and stats into user-facing text.
//!
//! Category ids stay opaque machine tokens inside the core; anything
//! display-shaped (spaced names, templates, the progress bar) happens here.

use crate::classifier::AnalysisOutcome;
use crate::stats::StatsSnapshot;

/// Render an opaque category id for humans: a space before each interior
/// capital ("allOrNothing" → "all Or Nothing").
pub fn display_name(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    for (i, ch) in id.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out.trim().to_string()
}

/// Render the reply for one analysis.
///
/// An empty outcome is good news and gets the healthy template; otherwise we
/// list each detected pattern with its reframe options.
pub fn render_outcome(outcome: &AnalysisOutcome) -> String {
    if outcome.is_healthy() {
        return "✅ This looks like healthy self-talk! Keep it up. 🌱".to_string();
    }

    let sections = outcome
        .iter()
        .map(|d| {
            let reframes = d
                .reframes
                .iter()
                .enumerate()
                .map(|(i, r)| format!("{}. {r}", i + 1))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{} **{}**\n\n**Reframe options:**\n{reframes}",
                d.icon,
                display_name(d.category_id)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        "I noticed some cognitive patterns here:\n\n{sections}\n\n\
         **Try saying:** Pick a reframe that feels authentic to you."
    )
}

/// Render the progress dashboard.
pub fn render_dashboard(snapshot: &StatsSnapshot, healthy_goal: u32) -> String {
    let top = snapshot
        .top_distortion
        .map(display_name)
        .unwrap_or_else(|| "None yet".to_string());

    format!(
        "📊 Your Progress\n\n\
         Messages analyzed: {}\n\
         Healthy self-talk: {}%\n\
         Top pattern: {top}\n\
         Weekly growth: +{}%\n\n\
         Progress tree 🌳 {}  {} healthy reframes",
        snapshot.total_analyzed,
        snapshot.healthy_percent,
        snapshot.weekly_improvement,
        progress_bar(snapshot.healthy_count, healthy_goal),
        snapshot.healthy_count,
    )
}

const BAR_WIDTH: u64 = 10;

fn progress_bar(healthy_count: u64, goal: u32) -> String {
    let goal = u64::from(goal.max(1));
    let filled = (healthy_count * BAR_WIDTH / goal).min(BAR_WIDTH) as usize;

    let mut bar = String::from("[");
    for i in 0..BAR_WIDTH as usize {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar.push(']');
    bar
}
