//! Console chat surface: a line-oriented session over stdin/stdout.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use mirror_core::{
    classifier::Classifier,
    config::Config,
    formatting::{render_dashboard, render_outcome},
    stats::WellbeingStats,
    surface::ChatSurface,
    Result,
};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub classifier: Arc<Classifier>,
    pub stats: Arc<WellbeingStats>,
}

pub enum LoopAction {
    Continue,
    Quit,
}

struct StdoutSurface;

#[async_trait]
impl ChatSurface for StdoutSurface {
    async fn send_reply(&self, text: &str) -> Result<()> {
        println!("\n{text}\n");
        Ok(())
    }
}

/// Run the interactive session until EOF or `/quit`.
pub async fn run_loop(state: AppState) -> Result<()> {
    let surface = StdoutSurface;

    surface.send_reply(&state.cfg.greeting).await?;
    surface
        .send_reply("Type a thought to analyze it, or /help for commands.")
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match handle_line(&state, &surface, &line).await? {
            LoopAction::Continue => {}
            LoopAction::Quit => break,
        }
    }

    Ok(())
}

/// Handle one input line: slash commands or free-text analysis.
pub async fn handle_line(
    state: &AppState,
    surface: &dyn ChatSurface,
    line: &str,
) -> Result<LoopAction> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(LoopAction::Continue);
    }

    if line.starts_with('/') {
        return handle_command(state, surface, line).await;
    }

    let text = truncate_chars(line, state.cfg.max_input_chars);
    let outcome = state.classifier.analyze(&text);
    tracing::info!(
        detected = outcome.len(),
        healthy = outcome.is_healthy(),
        "analyzed message"
    );

    state.stats.record(&outcome).await;
    surface.send_reply(&render_outcome(&outcome)).await?;
    Ok(LoopAction::Continue)
}

async fn handle_command(
    state: &AppState,
    surface: &dyn ChatSurface,
    line: &str,
) -> Result<LoopAction> {
    let (cmd, _args) = parse_command(line);

    match cmd.as_str() {
        "dashboard" => {
            let snap = state.stats.snapshot().await;
            surface
                .send_reply(&render_dashboard(&snap, state.cfg.healthy_goal))
                .await?;
        }
        "examples" => {
            let list = state
                .cfg
                .example_prompts
                .iter()
                .map(|e| format!("- {e}"))
                .collect::<Vec<_>>()
                .join("\n");
            surface
                .send_reply(&format!("Try these examples:\n{list}"))
                .await?;
        }
        "help" => {
            surface
                .send_reply(
                    "Commands:\n\
                     /dashboard — your progress this session\n\
                     /examples — thoughts to try\n\
                     /help — this message\n\
                     /quit — end the session",
                )
                .await?;
        }
        "quit" | "exit" => {
            surface.send_reply("Take care! 🌿").await?;
            return Ok(LoopAction::Quit);
        }
        other => {
            surface
                .send_reply(&format!("Unknown command /{other}. Try /help."))
                .await?;
        }
    }

    Ok(LoopAction::Continue)
}

fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first.trim_start_matches('/').to_lowercase();
    (cmd, rest)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::rules::RuleTable;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSurface {
        replies: Mutex<Vec<String>>,
    }

    impl RecordingSurface {
        fn replies(&self) -> Vec<String> {
            self.replies.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatSurface for RecordingSurface {
        async fn send_reply(&self, text: &str) -> Result<()> {
            self.replies.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn test_state() -> AppState {
        let cfg = Arc::new(Config {
            greeting: "hi".to_string(),
            example_prompts: vec!["one".to_string(), "two".to_string()],
            max_input_chars: 4096,
            healthy_goal: 10,
            improvement_step: 3,
        });
        AppState {
            classifier: Arc::new(Classifier::new(RuleTable::builtin().unwrap())),
            stats: Arc::new(WellbeingStats::new(cfg.improvement_step)),
            cfg,
        }
    }

    #[tokio::test]
    async fn free_text_is_analyzed_and_recorded() {
        let state = test_state();
        let surface = RecordingSurface::default();

        handle_line(&state, &surface, "I'm such a loser")
            .await
            .unwrap();
        handle_line(&state, &surface, "nice walk today")
            .await
            .unwrap();

        let replies = surface.replies();
        assert!(replies[0].contains("negative Label"));
        assert!(replies[1].contains("healthy self-talk"));

        let snap = state.stats.snapshot().await;
        assert_eq!(snap.total_analyzed, 2);
        assert_eq!(snap.healthy_count, 1);
        assert_eq!(snap.top_distortion, Some("negativeLabel"));
    }

    #[tokio::test]
    async fn blank_lines_are_ignored() {
        let state = test_state();
        let surface = RecordingSurface::default();

        handle_line(&state, &surface, "   ").await.unwrap();
        assert!(surface.replies().is_empty());
        assert_eq!(state.stats.snapshot().await.total_analyzed, 0);
    }

    #[tokio::test]
    async fn dashboard_command_renders_current_stats() {
        let state = test_state();
        let surface = RecordingSurface::default();

        handle_line(&state, &surface, "I always fail at everything")
            .await
            .unwrap();
        handle_line(&state, &surface, "/dashboard").await.unwrap();

        let replies = surface.replies();
        let dash = replies.last().unwrap();
        assert!(dash.contains("Messages analyzed: 1"));
        assert!(dash.contains("Top pattern: overgeneralizing"));
    }

    #[tokio::test]
    async fn quit_command_stops_the_loop() {
        let state = test_state();
        let surface = RecordingSurface::default();

        let action = handle_line(&state, &surface, "/quit").await.unwrap();
        assert!(matches!(action, LoopAction::Quit));
    }

    #[tokio::test]
    async fn unknown_command_gets_a_hint() {
        let state = test_state();
        let surface = RecordingSurface::default();

        handle_line(&state, &surface, "/stats").await.unwrap();
        assert!(surface.replies()[0].contains("Unknown command /stats"));
    }

    #[tokio::test]
    async fn examples_command_lists_configured_prompts() {
        let state = test_state();
        let surface = RecordingSurface::default();

        handle_line(&state, &surface, "/examples").await.unwrap();
        let reply = &surface.replies()[0];
        assert!(reply.contains("- one"));
        assert!(reply.contains("- two"));
    }

    #[tokio::test]
    async fn overlong_input_is_truncated_before_analysis() {
        let mut state = test_state();
        let cfg = Arc::make_mut(&mut state.cfg);
        cfg.max_input_chars = 12;

        let surface = RecordingSurface::default();
        // The distortion trigger sits past the cutoff, so the truncated text
        // comes back healthy.
        handle_line(&state, &surface, "a quiet day, but I'm so stupid")
            .await
            .unwrap();
        assert!(surface.replies()[0].contains("healthy self-talk"));
    }

    #[test]
    fn command_parsing_lowercases_and_splits_args() {
        assert_eq!(
            parse_command("/Dashboard  now"),
            ("dashboard".to_string(), "now".to_string())
        );
        assert_eq!(parse_command("/quit"), ("quit".to_string(), String::new()));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 3), "hél");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
