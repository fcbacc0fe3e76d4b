use std::sync::Arc;

use mirror_core::{
    classifier::Classifier, config::Config, rules::RuleTable, stats::WellbeingStats,
};

mod console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mirror_core::logging::init("mirror")?;

    let cfg = Arc::new(Config::load()?);

    // Rule table integrity is a startup invariant: bail before reading input.
    let table = RuleTable::builtin()?;
    tracing::info!(categories = table.len(), "rule table loaded");

    let state = console::AppState {
        cfg: cfg.clone(),
        classifier: Arc::new(Classifier::new(table)),
        stats: Arc::new(WellbeingStats::new(cfg.improvement_step)),
    };

    console::run_loop(state).await?;
    Ok(())
}
