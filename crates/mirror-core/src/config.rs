use std::{env, fs, path::Path};

use crate::{errors::Error, Result};

/// Typed configuration, loaded from the environment (with `.env` support).
#[derive(Clone, Debug)]
pub struct Config {
    /// Greeting printed when a chat session opens.
    pub greeting: String,
    /// Example prompts offered to a fresh session.
    pub example_prompts: Vec<String>,
    /// Input longer than this is truncated before analysis.
    pub max_input_chars: usize,
    /// Healthy-reframe count that fills the progress bar.
    pub healthy_goal: u32,
    /// Weekly-growth increment per healthy message (percent).
    pub improvement_step: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let greeting = env_str("MIRROR_GREETING").and_then(non_empty).unwrap_or_else(|| {
            "Hi! I'm Mindful Mirror 🌿. Share your thoughts and I'll help reframe them \
             using CBT techniques. Your mental wellbeing matters."
                .to_string()
        });

        let example_prompts = parse_pipe_list(env_str("MIRROR_EXAMPLES")).unwrap_or_else(|| {
            vec![
                "I always mess up coding interviews, I'm just stupid".to_string(),
                "Everyone hates my project, total failure".to_string(),
                "I should have studied more, I'm such a failure".to_string(),
            ]
        });

        let max_input_chars = env_usize("MIRROR_MAX_INPUT_CHARS").unwrap_or(4096);
        let healthy_goal = env_u32("MIRROR_HEALTHY_GOAL").unwrap_or(10);
        let improvement_step = env_u32("MIRROR_IMPROVEMENT_STEP").unwrap_or(3);

        if max_input_chars == 0 {
            return Err(Error::Config(
                "MIRROR_MAX_INPUT_CHARS must be at least 1".to_string(),
            ));
        }
        if healthy_goal == 0 {
            return Err(Error::Config(
                "MIRROR_HEALTHY_GOAL must be at least 1".to_string(),
            ));
        }
        if improvement_step == 0 || improvement_step > 100 {
            return Err(Error::Config(
                "MIRROR_IMPROVEMENT_STEP must be between 1 and 100".to_string(),
            ));
        }

        Ok(Self {
            greeting,
            example_prompts,
            max_input_chars,
            healthy_goal,
            improvement_step,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u32(key: &str) -> Option<u32> {
    env_str(key).and_then(|s| s.trim().parse::<u32>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn parse_pipe_list(v: Option<String>) -> Option<Vec<String>> {
    let v = v?;
    let out = v
        .split('|')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
