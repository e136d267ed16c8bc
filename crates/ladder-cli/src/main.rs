use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ladder_core::domain::EpisodeId;
use ladder_core::impls::{ModelScript, ScriptedModel};
use ladder_core::{PolicyBuilder, PolicySettings, ReasoningState, ScoredAction, SearchConfig};

const USAGE: &str = "usage: ladder-cli <settings.json> <model-script.json> <question>";

#[derive(Debug, Serialize)]
struct Expansion {
    episode: EpisodeId,
    question: String,
    actions: Vec<ScoredAction>,
}

/// stdout carries the JSON result, so logs go to stderr.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

struct Args {
    settings: PathBuf,
    script: PathBuf,
    question: String,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let settings = args.next().ok_or(USAGE)?;
    let script = args.next().ok_or(USAGE)?;
    let question = args.collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        return Err(USAGE.to_string());
    }
    Ok(Args {
        settings: settings.into(),
        script: script.into(),
        question,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = parse_args()?;

    // (A) 設定とモデルの台本を読み込む
    let settings = PolicySettings::load(&args.settings)?;
    let script: ModelScript = serde_json::from_str(&std::fs::read_to_string(&args.script)?)?;
    tracing::info!(
        settings = %args.settings.display(),
        generations = script.generations.len(),
        "loaded settings and model script"
    );

    // (B) policy を構築し、質問を bind する
    let model = Arc::new(ScriptedModel::from_script(script));
    let mut policy = PolicyBuilder::new()
        .settings(settings)
        .model(model.clone())
        .build()?;
    policy.update_example(&args.question);

    // (C) root node を 1 回展開（propose + fast_reward）
    let actions = policy.score_actions(&ReasoningState::new()).await?;

    let episode = policy
        .episode()
        .map(|e| e.id())
        .ok_or("episode was not bound")?;
    let expansion = Expansion {
        episode,
        question: args.question,
        actions,
    };
    println!("{}", serde_json::to_string_pretty(&expansion)?);

    tracing::info!(
        unused_generations = model.remaining_generations().await,
        "expansion finished"
    );
    Ok(())
}
