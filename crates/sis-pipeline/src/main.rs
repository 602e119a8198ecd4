//! Scene Intent analysis CLI.
//!
//! Usage: `sis-analyze <screenplay.fountain> [analysis-id]`

use anyhow::Context;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sis_models::AnalysisId;
use sis_pipeline::{PipelineError, SceneIntentPipeline};

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("sis=info".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    // Logs go to stderr so stdout stays valid JSON
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

async fn run() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: sis-analyze <screenplay file> [analysis id]")?;
    let analysis_id = args
        .next()
        .map(AnalysisId::from_string)
        .unwrap_or_default();

    let pipeline = SceneIntentPipeline::from_env().await?;
    let intents = pipeline.analyze_file(&path, &analysis_id).await?;

    let json = serde_json::to_string_pretty(&intents)?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        match e.downcast_ref::<PipelineError>() {
            Some(PipelineError::NoValidScenes) => eprintln!("{}", PipelineError::NoValidScenes),
            _ => error!("Analysis failed: {:#}", e),
        }
        std::process::exit(1);
    }
}
