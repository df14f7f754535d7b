//! Campaign pipeline CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use campaign_pipeline::cli::{Cli, Command};
use campaign_pipeline::config::Config;
use campaign_pipeline::domain::{BrandContext, CampaignRequest};
use campaign_pipeline::llm::create_client;
use campaign_pipeline::pipeline::{PipelineEngine, Stage, TerminalStatus};
use campaign_pipeline::stages::{
    AnalyticsStage, ContentStage, PublishStage, QualityStage, ResearchStage, StrategyStage,
};
use campaign_pipeline::tools::ToolContext;

fn setup_logging(verbose: bool) -> Result<()> {
    // Log to a file so stdout stays clean for the run outcome JSON
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("campaign-pipeline")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("campaign.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "Loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Command::Run {
            goal,
            audience,
            budget,
            brand,
        } => cmd_run(&config, goal, audience, budget, brand).await,
        Command::Config => cmd_config(&config),
    }
}

/// Run the pipeline for one campaign and print the outcome as JSON
async fn cmd_run(
    config: &Config,
    goal: String,
    audience: String,
    budget: f64,
    brand_path: Option<PathBuf>,
) -> Result<()> {
    config.validate()?;

    let brand = match brand_path {
        Some(path) => {
            let content =
                fs::read_to_string(&path).context(format!("Failed to read brand file {}", path.display()))?;
            serde_yaml::from_str::<BrandContext>(&content)
                .context(format!("Failed to parse brand file {}", path.display()))?
        }
        None => BrandContext::default(),
    };

    let request = CampaignRequest {
        goal,
        target_audience: audience,
        budget,
        brand,
    };

    let ctx = ToolContext::new(request.brand.clone(), config.tools.serper_api_key())
        .context("Failed to build tool HTTP client")?;
    let max_steps = config.pipeline.max_tool_steps;

    let research_llm = create_client(&config.resolve_llm("research"))?;
    let strategy_llm = create_client(&config.resolve_llm("strategy"))?;
    let content_llm = create_client(&config.resolve_llm("content"))?;
    let quality_llm = create_client(&config.resolve_llm("quality"))?;
    let analytics_llm = create_client(&config.resolve_llm("analytics"))?;

    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(ResearchStage::new(research_llm, ctx.clone(), max_steps)),
        Box::new(StrategyStage::new(strategy_llm, ctx.clone(), max_steps)),
        Box::new(ContentStage::new(content_llm, ctx, max_steps)),
        Box::new(QualityStage::new(quality_llm)),
        Box::new(PublishStage),
        Box::new(AnalyticsStage::new(analytics_llm)),
    ];

    let engine = PipelineEngine::new(stages);
    let outcome = engine.run(request).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if outcome.status == TerminalStatus::Failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the effective configuration as YAML
fn cmd_config(config: &Config) -> Result<()> {
    println!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
