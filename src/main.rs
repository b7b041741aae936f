//! Bedrock Prompt Gateway
//!
//! A lightweight HTTP gateway that forwards a simple prompt payload to
//! Claude on AWS Bedrock and returns the generated text with token usage.

use anyhow::Result;
use bedrock_prompt_gateway::{
    config::{Environment, Settings},
    server::App,
};
use clap::Parser;

/// Bedrock Prompt Gateway
///
/// Serves POST /invoke: send a prompt, get the model's answer back.
#[derive(Parser, Debug)]
#[command(name = "bedrock-prompt-gateway")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT env var)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides HOST env var)
    #[arg(long)]
    host: Option<String>,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long)]
    log_level: Option<String>,

    /// Environment: dev, staging, prod (overrides ENVIRONMENT env var)
    #[arg(short, long)]
    env: Option<Environment>,

    /// Bedrock model id to serve (overrides MODEL_ID env var)
    #[arg(long)]
    model_id: Option<String>,

    /// Print all request prompts to stdout (for debugging)
    #[arg(long)]
    print_prompts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration first (before logging, so we can use log_level)
    let mut settings = Settings::load()?;

    // Override settings with CLI arguments
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(env) = args.env {
        settings.environment = env;
    }
    if let Some(model_id) = args.model_id {
        settings.model_id = model_id;
    }
    if args.print_prompts {
        settings.print_prompts = true;
    }

    // Initialize tracing subscriber with JSON output
    init_tracing(&settings.log_level);

    println!("\n{}", "=".repeat(60));
    println!("  {} v{}", settings.app_name, settings.app_version);
    println!("  Serving model: {}", settings.model_id);
    println!("{}\n", "=".repeat(60));
    println!("  Usage:");
    println!(
        "    invoke --payload '{{\"prompt\": \"What is machine learning?\"}}' \\"
    );
    println!("      --url http://{}:{} response.json", settings.host, settings.port);
    println!("\n{}\n", "=".repeat(60));

    tracing::info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        environment = %settings.environment,
        host = %settings.host,
        port = %settings.port,
        model_id = %settings.model_id,
        "Starting application"
    );

    // Build the application
    let app = App::new(settings).await?;

    // Run the server with graceful shutdown
    app.run_with_graceful_shutdown().await?;

    tracing::info!("Application shutdown complete");

    Ok(())
}

/// Initialize tracing subscriber with the specified log level
fn init_tracing(log_level: &str) {
    // RUST_LOG takes precedence over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .init();
}
