//! CLI tool to invoke the gateway and capture the response
//!
//! Usage:
//!   cargo run --bin invoke -- --payload '{"prompt": "What is machine learning?"}' response.json
//!   cargo run --bin invoke -- --payload '{"prompt": "Explain Python decorators", "max_tokens": 800, "temperature": 0.5}' response.json
//!
//! The raw response body is written to the output file and echoed to
//! stdout. The exit status is non-zero when the invocation fails, so
//! shell `&&` chains short-circuit.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Invoke the prompt gateway with a JSON payload
#[derive(Parser, Debug)]
#[command(name = "invoke")]
#[command(about = "Invoke the prompt gateway and write the response to a file")]
struct Args {
    /// JSON payload to send, e.g. '{"prompt": "What is machine learning?"}'
    #[arg(long, conflicts_with = "payload_file")]
    payload: Option<String>,

    /// Read the JSON payload from a file instead
    #[arg(long)]
    payload_file: Option<PathBuf>,

    /// Gateway base URL
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "120")]
    timeout: u64,

    /// File to write the raw response body to
    outfile: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let payload = read_payload(&args)?;

    // Reject malformed payloads before anything goes on the wire
    let payload_json: serde_json::Value =
        serde_json::from_str(&payload).context("Payload is not valid JSON")?;

    let endpoint = format!("{}/invoke", args.url.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .post(&endpoint)
        .json(&payload_json)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", endpoint))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    // The response document is written for error statuses too, the way
    // `aws lambda invoke` records a function error document.
    write_response_file(&args.outfile, &body)
        .with_context(|| format!("Failed to write {}", args.outfile.display()))?;

    // Echo the response body to stdout
    std::io::stdout().write_all(&body)?;
    if !body.ends_with(b"\n") {
        println!();
    }

    eprintln!(
        "Wrote {} bytes to {} (status {})",
        body.len(),
        args.outfile.display(),
        status.as_u16()
    );

    if !status.is_success() {
        bail!("Invocation failed with status {}", status.as_u16());
    }

    Ok(())
}

/// Resolve the payload from --payload or --payload-file.
fn read_payload(args: &Args) -> Result<String> {
    match (&args.payload, &args.payload_file) {
        (Some(payload), _) => Ok(payload.clone()),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file {}", path.display())),
        (None, None) => bail!("Either --payload or --payload-file is required"),
    }
}

/// Write the raw response bytes to the output file.
fn write_response_file(path: &Path, body: &[u8]) -> std::io::Result<()> {
    fs::write(path, body)
}
