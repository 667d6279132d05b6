//! Headless vendor-form shell.
//!
//! Stands in for the rendering layer: reads one [`BridgeCommand`] JSON object
//! per line (from `--events <file>` or stdin), dispatches it through the UI
//! bridge, and prints the resulting `CommandResult<FormViewDto>` as one JSON
//! line on stdout.  Pincode lookups complete in the background; whenever one
//! changes the form, an extra view line is printed.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- TOML, defaults when absent
//!  └─ AppState::new()        -- session + GeoSyncService(DirectoryResolver)
//!  └─ event loop (select!)
//!       ├─ next command line  → ui_bridge::run_command_line
//!       └─ next LookupResult  → ui_bridge::apply_lookup_result
//! ```
//!
//! Example:
//!
//! ```bash
//! echo '{"command":"edit_field","field":"pincode","value":"110001"}' | vendor-form --settle
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vendor_form::infrastructure::storage::config::{load_config, render_config, AppConfig};
use vendor_form::infrastructure::ui_bridge::{
    apply_lookup_result, run_command_line, settle, AppState,
};

#[derive(Parser, Debug)]
#[command(name = "vendor-form", version, about = "Headless vendor onboarding form shell")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, env = "VENDOR_FORM_CONFIG", default_value = "vendor-form.toml")]
    config: PathBuf,

    /// Newline-delimited JSON commands; reads stdin when omitted.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Wait for pending pincode lookups after every command.
    #[arg(long)]
    settle: bool,

    /// Print the default configuration as TOML and exit.
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", render_config(&AppConfig::default())?);
        return Ok(());
    }

    let config = load_config(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;

    // Logs go to stderr so stdout carries only JSON.  `RUST_LOG` wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.form.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let (state, mut results_rx) = AppState::new(&config);
    let session_id = state.session.lock().await.id();
    info!(
        session = %session_id,
        directory_entries = config.directory.len(),
        "vendor form session started"
    );

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &args.events {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening events file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading command stream")? else {
                    break;
                };
                let Some(result) = run_command_line(Arc::clone(&state), &line).await else {
                    continue;
                };
                emit(&result)?;
                if args.settle {
                    emit_all(&settle(&state, &mut results_rx).await)?;
                }
            }
            Some(result) = results_rx.recv() => {
                if let Some(view) = apply_lookup_result(Arc::clone(&state), result).await {
                    emit(&view)?;
                }
            }
        }
    }

    // Let in-flight lookups land before exiting so the last view is final.
    emit_all(&settle(&state, &mut results_rx).await)?;
    info!("command stream closed");
    Ok(())
}

fn emit<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn emit_all<T: Serialize>(values: &[T]) -> anyhow::Result<()> {
    values.iter().try_for_each(emit)
}
