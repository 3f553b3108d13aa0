//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the pipeline lives in PipelineService.

use dotenv::dotenv;
use kegg_finder::adapters::export::FsExporter;
use kegg_finder::adapters::kegg::{KeggEndpoints, ReqwestKeggGateway};
use kegg_finder::adapters::ui::banner::Banner;
use kegg_finder::adapters::ui::tui::TuiInputPort;
use kegg_finder::ports::{ExportPort, InputPort, KeggGateway};
use kegg_finder::shared::config::AppConfig;
use kegg_finder::usecases::{ExportService, PipelineService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Logs go to stderr so they don't interleave with rendered tables on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            if let Some(path) = AppConfig::explicit_path() {
                anyhow::bail!("Failed to load config file {} (KEGG_FINDER_CONFIG): {}", path, e);
            }
            warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    let accessions: Vec<String> = std::env::args().skip(1).collect();
    if accessions.is_empty() {
        kegg_finder::adapters::ui::init_ui(&Banner::new(
            cfg.banner_title_or_default(),
            cfg.banner_subtitle_or_default(),
        ));
    }

    // --- KEGG gateway ---
    let base_url = cfg.base_url_or_default();
    let timeout = cfg.timeout_or_default();
    let max_retries = cfg.max_retries_or_default();
    info!(
        url = %base_url,
        timeout_secs = timeout.as_secs(),
        max_retries,
        "KEGG REST endpoint"
    );
    let gateway: Arc<dyn KeggGateway> = Arc::new(
        ReqwestKeggGateway::new(
            timeout,
            &cfg.user_agent_or_default(),
            max_retries,
            cfg.retry_backoff_or_default(),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    // --- Services ---
    let concurrency = cfg.concurrency_or_default();
    info!(concurrency, "lookup concurrency per stage");
    let pipeline = Arc::new(PipelineService::new(
        gateway,
        KeggEndpoints::new(base_url),
        concurrency,
    ));

    let output_dir = PathBuf::from(cfg.output_dir_or_default());
    info!(path = %output_dir.display(), "export directory");
    let exporter: Arc<dyn ExportPort> = Arc::new(FsExporter::new(&output_dir));
    let export_service = Arc::new(ExportService::new(exporter));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        pipeline,
        export_service,
        cfg.auto_export_or_default(),
    ));

    // --- Run (batch when accessions are given, otherwise interactive menu) ---
    let outcome = if accessions.is_empty() {
        input_port.run().await
    } else {
        input_port.run_batch(&accessions).await
    };
    outcome.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
