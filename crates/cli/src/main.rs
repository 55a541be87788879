use std::path::PathBuf;

use {
    anyhow::Context,
    clap::Parser,
    hubvault_config::{ConfigOverrides, ExportSettings},
    hubvault_export::{ExportPipeline, JsonFileSink},
    hubvault_hubspot::{Fetcher, HubSpotClient, Paginator},
    secrecy::Secret,
    tracing::{error, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "hubvault",
    version,
    about = "Export HubSpot live chats to a redacted JSON archive"
)]
struct Cli {
    /// Optional TOML config file. Flags and environment win over its values.
    #[arg(long, env = "HUBVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// HubSpot private app access token.
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Exact name of the live chat channel to export.
    #[arg(long, env = "CHANNEL")]
    channel: Option<String>,

    /// Milliseconds to wait between page requests. Must be non-zero.
    #[arg(long, env = "WAIT_MS")]
    wait_ms: Option<u64>,

    /// Conversations API root.
    #[arg(long, env = "HUBSPOT_BASE_URL")]
    base_url: Option<String>,

    /// Where to write the archive (default chats.json).
    #[arg(long, short, env = "HUBVAULT_OUTPUT")]
    output: Option<PathBuf>,

    /// Items requested per page.
    #[arg(long)]
    page_size: Option<u32>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            token: self.token.clone().map(Secret::new),
            channel: self.channel.clone(),
            wait_ms: self.wait_ms,
            base_url: self.base_url.clone(),
            output: self.output.clone(),
            page_size: self.page_size,
        }
    }

    fn settings(&self) -> hubvault_config::Result<ExportSettings> {
        hubvault_config::resolve(self.config.as_deref(), self.overrides())
    }
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

async fn export(settings: ExportSettings) -> anyhow::Result<()> {
    let paginator = Paginator::new(settings.delay)?;
    let client = HubSpotClient::new(&settings.base_url, settings.token)
        .with_page_size(settings.page_size);
    info!(base_url = client.base_url(), channel = %settings.channel, "exporting");
    let pipeline = ExportPipeline::new(Fetcher::new(client, paginator), settings.channel);
    let sink = JsonFileSink::new(settings.output);

    let summary = pipeline.run(&sink).await?;
    info!(
        channel_id = %summary.channel_id,
        threads = summary.threads,
        messages = summary.messages,
        path = %sink.path().display(),
        "wrote archive"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "hubvault starting");

    // Validation happens before any client exists.
    let settings = cli.settings().context("invalid configuration")?;

    if let Err(e) = export(settings).await {
        error!(error = %e, "export failed");
        return Err(e);
    }
    Ok(())
}
