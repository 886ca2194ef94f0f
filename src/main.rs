use clap::Parser;
use fswatch_hooks::config::{DEFAULT_ENV_PREFIX, SettingsBuilder};
use fswatch_hooks::server::Server;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Watch a directory and POST change notifications to registered callbacks.
#[derive(Parser, Debug)]
#[command(name = "fswatch-hooks", version)]
struct Cli {
    /// The path to watch
    #[arg(short, long, env = "FSHOOKS_PATH")]
    path: Option<PathBuf>,

    /// The port to listen on (a leading ':' is accepted)
    #[arg(long, env = "FSHOOKS_PORT")]
    port: Option<String>,

    /// Address to bind the control API to
    #[arg(long)]
    bind: Option<IpAddr>,

    /// Settings file (YAML, TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds before an outbound delivery is abandoned; 0 disables the limit
    #[arg(long)]
    delivery_timeout: Option<u32>,
}

fn parse_port(raw: &str) -> anyhow::Result<u16> {
    let port = raw.strip_prefix(':').unwrap_or(raw);
    port.parse()
        .map_err(|e| anyhow::anyhow!("invalid port '{}': {}", raw, e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut builder = SettingsBuilder::new();
    if let Some(path) = &cli.config {
        builder = builder.with_file(path);
    }
    builder = builder.with_env_overrides(DEFAULT_ENV_PREFIX, "__");
    if let Some(path) = cli.path {
        builder = builder.with_watch_root(path);
    }
    if let Some(port) = cli.port.as_deref() {
        builder = builder.with_port(parse_port(port)?);
    }
    if let Some(bind) = cli.bind {
        builder = builder.with_override("bind_address", bind.to_string());
    }
    if let Some(secs) = cli.delivery_timeout {
        builder = builder.with_override("delivery_timeout_secs", i64::from(secs));
    }

    let settings = builder.build().inspect_err(|e| error!("{}", e))?;
    let server = Server::bind(settings)
        .await
        .inspect_err(|e| error!("{}", e))?;

    server.run().await?;
    Ok(())
}
