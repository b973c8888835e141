use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use switchyard_server::{DEFAULT_HOST, DEFAULT_PORT, RelayMode, ServerConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "switchyard_server=info,tower_http=info";

/// WebRTC signaling relay.
#[derive(Parser)]
#[command(name = "switchyard", version)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "SWITCHYARD_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// `rooms`, or `contacts` for the legacy room-less protocol.
    #[arg(short, long, env = "SWITCHYARD_MODE", default_value_t = RelayMode::Rooms)]
    mode: RelayMode,

    /// Directory served at `/`.
    #[arg(long, env = "SWITCHYARD_STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            mode: self.mode,
            static_dir: self.static_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config();

    init_tracing();
    print_banner(&config);

    switchyard_server::serve(config).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_banner(config: &ServerConfig) {
    println!("{}", "📡 Switchyard signaling relay".green().bold());
    println!("   🔌 Listening: {}:{}", config.host, config.port);
    println!("   🧭 Mode:      {}", config.mode.to_string().cyan());
    if let Some(dir) = &config.static_dir {
        println!("   📂 Static:    {}", dir.display());
    }
}
