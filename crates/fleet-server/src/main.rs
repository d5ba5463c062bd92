use std::net::SocketAddr;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use fleet_server::{ApiServer, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "fleet-server",
    about = "In-memory vehicle registry with a live change feed",
    version
)]
struct Args {
    /// Address to bind the HTTP listener to
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Per-observer change feed buffer capacity
    #[arg(long, default_value_t = fleet_feed::DEFAULT_CAPACITY)]
    feed_capacity: usize,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig {
        bind_addr: args.bind,
        channel_capacity: args.feed_capacity,
    };
    ApiServer::new(config).serve().await?;
    Ok(())
}
