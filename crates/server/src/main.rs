use cellwatch::{FanoutAuditSink, LoggingAuditSink, MemoryAuditLog, Tracker};
use cellwatch_server::config::{self, Overrides};
use cellwatch_server::run_server;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// JSON or TOML tracker configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid resolution (0-15), overrides the config file
    #[arg(short, long)]
    resolution: Option<u8>,

    /// Ring size for near queries, overrides the config file
    #[arg(long)]
    near_ring_size: Option<u32>,

    /// Also write every audit event to the log
    #[arg(long)]
    log_audit: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cellwatch_server=info,cellwatch=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let config = config::resolve(
        args.config.as_deref(),
        Overrides {
            resolution: args.resolution,
            near_ring_size: args.near_ring_size,
        },
    )?;

    let mut builder = Tracker::builder().config(config.clone());
    if args.log_audit {
        let memory = match config.audit_capacity {
            Some(capacity) => MemoryAuditLog::with_capacity(capacity),
            None => MemoryAuditLog::new(),
        };
        builder = builder.audit_sink(Arc::new(FanoutAuditSink::new(vec![
            Box::new(memory),
            Box::new(LoggingAuditSink),
        ])));
    }
    let tracker = builder.build()?;
    info!("Tracker ready at resolution {}", tracker.resolution());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_server(listener, tracker, shutdown).await?;

    Ok(())
}
