mod cli;
mod fetch;

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;

use nearprobe_core::rpc::{CallContext, ClientConfig, HttpRpcClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    let default_filter = args.default_log_filter();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    // The call context owns the overall deadline, so the HTTP layer only
    // bounds connection setup.
    let config = args.headers.iter().cloned().fold(
        ClientConfig::default()
            .with_connect_timeout(Duration::from_secs(args.connect_timeout_secs))
            .with_request_timeout(None),
        |config, (name, value)| config.with_header(name, value),
    );
    let rpc = HttpRpcClient::new(&args.rpc_url, config).context("configure RPC client")?;

    let ctx = CallContext::new().with_timeout(Duration::from_secs(args.timeout_secs));
    let interrupt = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; cancelling in-flight call");
            interrupt.cancel();
        }
    });

    tracing::info!(rpc_url = %args.rpc_url, block_id = %args.block_id, "querying block");
    let block = fetch::fetch_block(&rpc, &args.rpc_url, &ctx, &args.block_id).await?;
    println!("{}", fetch::render_block(&block, args.compact)?);

    Ok(())
}
